//! Runtime settings for the handle layer.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BindError;

/// Environment variable naming a JSON file with a [`BindingConfig`].
pub const CONFIG_ENV: &str = "VELA_CONFIG";

/// Settings applied to the process-wide handle table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    /// Maximum number of live arrays, `0` for no limit.
    pub max_live_arrays: usize,
    /// Emit a `warn!` whenever a call fails and returns its sentinel.
    pub log_failures: bool,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            max_live_arrays: 0,
            log_failures: true,
        }
    }
}

impl BindingConfig {
    pub fn from_json(json: &str) -> Result<Self, BindError> {
        serde_json::from_str(json).map_err(|e| BindError::Config(format!("invalid config JSON: {e}")))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BindError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| BindError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    /// Load the file named by `VELA_CONFIG`, if the variable is set.
    pub fn from_env() -> Result<Option<Self>, BindError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::from_file(path).map(Some),
            _ => Ok(None),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
