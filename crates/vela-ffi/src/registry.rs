//! Process-wide array registry.
//!
//! Arrays live behind `Arc` so a call can clone its operands out under the
//! read lock and compute with no lock held. A destroy racing a computation
//! only drops the table's reference; the computation finishes on its own
//! snapshot.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use vela_core::Array;

use crate::config::BindingConfig;
use crate::error::BindError;
use crate::handle::HandleTable;

pub struct Registry {
    arrays: RwLock<HandleTable<Arc<Array>>>,
    config: RwLock<BindingConfig>,
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The global registry, created on first use from `VELA_CONFIG` or defaults.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        let config = match BindingConfig::from_env() {
            Ok(Some(cfg)) => {
                tracing::info!(?cfg, "loaded binding config");
                cfg
            }
            Ok(None) => BindingConfig::default(),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring binding config, using defaults");
                BindingConfig::default()
            }
        };
        Registry::new(config)
    })
}

impl Registry {
    pub fn new(config: BindingConfig) -> Self {
        Self {
            arrays: RwLock::new(HandleTable::with_limit(config.max_live_arrays)),
            config: RwLock::new(config),
        }
    }

    /// Shared snapshot of the array behind `handle`.
    pub fn resolve(&self, handle: u64) -> Result<Arc<Array>, BindError> {
        let arrays = self.arrays.read();
        Ok(Arc::clone(arrays.get(handle)?))
    }

    /// Take ownership of `array` and return its new handle.
    pub fn insert(&self, array: Array) -> Result<u64, BindError> {
        let dims = array.dims();
        let handle = self.arrays.write().insert(Arc::new(array))?;
        tracing::debug!(?handle, %dims, "array registered");
        Ok(handle.into_raw())
    }

    /// Drop the table's reference to the array behind `handle`.
    pub fn destroy(&self, handle: u64) -> Result<(), BindError> {
        let array = self.arrays.write().remove(handle)?;
        tracing::debug!(handle = format_args!("{handle:#x}"), dims = %array.dims(), "array released");
        Ok(())
    }

    /// Number of live handles.
    pub fn live(&self) -> usize {
        self.arrays.read().len()
    }

    pub fn config(&self) -> BindingConfig {
        self.config.read().clone()
    }

    /// Replace the settings. Lowering the limit below the live count only
    /// blocks further inserts.
    pub fn apply_config(&self, config: BindingConfig) {
        self.arrays.write().set_limit(config.max_live_arrays);
        tracing::info!(?config, "binding config applied");
        *self.config.write() = config;
    }
}
