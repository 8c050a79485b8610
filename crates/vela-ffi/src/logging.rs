//! Subscriber setup for hosts that want the layer's log output.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "VELA_LOG";

/// Install a `fmt` subscriber filtered by `VELA_LOG` (default `warn`).
///
/// Returns `false` if a global subscriber was already installed, in which
/// case that one is kept.
#[no_mangle]
pub extern "C" fn vela_init_logging() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
