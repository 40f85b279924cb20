//! Tracing subscriber setup shared by the service binaries

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_directive` (e.g. `"info"`)
/// is used. Calling this twice is harmless: the second install is ignored.
pub fn init(service: &str, default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let installed = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(service, "Logging initialized");
    }
}
