//! Tracing subscriber setup for kitgrid binaries.

use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber filtered at `default_level`.
///
/// `RUST_LOG` takes precedence when set. Calling this more than once is a
/// no-op; the first subscriber stays installed.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("[Logging] Tracing initialised at '{}'", default_level);
    }
}
