//! Tracing subscriber setup for binaries.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to
/// `warn`. Does nothing when a subscriber is already installed.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!("tracing initialized");
    }
}
