//! Tracing setup for binaries and tests embedding this library.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize tracing with an env-filter (`RUST_LOG`), defaulting to
/// `info`.
///
/// Safe to call more than once per process; subsequent calls are no-ops.
/// Embedding applications that install their own subscriber should skip
/// this.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
