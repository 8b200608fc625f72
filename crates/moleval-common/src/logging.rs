//! Tracing setup for binaries and tests embedding the harness.

use tracing_subscriber::EnvFilter;

/// Initialise a default tracing subscriber.
/// Respects `RUST_LOG`; falls back to `info`. Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
