//! Tracing subscriber setup for binaries.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the process entry point.

use tracing_subscriber::{
    EnvFilter, fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `log_level`. Debug builds log in a
/// human-readable format; release builds log JSON.
///
/// # Errors
///
/// Returns [`TryInitError`] when a global subscriber is already installed.
pub fn init(log_level: &str) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},researchmate={log_level}")));

    let registry = tracing_subscriber::registry().with(env_filter);

    // Answers go to stdout, so logs stay on stderr.
    #[cfg(debug_assertions)]
    let layer = fmt::layer()
        .pretty()
        .with_target(false)
        .with_writer(std::io::stderr);

    #[cfg(not(debug_assertions))]
    let layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_writer(std::io::stderr);

    registry.with(layer).try_init()
}
