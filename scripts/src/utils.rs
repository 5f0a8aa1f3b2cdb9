//! Utilities for the deploy scripts.

use std::io;

use tracing_subscriber::EnvFilter;

use crate::constants::DEFAULT_LOG_LEVEL;

/// Sets up the global tracing subscriber.
///
/// Logs go to stderr so that stdout carries only the deployment result.
/// The level is read from `RUST_LOG`, falling back to [`DEFAULT_LOG_LEVEL`].
pub fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
