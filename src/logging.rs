//! Tracing subscriber setup for the favr binary
//!
//! Logs go to stderr so they never mix with command output on stdout.
//! `RUST_LOG` takes precedence over the configured default filter.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::FavrError;

/// Build the filter from `RUST_LOG`, falling back to `default_directives`
///
/// # Errors
///
/// Returns `FavrError::Logging` if `default_directives` is not a valid filter.
pub fn build_env_filter(default_directives: &str) -> Result<EnvFilter, FavrError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(default_directives)
        .map_err(|e| FavrError::Logging(format!("invalid log filter '{default_directives}': {e}")))
}

/// Install the global subscriber
///
/// # Errors
///
/// Returns `FavrError::Logging` if the filter is invalid or a global
/// subscriber has already been installed.
pub fn init(default_directives: &str) -> Result<(), FavrError> {
    let filter = build_env_filter(default_directives)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| FavrError::Logging(e.to_string()))
}
