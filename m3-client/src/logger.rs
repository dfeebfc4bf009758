//! Logging Infrastructure
//!
//! `RUST_LOG` takes precedence; otherwise the given level applies.

use tracing_subscriber::EnvFilter;

const DEFAULT_LEVEL: &str = "info";

/// Initialize the logger at `info`
pub fn init_logger() {
    init_logger_with_level(None);
}

/// Initialize the logger with an optional fallback level
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger_with_level(log_level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback_filter(log_level));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .try_init();

    if result.is_err() {
        tracing::debug!("Logger already initialized");
    }
}

/// Filter used when `RUST_LOG` is unset
fn fallback_filter(log_level: Option<&str>) -> EnvFilter {
    EnvFilter::new(log_level.unwrap_or(DEFAULT_LEVEL))
}
