//! Process-wide logging setup for hosts embedding the dashboard core.

/// Install logging with defaults plus any `DESKERP_LOG_FORMAT` override.
///
/// Safe to call more than once; only the first call takes effect.
pub fn init() {
    tracing::init(&tracing::LogConfig::from_env());
}

pub mod tracing;

pub use self::tracing::{LogConfig, LogFormat};
