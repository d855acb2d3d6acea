//! File logging for the terminal UI
//!
//! The terminal belongs to the UI, so events go to `perch.log` in the config
//! directory. The filter comes from `PERCH_LOG` when set, else from the
//! `[logging] level` config value.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::errors::{AppError, AppResult};

/// Environment variable overriding the configured log filter
pub const LOG_ENV: &str = "PERCH_LOG";

/// Log file name inside the log directory
pub const LOG_FILE: &str = "perch.log";

/// Install the global subscriber. Keep the returned guard alive until exit,
/// dropping it flushes buffered events.
pub fn init(log_dir: &Path, level: &str) -> AppResult<WorkerGuard> {
    fs::create_dir_all(log_dir)
        .map_err(|e| AppError::Logging(format!("cannot create {}: {}", log_dir.display(), e)))?;

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let env = std::env::var(LOG_ENV).ok();
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(build_filter(env.as_deref(), level));

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    Ok(guard)
}

/// Filter from the environment override, then the configured level, then "info"
fn build_filter(env: Option<&str>, level: &str) -> EnvFilter {
    env.filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_override_wins() {
        let filter = build_filter(Some("debug"), "warn");
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_configured_level_used_without_env() {
        assert_eq!(build_filter(None, "warn").to_string(), "warn");
        assert_eq!(build_filter(Some("  "), "perch=trace").to_string(), "perch=trace");
    }

    #[test]
    fn test_bad_directives_fall_back() {
        assert_eq!(build_filter(Some("perch=loud"), "warn").to_string(), "warn");
        assert_eq!(build_filter(None, "perch=loud").to_string(), "info");
    }
}
