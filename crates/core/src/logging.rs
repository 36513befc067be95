use crate::error::{DieIndexError, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Directory the rolling log files are written to.
pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".dieindex/logs")
}

/// Daily-rolling appender in `dir`, with the component name as the prefix:
/// cli.2026-10-16.log
pub fn file_appender(dir: &Path, component: &str) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(dir)?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(component)
        .filename_suffix("log")
        .build(dir)
        .map_err(|e| DieIndexError::Internal(e.to_string()))
}

pub fn init_logging(component: &str, to_stderr: bool) -> Option<WorkerGuard> {
    init_logging_in(&log_dir(), component, to_stderr)
}

/// Install the global subscriber, logging to files under `dir`.
///
/// When `dir` cannot be used, logs go to stderr only and no guard is returned.
pub fn init_logging_in(dir: &Path, component: &str, to_stderr: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let appender = match file_appender(dir, component) {
        Ok(appender) => appender,
        Err(err) => {
            let stderr_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            tracing::warn!(dir = %dir.display(), error = %err, "file logging disabled");
            return None;
        }
    };
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if to_stderr {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false);
        registry.with(stderr_layer).init();
    } else {
        registry.init();
    }

    Some(guard)
}
