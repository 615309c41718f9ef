//! Logging configuration using tracing.
//!
//! The terminal belongs to the UI, so logs go to a daily rolling file under
//! `.ghostwriter/logs/`. The level is controlled by `GHOSTWRITER_LOG`.
//!
//! ```bash
//! GHOSTWRITER_LOG=debug ghostwriter
//! GHOSTWRITER_LOG=ghostwriter::service=trace ghostwriter
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::fs::GhostwriterPaths;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "GHOSTWRITER_LOG";

/// Filter used when `GHOSTWRITER_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "ghostwriter=info,warn";

const LOG_FILE_PREFIX: &str = "ghostwriter.log";

/// Initializes the global subscriber and returns the log directory.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init(paths: &GhostwriterPaths) -> Result<PathBuf> {
    let log_dir = paths.logs_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ghostwriter starting");
    tracing::info!("Log directory: {}", log_dir.display());

    Ok(log_dir)
}
