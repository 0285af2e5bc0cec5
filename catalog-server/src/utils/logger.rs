//! Logging Infrastructure
//!
//! Structured logging setup for development and production:
//! - console output, pretty or JSON
//! - optional daily rotating files under `{LOG_DIR}/app` (deleted after 14 days)
//!
//! `RUST_LOG` always takes precedence over the configured level.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Days a rotated application log is kept
const LOG_RETENTION_DAYS: i64 = 14;

const LOG_PREFIX: &str = "app";
const LOG_SUFFIX: &str = "log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Clean up application log files older than the retention window
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<()> {
    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(LOG_RETENTION_DAYS);

    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        // app.YYYY-MM-DD.log
        if let Some(date_part) = name
            .strip_prefix("app.")
            .and_then(|d| d.strip_suffix(".log"))
            && let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }

    Ok(())
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn console_layer(level: &str, json_format: bool) -> BoxedLayer {
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter(level))
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter(level))
            .boxed()
    }
}

fn file_layer(level: &str, json_format: bool, log_dir: &Path) -> anyhow::Result<BoxedLayer> {
    let app_log_dir = log_dir.join("app");
    fs::create_dir_all(&app_log_dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix(LOG_SUFFIX)
        .build(&app_log_dir)?;

    let layer = if json_format {
        fmt::layer()
            .json()
            .with_writer(appender)
            .with_ansi(false)
            .with_target(true)
            .with_filter(env_filter(level))
            .boxed()
    } else {
        fmt::layer()
            .with_writer(appender)
            .with_ansi(false)
            .with_target(true)
            .with_filter(env_filter(level))
            .boxed()
    };
    Ok(layer)
}

/// Initialize the logging system, optionally with daily rotating files
///
/// # Arguments
/// * `level` - default filter when `RUST_LOG` is unset
/// * `json_format` - JSON lines instead of the human-readable format
/// * `log_dir` - directory for rotated files, `None` for console only
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let mut layers = vec![console_layer(level, json_format)];

    let log_dir = log_dir.map(PathBuf::from);
    if let Some(dir) = &log_dir {
        layers.push(file_layer(level, json_format, dir)?);
    }

    tracing_subscriber::registry().with(layers).try_init()?;

    if let Some(dir) = log_dir {
        tokio::spawn(periodic_cleanup(dir));
    }

    Ok(())
}

/// Console-only logging
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Periodic cleanup task - runs every hour to clean old logs
async fn periodic_cleanup(log_dir: PathBuf) {
    let mut interval = tokio::time::interval(Duration::from_secs(3600));
    loop {
        interval.tick().await;
        if let Err(e) = cleanup_old_logs(&log_dir) {
            tracing::error!(error = %e, "Failed to cleanup old logs");
        }
    }
}
