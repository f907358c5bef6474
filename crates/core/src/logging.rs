//! Structured logging with JSON output.
//!
//! Logs go to one JSON file per run, named `rung-meter-<run_id>.json`, where
//! the run ID is a UUID v7. Since v7 IDs are time-ordered, sorting the file
//! names sorts the runs chronologically, which is what the retention cleanup
//! relies on.
//!
//! The configured level can be overridden with `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=rung_meter_core::meter=trace,info rung-meter --scenario swipe
//! ```
//!
//! ```no_run
//! use rung_meter_core::logging::{init_logging, shutdown_logging};
//! use rung_meter_core::settings::LoggingSettings;
//!
//! init_logging(&LoggingSettings::default())?;
//! tracing::info!("meter ready");
//! shutdown_logging();
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::settings::LoggingSettings;
use anyhow::{Context, Error};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const LOG_FILE_PREFIX: &str = "rung-meter-";
const LOG_FILE_SUFFIX: &str = "json";

static LOG_GUARD: OnceLock<Mutex<Option<WorkerGuard>>> = OnceLock::new();
static RUN_ID: OnceLock<String> = OnceLock::new();

/// Unique ID of this process run, generated on first access.
pub fn get_run_id() -> &'static str {
    RUN_ID.get_or_init(|| Uuid::now_v7().to_string()).as_str()
}

fn is_run_log(file_name: &str) -> bool {
    file_name.starts_with(LOG_FILE_PREFIX)
        && Path::new(file_name)
            .extension()
            .is_some_and(|ext| ext == LOG_FILE_SUFFIX)
}

/// Lists the run log files of `log_dir`, oldest first.
fn run_logs(log_dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut logs = Vec::new();
    for entry in fs::read_dir(log_dir)
        .with_context(|| format!("can't read log directory {}", log_dir.display()))?
    {
        let entry = entry.context("can't read log directory entry")?;
        if is_run_log(&entry.file_name().to_string_lossy()) {
            logs.push(entry.path());
        }
    }
    logs.sort();
    Ok(logs)
}

/// Deletes the oldest run logs so that at most `max_files` remain.
/// A limit of 0 keeps everything.
fn cleanup_run_logs(log_dir: &Path, max_files: usize) -> Result<(), Error> {
    if max_files == 0 {
        return Ok(());
    }

    let logs = run_logs(log_dir)?;
    let excess = logs.len().saturating_sub(max_files);
    for path in logs.into_iter().take(excess) {
        fs::remove_file(&path)
            .with_context(|| format!("can't remove old log file {}", path.display()))?;
    }

    Ok(())
}

/// `RUST_LOG` wins over the configured level; an empty level means `info`.
fn build_filter(settings: &LoggingSettings) -> Result<EnvFilter, Error> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level = settings.level.trim();
    let level = if level.is_empty() { "info" } else { level };

    EnvFilter::builder()
        .parse(level)
        .with_context(|| format!("invalid logging level {level:?}"))
}

/// Installs the global JSON file subscriber. Does nothing when logging is
/// disabled. Must be called at most once per process.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), Error> {
    if !settings.enabled {
        return Ok(());
    }

    let log_dir = std::env::current_dir()
        .context("can't get current working directory")?
        .join(&settings.directory);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("can't create log directory {}", log_dir.display()))?;

    cleanup_run_logs(&log_dir, settings.max_files)?;

    let appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::NEVER)
        .filename_prefix(format!("{}{}", LOG_FILE_PREFIX, get_run_id()))
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(&log_dir)
        .context("can't initialize log file appender")?;

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(Mutex::new(Some(guard)));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(writer)
        .with_current_span(true);

    tracing_subscriber::registry()
        .with(build_filter(settings)?)
        .with(fmt_layer)
        .try_init()
        .context("can't initialize tracing subscriber")?;

    tracing::info!(
        run_id = get_run_id(),
        version = env!("CARGO_PKG_VERSION"),
        "logging started"
    );

    Ok(())
}

/// Flushes buffered log lines. Call once before exiting.
pub fn shutdown_logging() {
    let Some(mutex) = LOG_GUARD.get() else {
        return;
    };
    if let Ok(mut guard) = mutex.lock() {
        drop(guard.take());
    }
}
