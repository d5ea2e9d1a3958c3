use std::fs;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::shell::config::LogSettings;

pub const DEFAULT_FILTER: &str = "hotspot_questions=info,tower_http=info";
const LOG_FILE_PREFIX: &str = "hotspot";
const LOG_FILE_SUFFIX: &str = "log";
const MAX_LOG_FILES: usize = 14;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("cannot create log directory {path}: {source}")]
    LogDir {
        path: String,
        source: std::io::Error,
    },

    #[error("rolling file appender error: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),

    #[error("tracing subscriber error: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Keeps the file writer alive. Dropping it flushes pending lines.
#[must_use = "dropping the guard stops file logging"]
pub struct TelemetryGuard {
    _file: Option<WorkerGuard>,
}

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber: console always, daily rolling files when a
/// log directory is configured. `RUST_LOG` overrides the default filter.
pub fn init(settings: &LogSettings) -> Result<TelemetryGuard, TelemetryError> {
    let mut layers = Vec::new();

    if settings.json {
        layers.push(layer().json().with_target(true).boxed());
    } else {
        layers.push(layer().compact().with_target(false).boxed());
    }

    let guard = if let Some(dir) = &settings.dir {
        fs::create_dir_all(dir).map_err(|source| TelemetryError::LogDir {
            path: dir.display().to_string(),
            source,
        })?;
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(LOG_FILE_PREFIX)
            .filename_suffix(LOG_FILE_SUFFIX)
            .max_log_files(MAX_LOG_FILES)
            .build(dir)?;
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let file_layer = layer().with_writer(writer).with_ansi(false);
        layers.push(if settings.json {
            file_layer.json().boxed()
        } else {
            file_layer.boxed()
        });
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter())
        .with(layers)
        .try_init()?;

    Ok(TelemetryGuard { _file: guard })
}
