//! Tracing subscriber setup.

use crate::error::{AppError, AppResult};
use opsdash_config::LoggingConfig;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter for the run. `RUST_LOG` wins over `level` unless the level was
/// given explicitly on the command line.
#[must_use]
pub fn build_filter(level: &str, prefer_env: bool) -> EnvFilter {
    if prefer_env {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return filter;
        }
    }
    EnvFilter::new(level)
}

/// Installs the global subscriber: a stderr layer (plain or JSON) and, when
/// `logging.file` is set, a non-blocking file layer.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the program.
///
/// # Errors
///
/// Fails if the log directory cannot be created or a subscriber is already
/// installed.
pub fn init_logging(config: &LoggingConfig, level_from_cli: bool) -> AppResult<Option<WorkerGuard>> {
    let filter = build_filter(&config.level, !level_from_cli);

    let (file_layer, guard) = match &config.file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            std::fs::create_dir_all(dir)?;
            let file_name = path
                .file_name()
                .ok_or_else(|| AppError::Logging(format!("{} is not a file path", path.display())))?;
            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    let json_layer = config
        .json
        .then(|| fmt::layer().json().with_writer(std::io::stderr));
    let plain_layer = (!config.json).then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(plain_layer)
        .with(json_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    Ok(guard)
}
