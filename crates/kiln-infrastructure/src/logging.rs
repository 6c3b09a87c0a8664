//! Structured logging with tracing
//!
//! One `tracing-subscriber` registry carrying an `EnvFilter` (overridable
//! through `KILN_LOG`), a stdout layer and, when `file_output` is set, a
//! daily-rolling file layer. Both outputs share the plain or JSON format.

use std::ffi::OsStr;
use std::path::Path;
use std::str::FromStr;

use kiln_domain::error::{Error, Result};
use tracing::{Level, debug, info, warn};
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

pub use crate::config::LoggingConfig;
use crate::constants::{DEFAULT_LOG_FILE_STEM, LOG_ENV_FILTER};
use crate::error_ext::ErrorContext;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber described by `config`
///
/// # Errors
///
/// A configuration error when the level is invalid or a global subscriber
/// is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV_FILTER).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let mut layers = vec![stdout_layer(config.json_format)];
    if let Some(path) = &config.file_output {
        layers.push(file_layer(rolling_appender(path), config.json_format));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .config_context("Failed to install the tracing subscriber")?;

    info!(
        %level,
        json = config.json_format,
        file = ?config.file_output,
        "Logging initialized"
    );
    Ok(())
}

fn stdout_layer(json: bool) -> BoxedLayer {
    if json {
        fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer().with_target(true).boxed()
    }
}

fn file_layer(appender: RollingFileAppender, json: bool) -> BoxedLayer {
    let layer = fmt::layer().with_writer(appender).with_ansi(false);
    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

fn rolling_appender(path: &Path) -> RollingFileAppender {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let stem = path
        .file_stem()
        .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE_STEM));
    tracing_appender::rolling::daily(dir, stem)
}

/// Level named by `level`, case-insensitive; `warning` is accepted for `warn`
///
/// # Errors
///
/// A configuration error naming the rejected value.
pub fn parse_log_level(level: &str) -> Result<Level> {
    let normalized = level.trim().to_lowercase();
    let name = if normalized == "warning" { "warn" } else { normalized.as_str() };
    if name.chars().all(|c| c.is_ascii_alphabetic())
        && let Ok(parsed) = Level::from_str(name)
    {
        return Ok(parsed);
    }
    Err(Error::configuration(format!(
        "Invalid log level: {level}. Use trace, debug, info, warn, or error"
    )))
}

/// Report where the settings came from
///
/// An explicit settings file that does not exist is not an error, the
/// defaults and environment still apply, but it is worth a warning.
pub fn log_config_loaded(config_path: &Path, found: bool) {
    if found {
        debug!(path = %config_path.display(), "Settings file merged");
    } else {
        warn!(path = %config_path.display(), "Settings file not found, using defaults and environment");
    }
}
