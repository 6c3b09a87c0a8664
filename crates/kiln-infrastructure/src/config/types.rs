//! Settings types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FORMAT, DEFAULT_LOG_LEVEL, DEFAULT_NAMESPACE};

/// Root settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KilnSettings {
    /// Container build
    pub build: BuildSettings,
    /// Logging
    pub logging: LoggingConfig,
}

/// What to build and where the artifacts go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Namespace of the generated container
    pub namespace: String,
    /// Directory artifacts are dumped into
    pub dump_dir: PathBuf,
    /// Development mode: resource checks and per-service files
    pub dev_mode: bool,
    /// Source format (`yaml`, `json`, `toml` or `delegating`)
    pub format: String,
    /// Definition files, in load order
    pub files: Vec<String>,
    /// Search paths for relative files
    pub paths: Vec<String>,
    /// Base type override of the generated container
    pub base_class: Option<String>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            dump_dir: std::env::temp_dir(),
            dev_mode: false,
            format: DEFAULT_FORMAT.to_string(),
            files: Vec::new(),
            paths: Vec::new(),
            base_class: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable JSON output format
    pub json_format: bool,
    /// Log to a daily-rolling file in addition to stdout
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}
