//! Infrastructure layer constants
//!
//! Domain-specific constants are defined in `kiln_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default settings file name
pub const DEFAULT_CONFIG_FILENAME: &str = "kiln.toml";

/// Default settings directory name under the platform config dir
pub const DEFAULT_CONFIG_DIR: &str = "kiln";

/// Environment variable prefix for settings
pub const CONFIG_ENV_PREFIX: &str = "KILN";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Namespace used when settings do not name one
pub const DEFAULT_NAMESPACE: &str = "App";

/// Source format used when settings do not name one
pub const DEFAULT_FORMAT: &str = "delegating";

/// Format names the settings accept
pub const SUPPORTED_FORMATS: &[&str] = &["yaml", "yml", "json", "toml", "delegating"];

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable overriding the log filter
pub const LOG_ENV_FILTER: &str = "KILN_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File name stem used when the log file path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "kiln";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Version of the metadata sidecar layout
pub const META_FORMAT_VERSION: u32 = 1;
