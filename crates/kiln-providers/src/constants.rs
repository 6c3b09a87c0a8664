//! Provider Constants
//!
//! Constants specific to the loader and dumper implementations. Names shared
//! with the pipeline (parameters, artifact naming) live in `kiln_domain::constants`.

// ============================================================================
// SOURCE FORMATS
// ============================================================================

/// Extensions handled by the YAML loader
pub const YAML_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Extensions handled by the JSON loader
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// Extensions handled by the TOML loader
pub const TOML_EXTENSIONS: &[&str] = &["toml"];

/// Prefix marking an alias in the service shorthand (`alias: '@target'`)
pub const ALIAS_PREFIX: char = '@';

// ============================================================================
// DUMPER FILE NAMING
// ============================================================================

/// Prefix of per-service factory files (`get<Id>Service.json`)
pub const FACTORY_FILE_PREFIX: &str = "get";

/// Suffix of per-service factory files
pub const FACTORY_FILE_SUFFIX: &str = "Service";

/// Suffix of lazy-service proxy files (`<Id>Proxy.json`)
pub const PROXY_FILE_SUFFIX: &str = "Proxy";
