//! Supported definition formats

use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::constants::{JSON_EXTENSIONS, TOML_EXTENSIONS, YAML_EXTENSIONS};

/// A definition source format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// `.yml` / `.yaml`
    Yaml,
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl SourceFormat {
    /// Delegation order of the multi-format loader
    pub const ALL: [SourceFormat; 3] = [SourceFormat::Yaml, SourceFormat::Json, SourceFormat::Toml];

    /// Lowercase format name
    pub fn name(&self) -> &'static str {
        match self {
            SourceFormat::Yaml => "yaml",
            SourceFormat::Json => "json",
            SourceFormat::Toml => "toml",
        }
    }

    /// File extensions of the format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            SourceFormat::Yaml => YAML_EXTENSIONS,
            SourceFormat::Json => JSON_EXTENSIONS,
            SourceFormat::Toml => TOML_EXTENSIONS,
        }
    }

    /// Whether `file` carries one of the format's extensions
    pub fn matches(&self, file: &str) -> bool {
        Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions()
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }

    /// Parse `content` into a generic document
    ///
    /// An empty document parses to `null`.
    pub fn parse(&self, content: &str) -> Result<Value, String> {
        if content.trim().is_empty() {
            return Ok(Value::Null);
        }
        match self {
            SourceFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            SourceFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            SourceFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
