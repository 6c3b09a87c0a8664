//! Definition document schema
//!
//! Every format parses into the same shape:
//!
//! ```yaml
//! imports:
//!   - { resource: base.yml }
//! parameters:
//!   mailer.host: localhost
//! services:
//!   mailer:
//!     class: Mailer
//!     arguments: ['%mailer.host%', '@transport']
//!     public: true
//!   transport: ~            # class defaults to the id
//!   mail: '@mailer'         # private alias shorthand
//!   mailer.public: { alias: mailer, public: true }
//! ```
//!
//! Unknown keys are rejected so typos surface as source errors.

use std::path::Path;

use indexmap::IndexMap;
use kiln_domain::entities::ServiceRegistry;
use kiln_domain::error::{Error, Result};
use kiln_domain::value_objects::{Alias, Argument, ServiceDefinition};
use serde::Deserialize;
use serde_json::Value;

use crate::constants::ALIAS_PREFIX;

/// Top level of a definition file
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceDocument {
    /// Files loaded before this one
    pub imports: Vec<ImportEntry>,
    /// Parameters, later files override earlier ones
    pub parameters: IndexMap<String, Value>,
    /// Raw service entries, interpreted by [`SourceDocument::apply`]
    pub services: IndexMap<String, Value>,
}

/// One `imports` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportEntry {
    /// File to import, relative to the importing file or a search path
    pub resource: String,
    /// Skip the import when the file is missing or fails to load
    #[serde(default)]
    pub ignore_errors: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServiceSpec {
    #[serde(default)]
    class: Option<String>,
    #[serde(default)]
    arguments: Vec<Value>,
    #[serde(default)]
    public: bool,
    #[serde(default)]
    lazy: bool,
    #[serde(default = "default_shared")]
    shared: bool,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AliasSpec {
    alias: String,
    #[serde(default)]
    public: bool,
}

fn default_shared() -> bool {
    true
}

impl SourceDocument {
    /// Interpret a parsed document; `null` is an empty document
    pub fn from_value(file: &Path, value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|e| Error::source(file, e.to_string()))
    }

    /// Add this document's parameters, services and aliases to `registry`
    pub fn apply(self, file: &Path, registry: &mut ServiceRegistry) -> Result<()> {
        for (name, value) in self.parameters {
            registry.set_parameter(name, value);
        }

        for (id, raw) in self.services {
            match raw {
                Value::String(target) => {
                    let Some(target) = target.strip_prefix(ALIAS_PREFIX) else {
                        return Err(Error::source(
                            file,
                            format!(
                                "Service \"{id}\" must be a mapping or an alias written as '@target', got \"{target}\""
                            ),
                        ));
                    };
                    registry.set_alias(id, Alias::new(target, false));
                }
                Value::Null => {
                    let definition = ServiceDefinition::new(id.clone());
                    registry.set_definition(id, definition);
                }
                Value::Object(map) if map.contains_key("alias") => {
                    let spec: AliasSpec = serde_json::from_value(Value::Object(map)).map_err(|e| {
                        Error::source(file, format!("Invalid alias \"{id}\": {e}"))
                    })?;
                    registry.set_alias(id, Alias::new(spec.alias, spec.public));
                }
                Value::Object(map) => {
                    let spec: ServiceSpec = serde_json::from_value(Value::Object(map)).map_err(|e| {
                        Error::source(file, format!("Invalid service \"{id}\": {e}"))
                    })?;
                    let definition = ServiceDefinition {
                        class: spec.class.unwrap_or_else(|| id.clone()),
                        arguments: spec.arguments.into_iter().map(Argument::from_raw).collect(),
                        public: spec.public,
                        lazy: spec.lazy,
                        shared: spec.shared,
                        tags: spec.tags,
                    };
                    registry.set_definition(id, definition);
                }
                other => {
                    return Err(Error::source(
                        file,
                        format!("Service \"{id}\" must be a mapping, got {other}"),
                    ));
                }
            }
        }
        Ok(())
    }
}
