//! Development-mode registry dump
//!
//! Writes the compiled definitions, aliases and parameters as YAML through
//! its own freshness gate, next to the real artifact, for inspection.

use std::sync::Arc;

use indexmap::IndexMap;
use kiln_domain::constants::PARAM_DEV_MODE;
use kiln_domain::entities::ServiceRegistry;
use kiln_domain::error::{Error, Result};
use kiln_domain::ports::{CompilerPass, FreshnessGate};
use kiln_domain::value_objects::{Alias, ServiceDefinition};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

#[derive(Serialize)]
struct DefinitionsDump<'a> {
    parameters: &'a IndexMap<String, Value>,
    services: &'a IndexMap<String, ServiceDefinition>,
    aliases: &'a IndexMap<String, Alias>,
}

/// Dumps the registry as YAML when `app.devmode` is on
pub struct DumpDefinitions {
    gate: Arc<dyn FreshnessGate>,
}

impl DumpDefinitions {
    /// Dump through `gate`
    pub fn new(gate: Arc<dyn FreshnessGate>) -> Self {
        Self { gate }
    }
}

impl CompilerPass for DumpDefinitions {
    fn name(&self) -> &str {
        "dump_definitions"
    }

    fn process(&self, registry: &mut ServiceRegistry) -> Result<()> {
        let dev_mode = registry
            .parameter_bag()
            .get(PARAM_DEV_MODE)
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if !dev_mode || self.gate.is_fresh() {
            return Ok(());
        }

        let dump = DefinitionsDump {
            parameters: registry.parameter_bag().all(),
            services: registry.definitions(),
            aliases: registry.aliases(),
        };
        let yaml = serde_yaml::to_string(&dump)
            .map_err(|e| Error::internal(format!("Cannot serialize registry as YAML: {e}")))?;

        self.gate.write(&yaml, registry.resources())?;
        debug!(dump = %self.gate.path().display(), "Registry definitions dumped");
        Ok(())
    }
}
