//! Build coordinator
//!
//! `CHECK_FRESHNESS → (fresh: done)` or
//! `STALE → INITIALIZE → APPLY_PASSES → COMPILE → SERIALIZE → PERSIST_METADATA`.
//!
//! Nothing is recovered locally: the first failing stage aborts the build and
//! its error reaches the caller unchanged. The gate is only written after every
//! sibling file made it to disk, so an interrupted build is never reported fresh.

use std::sync::Arc;

use indexmap::IndexMap;
use kiln_domain::constants::PARAM_DEV_MODE;
use kiln_domain::entities::ServiceRegistry;
use kiln_domain::error::{Error, Result};
use kiln_domain::ports::{ContainerDumper, FreshnessGate};
use kiln_domain::value_objects::{DumpOptions, PassTarget};
use serde_json::Value;
use tracing::{debug, info};

use crate::configuration::BuildConfiguration;
use crate::ports::ContainerInitializer;
use crate::ports::registry::resolve_compiler_pass;

/// Drives one build from freshness check to persisted artifact
#[derive(Clone)]
pub struct Compiler {
    dumper: Arc<dyn ContainerDumper>,
}

impl Compiler {
    /// Create a compiler serializing through `dumper`
    pub fn new(dumper: Arc<dyn ContainerDumper>) -> Self {
        Self { dumper }
    }

    /// Build the artifact behind `gate` unless it is already fresh
    ///
    /// # Errors
    ///
    /// Whatever the failing stage reports: configuration errors from package
    /// or delayed pass instantiation, source errors from loading, compilation
    /// errors from the registry and I/O or cache errors from persisting.
    pub fn compile(
        &self,
        config: &BuildConfiguration,
        gate: &dyn FreshnessGate,
        initializer: &dyn ContainerInitializer,
    ) -> Result<()> {
        if gate.is_fresh() {
            debug!(artifact = %gate.path().display(), "Container artifact is fresh");
            return Ok(());
        }

        let mut registry = initializer.initialize_container(config)?;
        self.configure_pass_list(&mut registry, config)?;
        self.update_dump(&mut registry, config, gate)
    }

    fn configure_pass_list(
        &self,
        registry: &mut ServiceRegistry,
        config: &BuildConfiguration,
    ) -> Result<()> {
        for entry in config.pass_list()? {
            let pass = match entry.target {
                PassTarget::Instance(pass) => pass,
                PassTarget::Delayed(delayed) => {
                    resolve_compiler_pass(&delayed.kind, &delayed.arguments)?
                }
            };
            debug!(
                pass = pass.name(),
                stage = %entry.stage,
                priority = entry.priority,
                "Registering compiler pass"
            );
            registry.add_compiler_pass(pass, entry.stage, entry.priority);
        }
        Ok(())
    }

    fn update_dump(
        &self,
        registry: &mut ServiceRegistry,
        config: &BuildConfiguration,
        gate: &dyn FreshnessGate,
    ) -> Result<()> {
        registry.compile()?;

        let content = self.container_content(registry, config, gate)?;
        self.write_to_files(content, gate, registry)
    }

    fn container_content(
        &self,
        registry: &ServiceRegistry,
        config: &BuildConfiguration,
        gate: &dyn FreshnessGate,
    ) -> Result<IndexMap<String, String>> {
        let mut options: DumpOptions = config.dump_options();
        options.file = gate.path().to_path_buf();
        options.debug = dev_mode(registry)?;
        options.as_files = true;

        self.dumper.dump(registry, &options)
    }

    fn write_to_files(
        &self,
        mut content: IndexMap<String, String>,
        gate: &dyn FreshnessGate,
        registry: &ServiceRegistry,
    ) -> Result<()> {
        let (_, root) = content
            .pop()
            .ok_or_else(|| Error::internal("The dumper produced no root artifact"))?;
        for (file, code) in &content {
            gate.write_sibling(file, code)?;
        }

        gate.write(&root, registry.resources())?;
        info!(
            artifact = %gate.path().display(),
            files = content.len(),
            resources = registry.resources().len(),
            "Container artifact rebuilt"
        );
        Ok(())
    }
}

fn dev_mode(registry: &ServiceRegistry) -> Result<bool> {
    match registry.parameter_bag().get(PARAM_DEV_MODE) {
        None => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(other) => Err(Error::configuration(format!(
            "Parameter \"{PARAM_DEV_MODE}\" must be a boolean, got {other}"
        ))),
    }
}
