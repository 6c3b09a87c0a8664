//! Service registry - the building form of a container
//!
//! Holds definitions, aliases, parameters, tracked resources and compiler
//! passes. `compile()` runs every registered pass in stage then priority
//! order and freezes the registry; the dumper then serializes it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use super::builtin_passes::{
    CheckCircularReferencesPass, CheckReferencesPass, RemoveUnusedPrivateServicesPass,
    ResolveParameterPlaceholdersPass,
};
use super::parameter_bag::ParameterBag;
use crate::constants::DEFAULT_PRIORITY;
use crate::error::{Error, Result};
use crate::ports::CompilerPass;
use crate::value_objects::{Alias, FileResource, PassStage, ServiceDefinition};

/// A pass registered with its stage, priority and registration sequence
#[derive(Clone)]
struct RegisteredPass {
    stage: PassStage,
    priority: i32,
    sequence: usize,
    pass: Arc<dyn CompilerPass>,
}

/// Building form of a dependency-injection container
#[derive(Clone)]
pub struct ServiceRegistry {
    definitions: IndexMap<String, ServiceDefinition>,
    aliases: IndexMap<String, Alias>,
    parameters: ParameterBag,
    resources: Vec<FileResource>,
    passes: Vec<RegisteredPass>,
    compiled: bool,
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("definitions", &self.definitions.keys().collect::<Vec<_>>())
            .field("aliases", &self.aliases)
            .field("parameters", &self.parameters)
            .field("resources", &self.resources)
            .field("passes", &self.passes.len())
            .field("compiled", &self.compiled)
            .finish()
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceRegistry {
    /// Create a registry with the built-in resolution, validation and removal passes
    pub fn new() -> Self {
        let mut registry = Self {
            definitions: IndexMap::new(),
            aliases: IndexMap::new(),
            parameters: ParameterBag::new(),
            resources: Vec::new(),
            passes: Vec::new(),
            compiled: false,
        };

        registry.add_compiler_pass(
            Arc::new(ResolveParameterPlaceholdersPass),
            PassStage::Optimize,
            100,
        );
        registry.add_compiler_pass(
            Arc::new(CheckReferencesPass),
            PassStage::Optimize,
            DEFAULT_PRIORITY,
        );
        registry.add_compiler_pass(
            Arc::new(CheckCircularReferencesPass),
            PassStage::Optimize,
            -100,
        );
        registry.add_compiler_pass(
            Arc::new(RemoveUnusedPrivateServicesPass),
            PassStage::Removing,
            DEFAULT_PRIORITY,
        );

        registry
    }

    // ========================================================================
    // Definitions
    // ========================================================================

    /// Insert or replace the definition of `id`
    pub fn set_definition(&mut self, id: impl Into<String>, definition: ServiceDefinition) {
        let id = id.into();
        self.aliases.shift_remove(&id);
        self.definitions.insert(id, definition);
    }

    /// Definition of `id`
    pub fn definition(&self, id: &str) -> Option<&ServiceDefinition> {
        self.definitions.get(id)
    }

    /// Mutable definition of `id`
    pub fn definition_mut(&mut self, id: &str) -> Option<&mut ServiceDefinition> {
        self.definitions.get_mut(id)
    }

    /// Whether `id` is a definition (aliases excluded)
    pub fn has_definition(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    /// Remove the definition of `id`
    pub fn remove_definition(&mut self, id: &str) -> Option<ServiceDefinition> {
        self.definitions.shift_remove(id)
    }

    /// Every definition in registration order
    pub fn definitions(&self) -> &IndexMap<String, ServiceDefinition> {
        &self.definitions
    }

    /// Every definition, mutably
    pub fn definitions_mut(&mut self) -> impl Iterator<Item = (&String, &mut ServiceDefinition)> {
        self.definitions.iter_mut()
    }

    /// Ids of definitions carrying `tag`
    pub fn find_tagged_service_ids(&self, tag: &str) -> Vec<String> {
        self.definitions
            .iter()
            .filter(|(_, definition)| definition.has_tag(tag))
            .map(|(id, _)| id.clone())
            .collect()
    }

    // ========================================================================
    // Aliases
    // ========================================================================

    /// Insert or replace alias `id`
    pub fn set_alias(&mut self, id: impl Into<String>, alias: Alias) {
        let id = id.into();
        self.definitions.shift_remove(&id);
        self.aliases.insert(id, alias);
    }

    /// Alias `id`
    pub fn alias(&self, id: &str) -> Option<&Alias> {
        self.aliases.get(id)
    }

    /// Every alias in registration order
    pub fn aliases(&self) -> &IndexMap<String, Alias> {
        &self.aliases
    }

    /// Every alias, mutably
    pub fn aliases_mut(&mut self) -> impl Iterator<Item = (&String, &mut Alias)> {
        self.aliases.iter_mut()
    }

    /// Remove alias `id`
    pub fn remove_alias(&mut self, id: &str) -> Option<Alias> {
        self.aliases.shift_remove(id)
    }

    /// Whether `id` names a definition or an alias
    pub fn has(&self, id: &str) -> bool {
        self.definitions.contains_key(id) || self.aliases.contains_key(id)
    }

    /// Definition id `id` ultimately points at, following alias chains
    pub fn resolve_id<'a>(&'a self, id: &'a str) -> Option<&'a str> {
        let mut current = id;
        for _ in 0..=self.aliases.len() {
            if self.definitions.contains_key(current) {
                return Some(current);
            }
            current = self.aliases.get(current)?.target.as_str();
        }
        None
    }

    // ========================================================================
    // Parameters
    // ========================================================================

    /// Value of parameter `name`
    pub fn parameter(&self, name: &str) -> Result<&Value> {
        self.parameters.get(name).ok_or_else(|| {
            Error::not_found(format!("parameter \"{name}\""))
        })
    }

    /// Whether parameter `name` is defined
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.has(name)
    }

    /// Insert or overwrite parameter `name`
    pub fn set_parameter(&mut self, name: impl Into<String>, value: Value) {
        self.parameters.set(name, value);
    }

    /// The parameter bag
    pub fn parameter_bag(&self) -> &ParameterBag {
        &self.parameters
    }

    /// The parameter bag, mutably
    pub fn parameter_bag_mut(&mut self) -> &mut ParameterBag {
        &mut self.parameters
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// Track `resource` as a build dependency
    ///
    /// A path already tracked keeps the fingerprint of its first read.
    pub fn add_resource(&mut self, resource: FileResource) {
        if !self.is_tracked(resource.path()) {
            self.resources.push(resource);
        }
    }

    /// Whether `path` is already a tracked dependency
    pub fn is_tracked(&self, path: &Path) -> bool {
        self.resources.iter().any(|resource| resource.path() == path)
    }

    /// Tracked dependencies in the order they were first read
    pub fn resources(&self) -> &[FileResource] {
        &self.resources
    }

    // ========================================================================
    // Compilation
    // ========================================================================

    /// Register `pass` under `stage` with `priority`
    pub fn add_compiler_pass(&mut self, pass: Arc<dyn CompilerPass>, stage: PassStage, priority: i32) {
        let sequence = self.passes.len();
        self.passes.push(RegisteredPass {
            stage,
            priority,
            sequence,
            pass,
        });
    }

    /// Registered passes in execution order: stage, then priority (higher
    /// first), then registration order
    pub fn compiler_passes(&self) -> Vec<(PassStage, i32, Arc<dyn CompilerPass>)> {
        self.ordered_passes()
            .into_iter()
            .map(|registered| (registered.stage, registered.priority, registered.pass))
            .collect()
    }

    fn ordered_passes(&self) -> Vec<RegisteredPass> {
        let mut passes = self.passes.clone();
        passes.sort_by(|a, b| {
            a.stage
                .cmp(&b.stage)
                .then(b.priority.cmp(&a.priority))
                .then(a.sequence.cmp(&b.sequence))
        });
        passes
    }

    /// Run every pass and freeze the registry
    ///
    /// Fails on the first pass error: unknown references, circular
    /// dependencies between non-lazy services and missing parameters are all
    /// reported here.
    pub fn compile(&mut self) -> Result<()> {
        if self.compiled {
            return Err(Error::compilation("The registry has already been compiled"));
        }

        for registered in self.ordered_passes() {
            debug!(
                pass = registered.pass.name(),
                stage = %registered.stage,
                priority = registered.priority,
                "Running compiler pass"
            );
            registered.pass.process(self)?;
        }

        self.compiled = true;
        debug!(
            services = self.definitions.len(),
            aliases = self.aliases.len(),
            parameters = self.parameters.len(),
            "Registry compiled"
        );
        Ok(())
    }

    /// Whether `compile()` already succeeded
    pub fn is_compiled(&self) -> bool {
        self.compiled
    }
}
