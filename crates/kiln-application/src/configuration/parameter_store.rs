//! Parameter store
//!
//! Mutable parameters that reach the registry through a compiler pass. The
//! store is shared between the builder (which keeps setting values) and the
//! configuration's pass list, so it uses interior mutability: values set
//! after the pass was registered are still the ones merged at compile time.

use std::sync::{PoisonError, RwLock};

use indexmap::IndexMap;
use kiln_domain::entities::ServiceRegistry;
use kiln_domain::error::Result;
use kiln_domain::ports::CompilerPass;
use serde_json::Value;
use tracing::debug;

/// Ordered name to value parameters, merged into the registry when processed
#[derive(Debug, Default)]
pub struct ParameterStore {
    parameters: RwLock<IndexMap<String, Value>>,
}

impl ParameterStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `parameters`
    pub fn from_map(parameters: IndexMap<String, Value>) -> Self {
        Self {
            parameters: RwLock::new(parameters),
        }
    }

    /// Insert or overwrite `name`
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.parameters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), value.into());
    }

    /// Stored value of `name`, or `default` when it is missing or null
    pub fn get(&self, name: &str, default: Value) -> Value {
        match self
            .parameters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            Some(Value::Null) | None => default,
            Some(value) => value.clone(),
        }
    }

    /// Snapshot of every parameter in insertion order
    pub fn all(&self) -> IndexMap<String, Value> {
        self.parameters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CompilerPass for ParameterStore {
    fn name(&self) -> &str {
        "parameter_store"
    }

    fn process(&self, registry: &mut ServiceRegistry) -> Result<()> {
        let parameters = self.all();
        debug!(count = parameters.len(), "Merging stored parameters");
        registry.parameter_bag_mut().add(parameters);
        Ok(())
    }
}
