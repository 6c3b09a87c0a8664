//! Service Class Registry
//!
//! Compiled containers name the class of every service; the runtime
//! container instantiates them through the factories registered here.

use std::any::Any;
use std::sync::Arc;

use crate::runtime::ServiceArgument;

/// Registry entry for instantiable service classes
pub struct ServiceClassEntry {
    /// Class name as written in definition sources
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function receiving the fully resolved constructor arguments
    pub factory: fn(&[ServiceArgument]) -> Result<Arc<dyn Any + Send + Sync>, String>,
}

// Auto-collection via linkme distributed slices
#[linkme::distributed_slice]
pub static SERVICE_CLASSES: [ServiceClassEntry] = [..];

/// Entry registered under `name`
pub fn resolve_service_class(name: &str) -> Option<&'static ServiceClassEntry> {
    SERVICE_CLASSES.iter().find(|entry| entry.name == name)
}

/// Whether a class named `name` is registered
pub fn has_service_class(name: &str) -> bool {
    resolve_service_class(name).is_some()
}

/// List all registered service classes as (name, description)
pub fn list_service_classes() -> Vec<(&'static str, &'static str)> {
    SERVICE_CLASSES
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
