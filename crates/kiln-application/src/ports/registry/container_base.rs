//! Container Base Registry
//!
//! The base type a loaded container is "an instance of". Builds may override
//! the default base; the override must be registered here or loading fails.

use downcast_rs::{DowncastSync, impl_downcast};
use kiln_domain::error::{Error, Result};

/// Base type behaviour shared by loaded containers
pub trait ContainerBase: DowncastSync {
    /// Registered name of the base type
    fn name(&self) -> &str;
}
impl_downcast!(sync ContainerBase);

/// Registry entry for container base types
pub struct ContainerBaseEntry {
    /// Base type name as given to `set_base_class`
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function creating the base instance
    pub factory: fn() -> Box<dyn ContainerBase>,
}

// Auto-collection via linkme distributed slices
#[linkme::distributed_slice]
pub static CONTAINER_BASES: [ContainerBaseEntry] = [..];

/// Instantiate the base type registered as `name`
///
/// # Errors
///
/// A configuration error naming the available bases when `name` is unknown.
pub fn resolve_container_base(name: &str) -> Result<Box<dyn ContainerBase>> {
    for entry in CONTAINER_BASES {
        if entry.name == name {
            return Ok((entry.factory)());
        }
    }

    let available: Vec<&str> = CONTAINER_BASES.iter().map(|e| e.name).collect();

    Err(Error::configuration(format!(
        "Unknown container base class '{}'. Available base classes: {:?}",
        name, available
    )))
}

/// Whether a base type named `name` is registered
pub fn has_container_base(name: &str) -> bool {
    CONTAINER_BASES.iter().any(|entry| entry.name == name)
}

/// List all registered base types as (name, description)
pub fn list_container_bases() -> Vec<(&'static str, &'static str)> {
    CONTAINER_BASES
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
