//! Package Registry
//!
//! Packages are declared on a build configuration as (kind, arguments) and
//! resolved through this registry the first time the configuration's
//! packages are requested.

use std::sync::Arc;

use kiln_domain::error::{Error, Result};
use kiln_domain::ports::Package;
use serde_json::Value;

/// Registry entry for packages
pub struct PackageEntry {
    /// Unique package kind
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function receiving the declared constructor arguments verbatim
    pub factory: fn(&[Value]) -> std::result::Result<Arc<dyn Package>, String>,
}

// Auto-collection via linkme distributed slices
#[linkme::distributed_slice]
pub static PACKAGES: [PackageEntry] = [..];

/// Construct a package of `kind` with `arguments`
///
/// # Errors
///
/// A configuration error when the kind is unknown or the factory rejects the
/// arguments (wrong arity, wrong types).
pub fn resolve_package(kind: &str, arguments: &[Value]) -> Result<Arc<dyn Package>> {
    for entry in PACKAGES {
        if entry.name == kind {
            return (entry.factory)(arguments).map_err(|e| {
                Error::configuration(format!("Cannot construct package '{kind}': {e}"))
            });
        }
    }

    let available: Vec<&str> = PACKAGES.iter().map(|e| e.name).collect();

    Err(Error::configuration(format!(
        "Unknown package '{}'. Available packages: {:?}",
        kind, available
    )))
}

/// List all registered packages as (name, description)
pub fn list_packages() -> Vec<(&'static str, &'static str)> {
    PACKAGES.iter().map(|e| (e.name, e.description)).collect()
}
