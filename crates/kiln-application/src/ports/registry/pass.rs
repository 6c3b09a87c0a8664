//! Compiler Pass Registry
//!
//! Delayed passes are declared by kind and constructed through this registry
//! at compile time, once per compilation.

use std::sync::Arc;

use kiln_domain::error::{Error, Result};
use kiln_domain::ports::CompilerPass;
use serde_json::Value;

/// Registry entry for constructible compiler passes
pub struct CompilerPassEntry {
    /// Unique pass kind (e.g., "make_services_public")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function receiving the declared constructor arguments verbatim
    pub factory: fn(&[Value]) -> std::result::Result<Arc<dyn CompilerPass>, String>,
}

// Auto-collection via linkme distributed slices
#[linkme::distributed_slice]
pub static COMPILER_PASSES: [CompilerPassEntry] = [..];

/// Construct a pass of `kind` with `arguments`
///
/// # Errors
///
/// A configuration error when the kind is unknown or the factory rejects the
/// arguments.
pub fn resolve_compiler_pass(kind: &str, arguments: &[Value]) -> Result<Arc<dyn CompilerPass>> {
    for entry in COMPILER_PASSES {
        if entry.name == kind {
            return (entry.factory)(arguments).map_err(|e| {
                Error::configuration(format!("Cannot construct compiler pass '{kind}': {e}"))
            });
        }
    }

    let available: Vec<&str> = COMPILER_PASSES.iter().map(|e| e.name).collect();

    Err(Error::configuration(format!(
        "Unknown compiler pass '{}'. Available passes: {:?}",
        kind, available
    )))
}

/// List all registered compiler passes as (name, description)
pub fn list_compiler_passes() -> Vec<(&'static str, &'static str)> {
    COMPILER_PASSES
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
