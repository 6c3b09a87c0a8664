//! Domain Entities
//!
//! | Entity | Description |
//! |--------|-------------|
//! | [`ServiceRegistry`] | Mutable building form of a container |
//! | [`ParameterBag`] | Parameters with placeholder resolution |

/// Passes every registry runs on compile
pub mod builtin_passes;
/// Parameter storage and placeholder resolution
pub mod parameter_bag;
/// The service registry
pub mod registry;

pub use builtin_passes::{
    CheckCircularReferencesPass, CheckReferencesPass, RemoveUnusedPrivateServicesPass,
    ResolveParameterPlaceholdersPass,
};
pub use parameter_bag::ParameterBag;
pub use registry::ServiceRegistry;
