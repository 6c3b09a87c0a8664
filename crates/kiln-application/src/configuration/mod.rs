//! Build configuration
//!
//! [`BuildConfiguration`] describes one container build and aggregates the
//! packages declared on it; [`ParameterStore`] carries the parameters the
//! build injects as its first compiler pass.

/// Build description and package aggregation
pub mod build_configuration;
/// Parameters injected as a compiler pass
pub mod parameter_store;

pub use build_configuration::{BuildConfiguration, PackageDeclaration};
pub use parameter_store::ParameterStore;
