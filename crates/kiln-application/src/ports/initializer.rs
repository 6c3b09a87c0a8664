//! Container Initializer Port

use kiln_domain::entities::ServiceRegistry;
use kiln_domain::error::Result;

use crate::configuration::BuildConfiguration;

/// Produces a registry populated from a configuration's sources, not yet compiled
pub trait ContainerInitializer: Send + Sync {
    /// Build a fresh registry and load every file of `config` into it
    ///
    /// Fails on the first file that cannot be loaded; the partially loaded
    /// registry is dropped.
    fn initialize_container(&self, config: &BuildConfiguration) -> Result<ServiceRegistry>;
}
