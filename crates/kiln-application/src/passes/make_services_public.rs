//! Visibility override for test containers

use kiln_domain::entities::ServiceRegistry;
use kiln_domain::error::Result;
use kiln_domain::ports::CompilerPass;
use tracing::debug;

/// Marks every definition and alias public
///
/// Registered before the removing stage, it also keeps private services from
/// being removed as unused.
#[derive(Debug, Default, Clone, Copy)]
pub struct MakeServicesPublic;

impl CompilerPass for MakeServicesPublic {
    fn name(&self) -> &str {
        "make_services_public"
    }

    fn process(&self, registry: &mut ServiceRegistry) -> Result<()> {
        for (_, definition) in registry.definitions_mut() {
            definition.public = true;
        }
        for (_, alias) in registry.aliases_mut() {
            alias.public = true;
        }
        debug!(
            services = registry.definitions().len(),
            aliases = registry.aliases().len(),
            "Made every service public"
        );
        Ok(())
    }
}
