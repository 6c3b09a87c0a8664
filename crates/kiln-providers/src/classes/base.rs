//! Default container base

use kiln_application::ports::registry::{CONTAINER_BASES, ContainerBase, ContainerBaseEntry};
use kiln_domain::constants::DEFAULT_BASE_CLASS;

/// Base of containers built without a base class override
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultContainerBase;

impl ContainerBase for DefaultContainerBase {
    fn name(&self) -> &str {
        DEFAULT_BASE_CLASS
    }
}

#[linkme::distributed_slice(CONTAINER_BASES)]
static DEFAULT_BASE: ContainerBaseEntry = ContainerBaseEntry {
    name: DEFAULT_BASE_CLASS,
    description: "Plain container without extra behaviour",
    factory: || Box::new(DefaultContainerBase),
};
