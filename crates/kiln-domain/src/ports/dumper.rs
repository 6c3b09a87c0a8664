//! Container Dumper Port

use indexmap::IndexMap;

use crate::entities::ServiceRegistry;
use crate::error::Result;
use crate::value_objects::DumpOptions;

/// Serializes a compiled registry into loadable artifact files
pub trait ContainerDumper: Send + Sync {
    /// Relative file name to content; the last entry is the root artifact
    fn dump(
        &self,
        registry: &ServiceRegistry,
        options: &DumpOptions,
    ) -> Result<IndexMap<String, String>>;
}
