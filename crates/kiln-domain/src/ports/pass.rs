//! Compiler Pass Port
//!
//! A unit of registry transformation, applied by `ServiceRegistry::compile`
//! in stage and priority order.

use crate::entities::ServiceRegistry;
use crate::error::Result;

/// Registry transformation run during compilation
pub trait CompilerPass: Send + Sync {
    /// Name used in logs and diagnostics
    fn name(&self) -> &str;

    /// Modify the registry
    fn process(&self, registry: &mut ServiceRegistry) -> Result<()>;
}
