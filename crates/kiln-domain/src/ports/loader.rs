//! Source Loader Port
//!
//! Parses one definition source into the registry's building form. Loading
//! is cumulative: every call adds to what earlier calls defined, later files
//! override earlier ones.

use crate::entities::ServiceRegistry;
use crate::error::Result;

/// Loader for one (or several) definition formats
pub trait SourceLoader: Send + Sync {
    /// Whether this loader can parse `file`
    fn supports(&self, file: &str) -> bool;

    /// Parse `file` into `registry`
    fn load(&self, file: &str, registry: &mut ServiceRegistry) -> Result<()>;
}
