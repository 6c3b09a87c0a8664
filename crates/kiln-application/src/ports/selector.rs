//! Source Loader Selector Port

use std::sync::Arc;

use kiln_domain::ports::SourceLoader;

/// Strategy returning the loader for one source format (or a delegating mix)
///
/// Implementations must be a pure function of the search paths: two calls
/// with the same paths behave identically.
pub trait SourceLoaderSelector: Send + Sync {
    /// Format name used in logs ("yaml", "delegating", ...)
    fn name(&self) -> &str;

    /// Loader resolving relative files against `paths`
    fn loader(&self, paths: &[String]) -> Arc<dyn SourceLoader>;
}
