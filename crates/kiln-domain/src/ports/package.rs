//! Package Ports
//!
//! A package is a declarative bundle that may contribute definition files,
//! compiler passes, or both. Capabilities are probed through the `as_*`
//! accessors rather than by downcasting.

use crate::value_objects::PassEntry;

/// Bundle of reusable build inputs
pub trait Package: Send + Sync {
    /// Name used in logs and diagnostics
    fn name(&self) -> &str;

    /// The file-contributing capability, when implemented
    fn as_file_contributor(&self) -> Option<&dyn FileContributor> {
        None
    }

    /// The pass-contributing capability, when implemented
    fn as_pass_contributor(&self) -> Option<&dyn PassContributor> {
        None
    }
}

/// Package capability: extra definition files, loaded before the build's own
pub trait FileContributor {
    /// Files in load order
    fn files(&self) -> Vec<String>;
}

/// Package capability: extra compiler passes, registered before the build's own
pub trait PassContributor {
    /// Passes in registration order
    fn compiler_passes(&self) -> Vec<PassEntry>;
}
