//! Freshness Gate Port
//!
//! Wraps the root artifact path and decides whether it can be reused
//! without rebuilding.

use std::path::Path;

use crate::error::Result;
use crate::value_objects::FileResource;

/// Cache freshness check and metadata writer for one artifact path
pub trait FreshnessGate: Send + Sync {
    /// Path of the root artifact
    fn path(&self) -> &Path;

    /// Whether the artifact can be reused as is
    ///
    /// Must never report fresh when a tracked dependency changed; an
    /// unreadable metadata file counts as stale.
    fn is_fresh(&self) -> bool;

    /// Write `content` to `file`, relative to the directory of the artifact
    ///
    /// Used for the files the root artifact refers to. Written before
    /// [`write`](Self::write) so a fresh root never points at missing or
    /// partially written siblings.
    fn write_sibling(&self, file: &str, content: &str) -> Result<()>;

    /// Persist `content` as the artifact and `resources` as the new baseline
    ///
    /// The baseline is the fingerprint each resource had when it was read,
    /// not its content at write time.
    fn write(&self, content: &str, resources: &[FileResource]) -> Result<()>;
}
