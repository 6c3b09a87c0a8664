//! Tracked build dependencies

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A file the registry read while being built
///
/// Carries the sha256 of the bytes that were actually read, so the
/// freshness baseline matches the content the artifact was built from even
/// when the file changes later in the build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileResource {
    path: PathBuf,
    sha256: Option<String>,
}

impl FileResource {
    /// Track `path` with the `content` read from it
    pub fn new(path: impl Into<PathBuf>, content: &[u8]) -> Self {
        Self {
            path: path.into(),
            sha256: Some(fingerprint(content)),
        }
    }

    /// Track `path` as it is on disk now
    ///
    /// A file that cannot be read is tracked without a fingerprint.
    pub fn read(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let sha256 = std::fs::read(&path).ok().map(|content| fingerprint(&content));
        Self { path, sha256 }
    }

    /// The tracked path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hex sha256 of the content when it was read
    pub fn sha256(&self) -> Option<&str> {
        self.sha256.as_deref()
    }

    /// Whether the file on disk still has the tracked content
    pub fn is_unchanged(&self) -> bool {
        Self::read(&self.path).sha256 == self.sha256
    }
}

/// Hex sha256 of `content`
pub fn fingerprint(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}
