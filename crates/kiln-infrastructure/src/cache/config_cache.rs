//! Filesystem freshness gate
//!
//! Outside development mode an artifact is fresh as soon as it exists.
//! In development mode it is fresh only while every resource recorded in
//! its `.meta` sidecar still hashes to the sha256 the build saw when it
//! read that resource. A source edited while the build was running therefore
//! leaves the artifact stale. Any problem reading the sidecar counts as
//! stale: a needless rebuild is acceptable, reusing an outdated artifact is not.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use kiln_domain::constants::META_SUFFIX;
use kiln_domain::error::Result;
use kiln_domain::ports::FreshnessGate;
use kiln_domain::value_objects::FileResource;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::META_FORMAT_VERSION;
use crate::utils::FileUtils;

/// One tracked resource and its content hash when the build read it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceFingerprint {
    /// Path of the resource
    pub path: PathBuf,
    /// Hex sha256 of the content, `None` when it could not be read
    pub sha256: Option<String>,
}

impl ResourceFingerprint {
    /// Whether the resource still has the recorded content
    pub fn is_unchanged(&self) -> bool {
        FileResource::read(&self.path).sha256() == self.sha256.as_deref()
    }
}

impl From<&FileResource> for ResourceFingerprint {
    fn from(resource: &FileResource) -> Self {
        Self {
            path: resource.path().to_path_buf(),
            sha256: resource.sha256().map(str::to_owned),
        }
    }
}

/// Content of the `.meta` sidecar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMeta {
    /// Sidecar layout version
    pub version: u32,
    /// When the artifact was written
    pub written_at: DateTime<Utc>,
    /// Resources the artifact was built from
    pub resources: Vec<ResourceFingerprint>,
}

/// Freshness gate backed by the artifact file and its `.meta` sidecar
#[derive(Debug, Clone)]
pub struct ConfigCache {
    path: PathBuf,
    debug: bool,
}

impl ConfigCache {
    /// Gate for the artifact at `path`; `debug` enables resource checks
    pub fn new(path: impl Into<PathBuf>, debug: bool) -> Self {
        Self {
            path: path.into(),
            debug,
        }
    }

    /// Whether resources are checked
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Path of the metadata sidecar
    pub fn meta_path(&self) -> PathBuf {
        let mut meta: OsString = self.path.as_os_str().to_owned();
        meta.push(META_SUFFIX);
        PathBuf::from(meta)
    }

    /// Parsed metadata sidecar, `None` when missing or unreadable
    pub fn read_meta(&self) -> Option<CacheMeta> {
        let content = std::fs::read(self.meta_path()).ok()?;
        match serde_json::from_slice::<CacheMeta>(&content) {
            Ok(meta) if meta.version == META_FORMAT_VERSION => Some(meta),
            Ok(meta) => {
                debug!(path = %self.path.display(), version = meta.version, "Unsupported cache metadata version");
                None
            }
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Unreadable cache metadata");
                None
            }
        }
    }
}

impl FreshnessGate for ConfigCache {
    fn path(&self) -> &Path {
        &self.path
    }

    fn is_fresh(&self) -> bool {
        if !self.path.is_file() {
            return false;
        }
        if !self.debug {
            return true;
        }

        let Some(meta) = self.read_meta() else {
            return false;
        };
        match meta.resources.iter().find(|resource| !resource.is_unchanged()) {
            Some(changed) => {
                debug!(
                    artifact = %self.path.display(),
                    resource = %changed.path.display(),
                    "Tracked resource changed"
                );
                false
            }
            None => true,
        }
    }

    fn write_sibling(&self, file: &str, content: &str) -> Result<()> {
        let path = self
            .path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(file);
        FileUtils::write_atomic(&path, content.as_bytes())
    }

    fn write(&self, content: &str, resources: &[FileResource]) -> Result<()> {
        FileUtils::write_atomic(&self.path, content.as_bytes())?;

        let meta = CacheMeta {
            version: META_FORMAT_VERSION,
            written_at: Utc::now(),
            resources: resources
                .iter()
                .map(ResourceFingerprint::from)
                .collect(),
        };
        FileUtils::write_json_atomic(&self.meta_path(), &meta)?;

        debug!(
            artifact = %self.path.display(),
            resources = meta.resources.len(),
            "Cache written"
        );
        Ok(())
    }
}
