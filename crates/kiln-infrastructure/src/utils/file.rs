//! Atomic file writes
//!
//! Content goes to a temporary file in the target directory which is then
//! renamed over the target, so readers see the old file or the new one and
//! never a partial write.

use std::io::Write;
use std::path::Path;

use kiln_domain::error::Result;
use tempfile::NamedTempFile;

use crate::error_ext::ErrorContext;

/// File helpers shared by the cache and settings code
pub struct FileUtils;

impl FileUtils {
    /// Create the parent directories of `path`
    pub fn ensure_parent_dir(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .io_context(format!("Failed to create directory {}", parent.display()))?;
        }
        Ok(())
    }

    /// Replace `path` with `content` atomically, creating parent directories
    pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
        Self::ensure_parent_dir(path)?;
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut file = NamedTempFile::new_in(dir)
            .io_context(format!("Failed to create temporary file in {}", dir.display()))?;
        file.write_all(content)
            .io_context(format!("Failed to write {}", path.display()))?;
        file.as_file()
            .sync_all()
            .io_context(format!("Failed to flush {}", path.display()))?;
        file.persist(path)
            .io_context(format!("Failed to replace {}", path.display()))?;
        Ok(())
    }

    /// Serialize `value` as pretty JSON and write it atomically
    pub fn write_json_atomic<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(value)?;
        Self::write_atomic(path, content.as_bytes())
    }

    /// Read `path` when it exists, `None` when it does not
    pub fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>> {
        match std::fs::read(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).io_context(format!("Failed to read {}", path.display())),
        }
    }
}
