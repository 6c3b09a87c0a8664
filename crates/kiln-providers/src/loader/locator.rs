//! File locator
//!
//! Resolves definition file names: absolute names as given, relative names
//! against the importing file's directory, then each search path in order,
//! then the working directory. The first existing file wins.

use std::fs;
use std::path::{Path, PathBuf};

use kiln_domain::error::{Error, Result};

/// Resolves relative source names against search paths
#[derive(Debug, Clone, Default)]
pub struct FileLocator {
    paths: Vec<PathBuf>,
}

impl FileLocator {
    /// Locator searching `paths` in order
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Search paths in lookup order
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Canonical path of `name`
    ///
    /// # Errors
    ///
    /// A source error naming the file and the searched directories when no
    /// candidate exists.
    pub fn locate(&self, name: &str, current_dir: Option<&Path>) -> Result<PathBuf> {
        if name.is_empty() {
            return Err(Error::source(name, "An empty file name is not valid"));
        }

        let requested = Path::new(name);
        let candidates: Vec<PathBuf> = if requested.is_absolute() {
            vec![requested.to_path_buf()]
        } else {
            current_dir
                .into_iter()
                .chain(self.paths.iter().map(PathBuf::as_path))
                .map(|dir| dir.join(requested))
                .chain(std::iter::once(requested.to_path_buf()))
                .collect()
        };

        for candidate in &candidates {
            if candidate.is_file() {
                return fs::canonicalize(candidate).map_err(|e| {
                    Error::source(candidate, format!("Cannot resolve the file: {e}"))
                });
            }
        }

        let searched: Vec<String> = current_dir
            .into_iter()
            .chain(self.paths.iter().map(PathBuf::as_path))
            .map(|dir| dir.display().to_string())
            .collect();
        Err(Error::source(
            name,
            format!("The file does not exist (searched in: {searched:?})"),
        ))
    }
}
