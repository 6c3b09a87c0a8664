//! Single-format file loader

use std::fs;
use std::path::Path;

use kiln_domain::entities::ServiceRegistry;
use kiln_domain::error::{Error, Result};
use kiln_domain::ports::SourceLoader;
use kiln_domain::value_objects::FileResource;
use tracing::debug;

use super::document::SourceDocument;
use super::{FileLocator, SourceFormat};

/// Loads definition files of one format
#[derive(Debug, Clone)]
pub struct FileLoader {
    format: SourceFormat,
    locator: FileLocator,
}

impl FileLoader {
    /// Loader for `format` resolving names through `locator`
    pub fn new(format: SourceFormat, locator: FileLocator) -> Self {
        Self { format, locator }
    }

    /// Format handled by this loader
    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// Load `file` into `registry`, resolving imports through `importer`
    ///
    /// `current_dir` is the directory of the importing file, if any. Imports
    /// are loaded before the importing file's own definitions so the
    /// importing file wins on conflicting ids.
    pub fn load_from(
        &self,
        file: &str,
        current_dir: Option<&Path>,
        registry: &mut ServiceRegistry,
        importer: &dyn ImportResolver,
    ) -> Result<()> {
        let path = self.locator.locate(file, current_dir)?;
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::source(&path, format!("Cannot read the file: {e}")))?;
        let value = self
            .format
            .parse(&content)
            .map_err(|e| Error::source(&path, format!("Invalid {} document: {e}", self.format)))?;
        let document = SourceDocument::from_value(&path, value)?;

        registry.add_resource(FileResource::new(&path, content.as_bytes()));
        let dir = path.parent();
        for import in &document.imports {
            if import_is_loaded(registry, &import.resource, dir, &self.locator) {
                debug!(import = %import.resource, from = %path.display(), "Import already loaded");
                continue;
            }
            match importer.import(&import.resource, dir, registry) {
                Ok(()) => {}
                Err(e) if import.ignore_errors => {
                    debug!(import = %import.resource, error = %e, "Ignoring failed import");
                }
                Err(e) => return Err(e),
            }
        }

        let services = document.services.len();
        document.apply(&path, registry)?;
        debug!(file = %path.display(), format = %self.format, services, "Definition file loaded");
        Ok(())
    }
}

/// Loads imported files on behalf of a loader
///
/// A single-format loader imports through itself; the delegating loader
/// passes itself so imports may use any supported format.
pub trait ImportResolver {
    /// Load `file`, resolving relative names against `current_dir` first
    fn import(
        &self,
        file: &str,
        current_dir: Option<&Path>,
        registry: &mut ServiceRegistry,
    ) -> Result<()>;
}

impl ImportResolver for FileLoader {
    fn import(
        &self,
        file: &str,
        current_dir: Option<&Path>,
        registry: &mut ServiceRegistry,
    ) -> Result<()> {
        if !self.format.matches(file) {
            return Err(Error::source(
                file,
                format!("The {} loader cannot import this file", self.format),
            ));
        }
        self.load_from(file, current_dir, registry, self)
    }
}

impl SourceLoader for FileLoader {
    fn supports(&self, file: &str) -> bool {
        self.format.matches(file)
    }

    fn load(&self, file: &str, registry: &mut ServiceRegistry) -> Result<()> {
        self.load_from(file, None, registry, self)
    }
}

fn import_is_loaded(
    registry: &ServiceRegistry,
    resource: &str,
    current_dir: Option<&Path>,
    locator: &FileLocator,
) -> bool {
    locator
        .locate(resource, current_dir)
        .is_ok_and(|path| registry.is_tracked(&path))
}
