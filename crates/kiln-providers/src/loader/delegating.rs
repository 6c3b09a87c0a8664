//! Multi-format loader

use std::path::Path;

use kiln_domain::entities::ServiceRegistry;
use kiln_domain::error::{Error, Result};
use kiln_domain::ports::SourceLoader;

use super::file_loader::ImportResolver;
use super::{FileLoader, FileLocator, SourceFormat};

/// Hands every file to the first loader supporting it
///
/// Loaders are tried in the order YAML, JSON, TOML.
#[derive(Debug, Clone)]
pub struct DelegatingLoader {
    loaders: Vec<FileLoader>,
}

impl DelegatingLoader {
    /// Loader for every supported format sharing `locator`
    pub fn new(locator: FileLocator) -> Self {
        Self {
            loaders: SourceFormat::ALL
                .into_iter()
                .map(|format| FileLoader::new(format, locator.clone()))
                .collect(),
        }
    }

    fn resolve(&self, file: &str) -> Result<&FileLoader> {
        self.loaders
            .iter()
            .find(|loader| loader.supports(file))
            .ok_or_else(|| Error::source(file, "No loader is able to load this file"))
    }
}

impl ImportResolver for DelegatingLoader {
    fn import(
        &self,
        file: &str,
        current_dir: Option<&Path>,
        registry: &mut ServiceRegistry,
    ) -> Result<()> {
        self.resolve(file)?
            .load_from(file, current_dir, registry, self)
    }
}

impl SourceLoader for DelegatingLoader {
    fn supports(&self, file: &str) -> bool {
        self.loaders.iter().any(|loader| loader.supports(file))
    }

    fn load(&self, file: &str, registry: &mut ServiceRegistry) -> Result<()> {
        self.import(file, None, registry)
    }
}
