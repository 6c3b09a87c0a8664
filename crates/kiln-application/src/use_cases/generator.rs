//! Generator
//!
//! Owns the format strategy of a build. It initializes registries from a
//! configuration's sources and is the compile-then-load entry point used by
//! the builder facade.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use kiln_domain::entities::ServiceRegistry;
use kiln_domain::error::{Error, Result};
use kiln_domain::ports::{ContainerDumper, FreshnessGate};
use kiln_domain::value_objects::FileResource;
use tracing::debug;

use super::{ArtifactLoader, Compiler};
use crate::configuration::BuildConfiguration;
use crate::ports::{ContainerInitializer, SourceLoaderSelector};
use crate::runtime::Container;

/// Constructor of the registry every build starts from
pub type RegistryFactory = fn() -> ServiceRegistry;

/// Loader selection plus the compile and load steps built on it
#[derive(Clone)]
pub struct Generator {
    selector: Arc<dyn SourceLoaderSelector>,
    configuration_file: PathBuf,
    registry_factory: RegistryFactory,
    compiler: Compiler,
    loader: ArtifactLoader,
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("selector", &self.selector.name())
            .field("configuration_file", &self.configuration_file)
            .finish()
    }
}

impl Generator {
    /// Create a generator
    ///
    /// `configuration_file` is the file declaring the build; it is tracked
    /// as a dependency of every artifact so editing it forces a rebuild.
    pub fn new(
        selector: Arc<dyn SourceLoaderSelector>,
        dumper: Arc<dyn ContainerDumper>,
        configuration_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            selector,
            configuration_file: configuration_file.into(),
            registry_factory: ServiceRegistry::new,
            compiler: Compiler::new(dumper),
            loader: ArtifactLoader::new(),
        }
    }

    /// Start builds from registries made by `factory` instead of `ServiceRegistry::new`
    pub fn with_registry_factory(mut self, factory: RegistryFactory) -> Self {
        self.registry_factory = factory;
        self
    }

    /// The format strategy
    pub fn selector(&self) -> &dyn SourceLoaderSelector {
        self.selector.as_ref()
    }

    /// File tracked as the build's own declaration
    pub fn configuration_file(&self) -> &Path {
        &self.configuration_file
    }

    /// Make sure the artifact behind `gate` is fresh, then load it
    pub fn generate(
        &self,
        config: &BuildConfiguration,
        gate: &dyn FreshnessGate,
    ) -> Result<Container> {
        self.compiler.compile(config, gate, self)?;
        self.loader.load_container(config, gate)
    }
}

impl ContainerInitializer for Generator {
    fn initialize_container(&self, config: &BuildConfiguration) -> Result<ServiceRegistry> {
        let mut registry = (self.registry_factory)();
        registry.add_resource(FileResource::read(&self.configuration_file));

        let loader = self.selector.loader(config.paths());
        let files = config.files()?;
        for file in &files {
            if !loader.supports(file) {
                return Err(Error::source(
                    file,
                    format!("No {} loader is able to load this file", self.selector.name()),
                ));
            }
            loader.load(file, &mut registry)?;
        }

        debug!(
            format = self.selector.name(),
            files = files.len(),
            services = registry.definitions().len(),
            "Container initialized"
        );
        Ok(registry)
    }
}
