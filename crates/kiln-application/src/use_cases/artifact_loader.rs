//! Artifact loader
//!
//! Reads the root manifest at the gate's path, pulls in the sibling factory,
//! proxy and class-map files it points at and assembles a [`Container`].
//! No freshness logic: it loads whatever the compiler just ensured exists.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use kiln_domain::error::{Error, Result};
use kiln_domain::ports::FreshnessGate;
use kiln_domain::value_objects::{
    ClassMap, ContainerManifest, ProxyDescriptor, ServiceEntry, ServiceFactory,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::configuration::BuildConfiguration;
use crate::ports::registry::{has_service_class, resolve_container_base};
use crate::runtime::Container;

/// Loads persisted container artifacts
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactLoader;

impl ArtifactLoader {
    /// Create a loader
    pub fn new() -> Self {
        Self
    }

    /// Load the container stored at `gate`'s path
    ///
    /// # Errors
    ///
    /// Cache errors for unreadable or malformed artifacts, configuration
    /// errors when the artifact belongs to another class, needs a class that
    /// is not registered, or extends an unknown base type.
    pub fn load_container(
        &self,
        config: &BuildConfiguration,
        gate: &dyn FreshnessGate,
    ) -> Result<Container> {
        let root = gate.path();
        let manifest: ContainerManifest = read_json(root)?;

        let expected = config.class_name();
        if manifest.class_name != expected {
            return Err(Error::configuration(format!(
                "Artifact {} holds container \"{}\", expected \"{}\"",
                root.display(),
                manifest.class_name,
                expected
            )));
        }

        let base_dir = root.parent().unwrap_or_else(|| Path::new("."));
        let factories = load_factories(base_dir, manifest.services)?;
        verify_classes(base_dir, &manifest.class_map, &factories)?;
        let base = resolve_container_base(&manifest.base_class)?;

        debug!(
            class = %manifest.class_name,
            base = %manifest.base_class,
            services = factories.len(),
            "Container loaded"
        );
        Ok(Container::new(
            manifest.class_name,
            manifest.debug,
            manifest.parameters,
            factories,
            manifest.aliases,
            base,
        ))
    }
}

fn load_factories(
    base_dir: &Path,
    services: IndexMap<String, ServiceEntry>,
) -> Result<IndexMap<String, ServiceFactory>> {
    let mut factories = IndexMap::with_capacity(services.len());
    for (id, entry) in services {
        let factory: ServiceFactory = match entry {
            ServiceEntry::Inline { factory } => factory,
            ServiceEntry::File { file } => read_json(&base_dir.join(file))?,
        };
        if let Some(proxy_file) = &factory.proxy {
            let proxy: ProxyDescriptor = read_json(&base_dir.join(proxy_file))?;
            if proxy.id != id || proxy.class != factory.class {
                return Err(Error::cache(format!(
                    "Proxy {proxy_file} does not describe service \"{id}\""
                )));
            }
        }
        if factory.id != id {
            return Err(Error::cache(format!(
                "Factory of service \"{id}\" is recorded as \"{}\"",
                factory.id
            )));
        }
        factories.insert(id, factory);
    }
    Ok(factories)
}

fn verify_classes(
    base_dir: &Path,
    class_map: &ClassMap,
    factories: &IndexMap<String, ServiceFactory>,
) -> Result<()> {
    let classes: Vec<String> = match class_map {
        ClassMap::Inline { classes } => classes.clone(),
        ClassMap::File { file } => read_json(&base_dir.join(file))?,
    };

    for class in classes
        .iter()
        .map(String::as_str)
        .chain(factories.values().map(|factory| factory.class.as_str()))
    {
        if !has_service_class(class) {
            return Err(Error::configuration(format!(
                "Class \"{class}\" required by the container is not registered"
            )));
        }
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).map_err(|e| {
        Error::io_with_source(format!("Cannot read artifact {}", path.display()), e)
    })?;
    serde_json::from_str(&raw)
        .map_err(|e| Error::cache(format!("Malformed artifact {}: {e}", path.display())))
}
