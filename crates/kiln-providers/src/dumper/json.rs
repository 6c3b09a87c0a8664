//! JSON container dumper
//!
//! Layout, relative to the root artifact's directory (`<stem>` is the root
//! file name without extension):
//!
//! | File | Written when |
//! |------|--------------|
//! | `<stem>/get<Id>Service.json` | `container.dumper.inline_factories` is false, per service not tagged hot path |
//! | `<stem>/<Id>Proxy.json` | per lazy service |
//! | `<stem>/classes.json` | `container.dumper.inline_class_loader` is false |
//! | `<stem>.json` (root, last) | always |
//!
//! Without `as_files` everything is inlined into the root.

use std::collections::HashSet;

use heck::ToUpperCamelCase;
use indexmap::IndexMap;
use kiln_domain::constants::{
    CLASS_MAP_FILE, DEFAULT_BASE_CLASS, PARAM_INLINE_CLASS_LOADER, PARAM_INLINE_FACTORIES,
};
use kiln_domain::entities::ServiceRegistry;
use kiln_domain::error::{Error, Result};
use kiln_domain::ports::ContainerDumper;
use kiln_domain::value_objects::{
    ClassMap, ContainerManifest, DumpOptions, ProxyDescriptor, ServiceEntry, ServiceFactory,
};
use serde_json::Value;
use tracing::debug;

use crate::constants::{FACTORY_FILE_PREFIX, FACTORY_FILE_SUFFIX, PROXY_FILE_SUFFIX};

/// Serializes compiled registries as JSON artifacts
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDumper;

impl JsonDumper {
    /// Create a dumper
    pub fn new() -> Self {
        Self
    }
}

impl ContainerDumper for JsonDumper {
    fn dump(
        &self,
        registry: &ServiceRegistry,
        options: &DumpOptions,
    ) -> Result<IndexMap<String, String>> {
        if !registry.is_compiled() {
            return Err(Error::internal("Only a compiled registry can be dumped"));
        }

        let root_name = options
            .file
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                Error::internal(format!(
                    "Invalid artifact path: {}",
                    options.file.display()
                ))
            })?
            .to_string();
        let stem = options
            .file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(root_name.as_str())
            .to_string();

        let inline_factories = !options.as_files || flag(registry, PARAM_INLINE_FACTORIES, false);
        let inline_class_loader =
            !options.as_files || flag(registry, PARAM_INLINE_CLASS_LOADER, true);

        let mut files: IndexMap<String, String> = IndexMap::new();
        let mut names = FileNames::default();
        let mut services = IndexMap::with_capacity(registry.definitions().len());

        for (id, definition) in registry.definitions() {
            let pascal = names.unique(id);
            let proxy = if definition.lazy && options.as_files {
                let file = format!("{stem}/{pascal}{PROXY_FILE_SUFFIX}.json");
                let descriptor = ProxyDescriptor {
                    id: id.clone(),
                    class: definition.class.clone(),
                };
                files.insert(file.clone(), serde_json::to_string_pretty(&descriptor)?);
                Some(file)
            } else {
                None
            };

            let factory = ServiceFactory {
                id: id.clone(),
                class: definition.class.clone(),
                arguments: definition.arguments.clone(),
                public: definition.public,
                shared: definition.shared,
                lazy: definition.lazy,
                proxy,
            };

            let entry = if inline_factories || definition.has_tag(&options.hot_path_tag) {
                ServiceEntry::Inline { factory }
            } else {
                let file = format!("{stem}/{FACTORY_FILE_PREFIX}{pascal}{FACTORY_FILE_SUFFIX}.json");
                files.insert(file.clone(), serde_json::to_string_pretty(&factory)?);
                ServiceEntry::File { file }
            };
            services.insert(id.clone(), entry);
        }

        let mut classes: Vec<String> = registry
            .definitions()
            .values()
            .map(|definition| definition.class.clone())
            .collect();
        classes.sort();
        classes.dedup();
        let class_map = if inline_class_loader {
            ClassMap::Inline { classes }
        } else {
            let file = format!("{stem}/{CLASS_MAP_FILE}");
            files.insert(file.clone(), serde_json::to_string_pretty(&classes)?);
            ClassMap::File { file }
        };

        let manifest = ContainerManifest {
            class_name: options.class_name(),
            base_class: options
                .base_class
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_CLASS.to_string()),
            debug: options.debug,
            parameters: registry.parameter_bag().all().clone(),
            services,
            aliases: registry.aliases().clone(),
            class_map,
        };

        debug!(
            class = %manifest.class_name,
            siblings = files.len(),
            "Container dumped"
        );
        files.insert(root_name, serde_json::to_string_pretty(&manifest)?);
        Ok(files)
    }
}

fn flag(registry: &ServiceRegistry, name: &str, default: bool) -> bool {
    registry
        .parameter_bag()
        .get(name)
        .and_then(Value::as_bool)
        .unwrap_or(default)
}

/// PascalCase file names, suffixed when two ids collapse to the same name
#[derive(Default)]
struct FileNames {
    used: HashSet<String>,
}

impl FileNames {
    fn unique(&mut self, id: &str) -> String {
        let base = id.to_upper_camel_case();
        let mut candidate = base.clone();
        let mut counter = 1;
        while !self.used.insert(candidate.clone()) {
            counter += 1;
            candidate = format!("{base}{counter}");
        }
        candidate
    }
}
