//! Serialized form of a compiled container
//!
//! The dumper writes these types as JSON and the artifact loader reads them
//! back. The root artifact is a [`ContainerManifest`]; sibling files hold
//! externalized [`ServiceFactory`] entries, [`ProxyDescriptor`]s and the class map.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Alias, Argument};
use crate::constants::{CONTAINER_CLASS_NAME, HOT_PATH_TAG, NAMESPACE_SEPARATOR};

/// Options handed to a `ContainerDumper`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpOptions {
    /// Short class name of the generated container
    pub class: String,
    /// Namespace the class lives in
    pub namespace: String,
    /// Base type override
    pub base_class: Option<String>,
    /// Path of the root artifact
    pub file: PathBuf,
    /// Development build
    pub debug: bool,
    /// Split the artifact into per-service files
    pub as_files: bool,
    /// Tag marking services that stay inlined in the root artifact
    pub hot_path_tag: String,
}

impl DumpOptions {
    /// Options for `namespace` with every other field at its default
    pub fn new(namespace: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            class: CONTAINER_CLASS_NAME.to_string(),
            namespace: namespace.into(),
            base_class: None,
            file: file.into(),
            debug: false,
            as_files: true,
            hot_path_tag: HOT_PATH_TAG.to_string(),
        }
    }

    /// Namespace-qualified class name
    pub fn class_name(&self) -> String {
        if self.namespace.is_empty() {
            return self.class.clone();
        }
        format!("{}{}{}", self.namespace, NAMESPACE_SEPARATOR, self.class)
    }
}

/// Root artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerManifest {
    /// Namespace-qualified class name the artifact was generated for
    pub class_name: String,
    /// Base type the loaded container is an instance of
    pub base_class: String,
    /// Generated by a development build
    pub debug: bool,
    /// Compiled parameters
    pub parameters: IndexMap<String, Value>,
    /// Every retained service
    pub services: IndexMap<String, ServiceEntry>,
    /// Every retained alias
    pub aliases: IndexMap<String, Alias>,
    /// Classes the artifact needs at load time
    pub class_map: ClassMap,
}

/// A service in the root artifact: inlined or pointing at a sibling file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServiceEntry {
    /// Factory embedded in the root artifact
    Inline {
        /// The factory
        factory: ServiceFactory,
    },
    /// Factory stored in a sibling file, relative to the root's directory
    File {
        /// Relative file name
        file: String,
    },
}

/// Everything the runtime container needs to build one service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceFactory {
    /// Service id
    pub id: String,
    /// Registered class name
    pub class: String,
    /// Fully resolved arguments (no parameter placeholders left)
    pub arguments: Vec<Argument>,
    /// Retrievable through `get`
    pub public: bool,
    /// Cached after first instantiation
    pub shared: bool,
    /// Instantiated through a proxy
    pub lazy: bool,
    /// Relative file of the proxy descriptor, for lazy services
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
}

/// Proxy descriptor of a lazy service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyDescriptor {
    /// Service id behind the proxy
    pub id: String,
    /// Class the proxy stands in for
    pub class: String,
}

/// Classes required by the artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassMap {
    /// Embedded in the root artifact
    Inline {
        /// Sorted, deduplicated class names
        classes: Vec<String>,
    },
    /// Stored in a sibling file
    File {
        /// Relative file name
        file: String,
    },
}
