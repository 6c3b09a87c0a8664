//! Generic empty object

use std::sync::Arc;

use kiln_application::ports::registry::{SERVICE_CLASSES, ServiceClassEntry};
use kiln_application::runtime::ServiceArgument;
use kiln_domain::constants::GENERIC_OBJECT_CLASS;
use serde_json::{Map, Value};

/// Property bag instantiated for `stdClass` services
///
/// Takes no argument (empty object) or one mapping of initial properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericObject {
    properties: Map<String, Value>,
}

impl GenericObject {
    /// Empty object
    pub fn new() -> Self {
        Self::default()
    }

    /// Object holding `properties`
    pub fn with_properties(properties: Map<String, Value>) -> Self {
        Self { properties }
    }

    /// Property `name`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Every property
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    fn from_arguments(args: &[ServiceArgument]) -> Result<Self, String> {
        match args {
            [] => Ok(Self::new()),
            [argument] => match argument.as_value() {
                Some(Value::Object(properties)) => Ok(Self::with_properties(properties.clone())),
                Some(Value::Null) => Ok(Self::new()),
                _ => Err("expects a mapping of properties".to_string()),
            },
            _ => Err(format!("expects at most 1 argument, {} given", args.len())),
        }
    }
}

#[linkme::distributed_slice(SERVICE_CLASSES)]
static GENERIC_OBJECT: ServiceClassEntry = ServiceClassEntry {
    name: GENERIC_OBJECT_CLASS,
    description: "Generic object holding an optional property map",
    factory: |args| Ok(Arc::new(GenericObject::from_arguments(args)?)),
};
