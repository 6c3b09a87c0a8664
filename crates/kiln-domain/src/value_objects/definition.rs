//! Service and alias definitions held by the registry

use serde::{Deserialize, Serialize};

use super::Argument;

/// Building-form description of one service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    /// Registered class name used to instantiate the service
    pub class: String,
    /// Constructor arguments
    #[serde(default)]
    pub arguments: Vec<Argument>,
    /// Retrievable from the compiled container
    #[serde(default)]
    pub public: bool,
    /// Instantiated behind a proxy, breaks dependency cycles
    #[serde(default)]
    pub lazy: bool,
    /// One instance per container (false: new instance on every lookup)
    #[serde(default = "default_shared")]
    pub shared: bool,
    /// Free-form tags consumed by passes
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_shared() -> bool {
    true
}

impl ServiceDefinition {
    /// A private, shared, eager definition of `class` with no arguments
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            arguments: Vec::new(),
            public: false,
            lazy: false,
            shared: true,
            tags: Vec::new(),
        }
    }

    /// Set the visibility
    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Set the laziness
    pub fn with_lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    /// Append a constructor argument
    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Append a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Whether the definition carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Every service id referenced by the arguments
    pub fn references(&self) -> Vec<(&str, bool)> {
        self.arguments.iter().flat_map(Argument::references).collect()
    }
}

/// Alternative id pointing at another service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    /// Id of the aliased service
    pub target: String,
    /// Retrievable from the compiled container
    #[serde(default)]
    pub public: bool,
}

impl Alias {
    /// Create an alias to `target`
    pub fn new(target: impl Into<String>, public: bool) -> Self {
        Self {
            target: target.into(),
            public,
        }
    }
}
