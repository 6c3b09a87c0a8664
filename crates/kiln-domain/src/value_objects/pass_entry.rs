//! Declared compiler passes

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::PassStage;
use crate::constants::DEFAULT_PRIORITY;
use crate::ports::CompilerPass;

/// A pass declared by its registered kind and constructor arguments
///
/// Instantiated through the pass factory registry right before it is
/// registered with the service registry, so it can be declared before the
/// things it depends on exist.
#[derive(Debug, Clone, PartialEq)]
pub struct DelayedPass {
    /// Registered pass kind
    pub kind: String,
    /// Constructor arguments, forwarded verbatim to the factory
    pub arguments: Vec<Value>,
}

/// What a pass entry points at
#[derive(Clone)]
pub enum PassTarget {
    /// A live pass instance
    Instance(Arc<dyn CompilerPass>),
    /// A pass still to be constructed
    Delayed(DelayedPass),
}

impl fmt::Debug for PassTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassTarget::Instance(pass) => f.debug_tuple("Instance").field(&pass.name()).finish(),
            PassTarget::Delayed(delayed) => f.debug_tuple("Delayed").field(delayed).finish(),
        }
    }
}

/// One element of a build's pass list
#[derive(Debug, Clone)]
pub struct PassEntry {
    /// The pass or its delayed declaration
    pub target: PassTarget,
    /// Stage the pass is registered under
    pub stage: PassStage,
    /// Higher runs earlier within the stage
    pub priority: i32,
}

impl PassEntry {
    /// Entry for a live pass
    pub fn instance(pass: Arc<dyn CompilerPass>, stage: PassStage, priority: i32) -> Self {
        Self {
            target: PassTarget::Instance(pass),
            stage,
            priority,
        }
    }

    /// Entry for a pass constructed at compile time
    pub fn delayed(
        kind: impl Into<String>,
        arguments: Vec<Value>,
        stage: PassStage,
        priority: i32,
    ) -> Self {
        Self {
            target: PassTarget::Delayed(DelayedPass {
                kind: kind.into(),
                arguments,
            }),
            stage,
            priority,
        }
    }

    /// Live pass with the default stage and priority
    pub fn of(pass: Arc<dyn CompilerPass>) -> Self {
        Self::instance(pass, PassStage::default(), DEFAULT_PRIORITY)
    }

    /// The live instance, if this entry is not delayed
    pub fn as_instance(&self) -> Option<&Arc<dyn CompilerPass>> {
        match &self.target {
            PassTarget::Instance(pass) => Some(pass),
            PassTarget::Delayed(_) => None,
        }
    }

    /// The delayed declaration, if any
    pub fn as_delayed(&self) -> Option<&DelayedPass> {
        match &self.target {
            PassTarget::Delayed(delayed) => Some(delayed),
            PassTarget::Instance(_) => None,
        }
    }
}
