//! Compiler pass stages

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Stage at which a compiler pass runs during `ServiceRegistry::compile`
///
/// Variants are declared in execution order, so the derived `Ord` is the
/// order the registry walks them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassStage {
    /// Before any built-in optimization (parameters, definition tweaks)
    #[default]
    BeforeOptimization,
    /// Alongside the built-in resolution and validation passes
    Optimize,
    /// After optimization, before unused services are removed
    BeforeRemoving,
    /// Alongside the built-in removal of unused private services
    Removing,
    /// Last stage, the registry is in its final shape
    AfterRemoving,
}

impl PassStage {
    /// All stages in execution order
    pub const ALL: [PassStage; 5] = [
        PassStage::BeforeOptimization,
        PassStage::Optimize,
        PassStage::BeforeRemoving,
        PassStage::Removing,
        PassStage::AfterRemoving,
    ];

    /// Canonical string form (`before_optimization`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            PassStage::BeforeOptimization => "before_optimization",
            PassStage::Optimize => "optimize",
            PassStage::BeforeRemoving => "before_removing",
            PassStage::Removing => "removing",
            PassStage::AfterRemoving => "after_removing",
        }
    }
}

impl fmt::Display for PassStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PassStage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PassStage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s.to_lowercase())
            .ok_or_else(|| Error::configuration(format!("Unknown compiler pass stage: {s}")))
    }
}
