//! Compiler passes shipped with kiln
//!
//! | Pass | Registered kind | Purpose |
//! |------|-----------------|---------|
//! | [`MakeServicesPublic`] | `make_services_public` | Test builds: every service retrievable |
//! | [`DumpDefinitions`] | none (needs a gate) | Development builds: YAML dump of the registry |
//! | [`ParameterStore`](crate::configuration::ParameterStore) | `parameter_store` | Parameter injection |

/// Development-mode registry dump
pub mod dump_definitions;
/// Visibility override for test containers
pub mod make_services_public;

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

pub use dump_definitions::DumpDefinitions;
pub use make_services_public::MakeServicesPublic;

use crate::configuration::ParameterStore;
use crate::ports::registry::{COMPILER_PASSES, CompilerPassEntry, check_arity};

#[linkme::distributed_slice(COMPILER_PASSES)]
static MAKE_SERVICES_PUBLIC: CompilerPassEntry = CompilerPassEntry {
    name: "make_services_public",
    description: "Marks every service and alias public",
    factory: |args| {
        check_arity("make_services_public", args, 0)?;
        Ok(Arc::new(MakeServicesPublic))
    },
};

#[linkme::distributed_slice(COMPILER_PASSES)]
static PARAMETER_STORE: CompilerPassEntry = CompilerPassEntry {
    name: "parameter_store",
    description: "Merges a map of parameters into the registry",
    factory: |args| {
        let parameters: IndexMap<String, Value> = match args {
            [] => IndexMap::new(),
            [Value::Object(map)] => map.clone().into_iter().collect(),
            [other] => return Err(format!("expects an object of parameters, got {other}")),
            _ => return Err(format!("expects at most 1 argument, {} given", args.len())),
        };
        Ok(Arc::new(ParameterStore::from_map(parameters)))
    },
};
