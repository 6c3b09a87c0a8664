//! Passes every registry runs during `compile()`
//!
//! | Pass | Stage | Priority |
//! |------|-------|----------|
//! | [`ResolveParameterPlaceholdersPass`] | optimize | 100 |
//! | [`CheckReferencesPass`] | optimize | 0 |
//! | [`CheckCircularReferencesPass`] | optimize | -100 |
//! | [`RemoveUnusedPrivateServicesPass`] | removing | 0 |

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use super::parameter_bag::ParameterBag;
use super::registry::ServiceRegistry;
use crate::error::{Error, Result};
use crate::ports::CompilerPass;
use crate::value_objects::Argument;

// ============================================================================
// Parameter placeholders
// ============================================================================

/// Replaces `%param%` placeholders in parameters, classes and arguments
#[derive(Debug, Default)]
pub struct ResolveParameterPlaceholdersPass;

impl CompilerPass for ResolveParameterPlaceholdersPass {
    fn name(&self) -> &str {
        "resolve_parameter_placeholders"
    }

    fn process(&self, registry: &mut ServiceRegistry) -> Result<()> {
        let bag = registry.parameter_bag().clone();

        let mut resolved = IndexMap::with_capacity(bag.len());
        for name in bag.all().keys() {
            resolved.insert(name.clone(), bag.resolve_parameter(name)?);
        }
        *registry.parameter_bag_mut() = ParameterBag::from_map(resolved);

        for (id, definition) in registry.definitions_mut() {
            definition.class = match bag.resolve_value(&Value::String(definition.class.clone()))? {
                Value::String(class) => class,
                other => {
                    return Err(Error::compilation(format!(
                        "The class of service \"{id}\" must resolve to a string, got {other}"
                    )));
                }
            };
            for argument in &mut definition.arguments {
                resolve_argument(argument, &bag)?;
            }
        }
        Ok(())
    }
}

fn resolve_argument(argument: &mut Argument, bag: &ParameterBag) -> Result<()> {
    match argument {
        Argument::Parameter { name } => {
            let value = bag.resolve_parameter(name)?;
            *argument = Argument::Value { value };
        }
        Argument::Value { value } => *value = bag.resolve_value(value)?,
        Argument::List { items } => {
            for item in items {
                resolve_argument(item, bag)?;
            }
        }
        Argument::Reference { .. } => {}
    }
    Ok(())
}

// ============================================================================
// Reference validation
// ============================================================================

/// Fails on references to unknown services; optional ones become `null`
#[derive(Debug, Default)]
pub struct CheckReferencesPass;

impl CompilerPass for CheckReferencesPass {
    fn name(&self) -> &str {
        "check_references"
    }

    fn process(&self, registry: &mut ServiceRegistry) -> Result<()> {
        for (id, alias) in registry.aliases() {
            if registry.resolve_id(&alias.target).is_none() {
                return Err(Error::compilation(format!(
                    "The service alias \"{id}\" points to a non-existent service \"{}\"",
                    alias.target
                )));
            }
        }

        let known: HashSet<String> = registry
            .definitions()
            .keys()
            .chain(registry.aliases().keys())
            .cloned()
            .collect();

        for (id, definition) in registry.definitions_mut() {
            for argument in &mut definition.arguments {
                check_argument(id, argument, &known)?;
            }
        }
        Ok(())
    }
}

fn check_argument(service: &str, argument: &mut Argument, known: &HashSet<String>) -> Result<()> {
    match argument {
        Argument::Reference { id, optional } if !known.contains(id.as_str()) => {
            if !*optional {
                return Err(Error::compilation(format!(
                    "The service \"{service}\" has a dependency on a non-existent service \"{id}\""
                )));
            }
            *argument = Argument::Value { value: Value::Null };
        }
        Argument::List { items } => {
            for item in items {
                check_argument(service, item, known)?;
            }
        }
        _ => {}
    }
    Ok(())
}

// ============================================================================
// Circular references
// ============================================================================

/// Fails on dependency cycles not broken by a lazy service
#[derive(Debug, Default)]
pub struct CheckCircularReferencesPass;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

impl CompilerPass for CheckCircularReferencesPass {
    fn name(&self) -> &str {
        "check_circular_references"
    }

    fn process(&self, registry: &mut ServiceRegistry) -> Result<()> {
        let mut edges: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for (id, definition) in registry.definitions() {
            let targets = definition
                .references()
                .into_iter()
                .filter_map(|(target, _)| registry.resolve_id(target))
                .filter(|target| {
                    registry
                        .definition(target)
                        .is_some_and(|definition| !definition.lazy)
                })
                .collect();
            edges.insert(id.as_str(), targets);
        }

        let mut state: HashMap<&str, Visit> = HashMap::new();
        let mut path: Vec<&str> = Vec::new();
        for id in edges.keys().copied() {
            visit(id, &edges, &mut state, &mut path)?;
        }
        Ok(())
    }
}

fn visit<'a>(
    id: &'a str,
    edges: &IndexMap<&'a str, Vec<&'a str>>,
    state: &mut HashMap<&'a str, Visit>,
    path: &mut Vec<&'a str>,
) -> Result<()> {
    match state.get(id) {
        Some(Visit::Done) => return Ok(()),
        Some(Visit::InProgress) => {
            let start = path.iter().position(|seen| *seen == id).unwrap_or(0);
            let mut cycle = path[start..].to_vec();
            cycle.push(id);
            return Err(Error::compilation(format!(
                "Circular reference detected for service \"{id}\", path: \"{}\"",
                cycle.join(" -> ")
            )));
        }
        None => {}
    }

    state.insert(id, Visit::InProgress);
    path.push(id);
    for &target in edges.get(id).map(Vec::as_slice).unwrap_or_default() {
        visit(target, edges, state, path)?;
    }
    path.pop();
    state.insert(id, Visit::Done);
    Ok(())
}

// ============================================================================
// Unused private services
// ============================================================================

/// Rewrites references through aliases, drops private aliases and every
/// private service nothing retained depends on
#[derive(Debug, Default)]
pub struct RemoveUnusedPrivateServicesPass;

impl CompilerPass for RemoveUnusedPrivateServicesPass {
    fn name(&self) -> &str {
        "remove_unused_private_services"
    }

    fn process(&self, registry: &mut ServiceRegistry) -> Result<()> {
        let targets: HashMap<String, String> = registry
            .aliases()
            .keys()
            .filter_map(|id| registry.resolve_id(id).map(|target| (id.clone(), target.to_string())))
            .collect();
        for (_, definition) in registry.definitions_mut() {
            for argument in &mut definition.arguments {
                rewrite_alias_references(argument, &targets);
            }
        }

        let private_aliases: Vec<String> = registry
            .aliases()
            .iter()
            .filter(|(_, alias)| !alias.public)
            .map(|(id, _)| id.clone())
            .collect();
        for id in &private_aliases {
            registry.remove_alias(id);
        }

        let mut removed = 0usize;
        loop {
            let mut used: HashSet<String> = registry
                .aliases()
                .keys()
                .filter_map(|id| registry.resolve_id(id).map(str::to_string))
                .collect();
            for (id, definition) in registry.definitions() {
                for (target, _) in definition.references() {
                    if target != id.as_str() {
                        used.insert(target.to_string());
                    }
                }
            }

            let unused: Vec<String> = registry
                .definitions()
                .iter()
                .filter(|(id, definition)| !definition.public && !used.contains(id.as_str()))
                .map(|(id, _)| id.clone())
                .collect();
            if unused.is_empty() {
                break;
            }
            for id in &unused {
                registry.remove_definition(id);
            }
            removed += unused.len();
        }

        debug!(
            removed_services = removed,
            removed_aliases = private_aliases.len(),
            "Removed unused private services"
        );
        Ok(())
    }
}

fn rewrite_alias_references(argument: &mut Argument, targets: &HashMap<String, String>) {
    match argument {
        Argument::Reference { id, .. } => {
            if let Some(target) = targets.get(id.as_str()) {
                id.clone_from(target);
            }
        }
        Argument::List { items } => {
            for item in items {
                rewrite_alias_references(item, targets);
            }
        }
        Argument::Value { .. } | Argument::Parameter { .. } => {}
    }
}
