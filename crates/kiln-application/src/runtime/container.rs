//! Loaded container
//!
//! Public services and aliases are retrievable by id; private ones are only
//! reachable as dependencies of other services. Shared services are built
//! once and cached, references to lazy services are handed out as
//! [`LazyService`] handles so cycles through them never recurse.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use indexmap::IndexMap;
use kiln_domain::error::{Error, Result};
use kiln_domain::value_objects::{Alias, Argument, ServiceFactory};
use serde_json::Value;
use tracing::trace;

use super::ServiceArgument;
use crate::ports::registry::{ContainerBase, resolve_service_class};

type Instance = Arc<dyn Any + Send + Sync>;

/// A compiled container loaded from its artifact
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    class_name: String,
    debug: bool,
    parameters: IndexMap<String, Value>,
    factories: IndexMap<String, ServiceFactory>,
    aliases: IndexMap<String, Alias>,
    base: Box<dyn ContainerBase>,
    instances: Mutex<HashMap<String, Instance>>,
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("class_name", &self.inner.class_name)
            .field("base", &self.inner.base.name())
            .field("debug", &self.inner.debug)
            .field("services", &self.inner.factories.keys().collect::<Vec<_>>())
            .field("aliases", &self.inner.aliases)
            .finish()
    }
}

impl Container {
    /// Assemble a container from its loaded parts
    pub fn new(
        class_name: impl Into<String>,
        debug: bool,
        parameters: IndexMap<String, Value>,
        factories: IndexMap<String, ServiceFactory>,
        aliases: IndexMap<String, Alias>,
        base: Box<dyn ContainerBase>,
    ) -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                class_name: class_name.into(),
                debug,
                parameters,
                factories,
                aliases,
                base,
                instances: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Namespace-qualified class name the artifact was generated for
    pub fn class_name(&self) -> &str {
        &self.inner.class_name
    }

    /// Whether the artifact came from a development build
    pub fn is_debug(&self) -> bool {
        self.inner.debug
    }

    /// The base type instance
    pub fn base(&self) -> &dyn ContainerBase {
        self.inner.base.as_ref()
    }

    /// The base type instance as `T`, `None` when the base is another type
    pub fn base_as<T: ContainerBase>(&self) -> Option<&T> {
        self.inner.base.downcast_ref::<T>()
    }

    // ========================================================================
    // Services
    // ========================================================================

    /// Whether `id` is a public service or a public alias
    pub fn has(&self, id: &str) -> bool {
        self.public_target(id).is_ok()
    }

    /// Ids of every public service and alias
    pub fn service_ids(&self) -> Vec<String> {
        self.inner
            .factories
            .iter()
            .filter(|(_, factory)| factory.public)
            .map(|(id, _)| id.clone())
            .chain(
                self.inner
                    .aliases
                    .iter()
                    .filter(|(_, alias)| alias.public)
                    .map(|(id, _)| id.clone()),
            )
            .collect()
    }

    /// The public service `id`
    ///
    /// # Errors
    ///
    /// `ServiceNotFound` for unknown ids, `PrivateService` for services the
    /// build kept private, or the factory's error wrapped as an internal error.
    pub fn get(&self, id: &str) -> Result<Instance> {
        let target = self.public_target(id)?;
        self.inner.instantiate(&target, &mut Vec::new())
    }

    /// The public service `id` downcast to `T`
    pub fn get_as<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>> {
        self.get(id)?.downcast::<T>().map_err(|_| {
            Error::internal(format!(
                "Service \"{id}\" is not of the requested type {}",
                std::any::type_name::<T>()
            ))
        })
    }

    fn public_target(&self, id: &str) -> Result<String> {
        if let Some(alias) = self.inner.aliases.get(id) {
            if !alias.public {
                return Err(Error::private_service(id));
            }
            return self
                .inner
                .resolve(&alias.target)
                .ok_or_else(|| Error::service_not_found(id));
        }
        match self.inner.factories.get(id) {
            Some(factory) if factory.public => Ok(id.to_string()),
            Some(_) => Err(Error::private_service(id)),
            None => Err(Error::service_not_found(id)),
        }
    }

    // ========================================================================
    // Parameters
    // ========================================================================

    /// Compiled value of parameter `name`
    pub fn parameter(&self, name: &str) -> Result<&Value> {
        self.inner
            .parameters
            .get(name)
            .ok_or_else(|| Error::not_found(format!("parameter \"{name}\"")))
    }

    /// Whether parameter `name` exists
    pub fn has_parameter(&self, name: &str) -> bool {
        self.inner.parameters.contains_key(name)
    }

    /// Every compiled parameter
    pub fn parameters(&self) -> &IndexMap<String, Value> {
        &self.inner.parameters
    }
}

impl ContainerInner {
    fn resolve(&self, id: &str) -> Option<String> {
        let mut current = id;
        for _ in 0..=self.aliases.len() {
            if self.factories.contains_key(current) {
                return Some(current.to_string());
            }
            current = self.aliases.get(current)?.target.as_str();
        }
        None
    }

    fn instantiate(self: &Arc<Self>, id: &str, stack: &mut Vec<String>) -> Result<Instance> {
        if let Some(instance) = self.cached(id) {
            return Ok(instance);
        }
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| Error::service_not_found(id))?;

        if stack.iter().any(|seen| seen == id) {
            stack.push(id.to_string());
            return Err(Error::internal(format!(
                "Circular reference while instantiating \"{id}\": {}",
                stack.join(" -> ")
            )));
        }
        stack.push(id.to_string());

        let mut arguments = Vec::with_capacity(factory.arguments.len());
        for argument in &factory.arguments {
            arguments.push(self.resolve_argument(id, argument, stack)?);
        }

        let class = resolve_service_class(&factory.class).ok_or_else(|| {
            Error::configuration(format!(
                "Service \"{id}\" uses class \"{}\" which is not registered",
                factory.class
            ))
        })?;
        let instance = (class.factory)(&arguments).map_err(|e| {
            Error::internal(format!(
                "Cannot instantiate service \"{id}\" of class \"{}\": {e}",
                factory.class
            ))
        })?;
        stack.pop();

        trace!(service = id, class = %factory.class, "Service instantiated");
        if factory.shared {
            self.instances
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(id.to_string(), Arc::clone(&instance));
        }
        Ok(instance)
    }

    fn cached(&self, id: &str) -> Option<Instance> {
        self.instances
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    fn resolve_argument(
        self: &Arc<Self>,
        service: &str,
        argument: &Argument,
        stack: &mut Vec<String>,
    ) -> Result<ServiceArgument> {
        match argument {
            Argument::Value { value } => Ok(ServiceArgument::Value(value.clone())),
            Argument::Parameter { name } => self
                .parameters
                .get(name)
                .cloned()
                .map(ServiceArgument::Value)
                .ok_or_else(|| Error::not_found(format!("parameter \"{name}\""))),
            Argument::List { items } => items
                .iter()
                .map(|item| self.resolve_argument(service, item, stack))
                .collect::<Result<Vec<_>>>()
                .map(ServiceArgument::List),
            Argument::Reference { id, optional } => {
                let Some(target) = self.resolve(id) else {
                    if *optional {
                        return Ok(ServiceArgument::Value(Value::Null));
                    }
                    return Err(Error::internal(format!(
                        "Service \"{service}\" depends on \"{id}\" which is not in the container"
                    )));
                };
                let lazy = self
                    .factories
                    .get(&target)
                    .is_some_and(|factory| factory.lazy);
                if lazy {
                    return Ok(ServiceArgument::Lazy(LazyService {
                        id: target,
                        container: Arc::downgrade(self),
                    }));
                }
                self.instantiate(&target, stack).map(ServiceArgument::Service)
            }
        }
    }
}

/// Handle to a lazy service, instantiated on first [`get`](Self::get)
#[derive(Clone)]
pub struct LazyService {
    id: String,
    container: Weak<ContainerInner>,
}

impl LazyService {
    /// Id of the service behind the handle
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The service instance (built on first access when shared)
    ///
    /// # Errors
    ///
    /// An internal error once the owning container was dropped, or whatever
    /// instantiating the service fails with.
    pub fn get(&self) -> Result<Instance> {
        let container = self.container.upgrade().ok_or_else(|| {
            Error::internal(format!(
                "The container owning lazy service \"{}\" was dropped",
                self.id
            ))
        })?;
        container.instantiate(&self.id, &mut Vec::new())
    }
}

impl fmt::Debug for LazyService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyService").field("id", &self.id).finish()
    }
}
