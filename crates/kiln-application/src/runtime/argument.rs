//! Resolved constructor arguments

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::LazyService;

/// A constructor argument after references were resolved
#[derive(Clone)]
pub enum ServiceArgument {
    /// A literal (parameters already substituted)
    Value(Value),
    /// An instantiated dependency
    Service(Arc<dyn Any + Send + Sync>),
    /// A lazy dependency, instantiated on first access
    Lazy(LazyService),
    /// A list of arguments
    List(Vec<ServiceArgument>),
}

impl fmt::Debug for ServiceArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceArgument::Value(value) => f.debug_tuple("Value").field(value).finish(),
            ServiceArgument::Service(_) => f.write_str("Service(..)"),
            ServiceArgument::Lazy(lazy) => f.debug_tuple("Lazy").field(&lazy.id()).finish(),
            ServiceArgument::List(items) => f.debug_tuple("List").field(items).finish(),
        }
    }
}

impl ServiceArgument {
    /// The literal, if this is a value
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ServiceArgument::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The literal as a string slice
    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    /// The dependency downcast to `T`
    ///
    /// Lazy dependencies are instantiated by this call; `None` when the
    /// argument is not a service, the lazy service fails to build, or the
    /// service is not a `T`.
    pub fn service<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let service = match self {
            ServiceArgument::Service(service) => Arc::clone(service),
            ServiceArgument::Lazy(lazy) => lazy.get().ok()?,
            _ => return None,
        };
        service.downcast::<T>().ok()
    }

    /// The list elements, if this is a list
    pub fn as_list(&self) -> Option<&[ServiceArgument]> {
        match self {
            ServiceArgument::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this is a `null` literal (e.g. a missing optional reference)
    pub fn is_null(&self) -> bool {
        matches!(self, ServiceArgument::Value(Value::Null))
    }
}
