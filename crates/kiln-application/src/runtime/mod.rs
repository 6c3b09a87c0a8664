//! Runtime container
//!
//! The loaded form of a compiled artifact: looks services up by id and
//! instantiates them through the service class registry.

/// Constructor arguments handed to service factories
pub mod argument;
/// The loaded container
pub mod container;

pub use argument::ServiceArgument;
pub use container::{Container, LazyService};
