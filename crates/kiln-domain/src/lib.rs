//! Domain Layer - kiln
//!
//! Core types of the container build pipeline: the service registry and its
//! built-in compiler passes, the value objects a build is described with,
//! and the port traits the application layer orchestrates.
//!
//! ## Architecture
//!
//! - `entities`: [`ServiceRegistry`] and [`ParameterBag`]
//! - `value_objects`: definitions, arguments, pass entries, artifact layout
//! - `ports`: [`CompilerPass`], [`Package`], [`SourceLoader`],
//!   [`ContainerDumper`], [`FreshnessGate`]
//!
//! This crate has no knowledge of file formats, the filesystem cache or the
//! settings layer; those live in `kiln-providers` and `kiln-infrastructure`.

pub mod constants;
pub mod entities;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use entities::*;
pub use error::{Error, Result};
pub use ports::*;
pub use value_objects::*;
