//! Application Layer - kiln
//!
//! Orchestrates a container build: what to build ([`BuildConfiguration`]),
//! how sources become a registry ([`Generator`]), when and how the registry
//! is compiled and persisted ([`Compiler`]) and how the artifact comes back
//! to life ([`ArtifactLoader`], [`Container`]).
//!
//! ## Architecture
//!
//! - `configuration`: build description, package aggregation, parameter store
//! - `ports`: loader selection, initialization and the factory registries
//! - `use_cases`: compiler, generator, artifact loader
//! - `runtime`: the loaded container
//! - `passes`: visibility override and development dump passes
//!
//! ## Dependencies
//!
//! This crate depends only on `kiln-domain` and pure libraries. Formats, the
//! dumper and the filesystem gate are plugged in from `kiln-providers` and
//! `kiln-infrastructure`.

pub mod configuration;
pub mod passes;
pub mod ports;
pub mod runtime;
pub mod use_cases;

pub use configuration::*;
pub use passes::*;
pub use ports::*;
pub use runtime::*;
pub use use_cases::*;
