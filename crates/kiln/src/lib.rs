//! # kiln
//!
//! Compiles service definition files into cached, loadable
//! dependency-injection containers.
//!
//! A build reads YAML, JSON or TOML definition files into a service
//! registry, runs its compiler passes, dumps the compiled registry as JSON
//! artifacts and loads them back as a [`Container`]. Artifacts are reused
//! while they are fresh: in production as soon as they exist, in
//! development mode for as long as none of the files they were built from
//! changed.
//!
//! ## Example
//!
//! ```ignore
//! use kiln::ContainerBuilder;
//!
//! let container = ContainerBuilder::yaml("kiln.toml", "Acme")
//!     .add_path("config")
//!     .add_file("services.yml")
//!     .set_dump_dir("var/cache")
//!     .use_development_mode()
//!     .get_container()?;
//!
//! let mailer = container.get("mailer")?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - registry, value objects, ports and the error type
//! - `application` - build configuration, compiler, generator, runtime container
//! - `providers` - format loaders, the JSON dumper, built-in classes
//! - `infrastructure` - freshness gate, settings and logging

/// Container builder facade
pub mod builder;

/// Domain layer - registry, value objects and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use kiln_domain::*;
}

/// Application layer - configuration, use cases and runtime
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use kiln_application::*;
}

/// Providers - loaders, selectors, dumper and built-in classes
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use kiln_providers::*;
}

/// Infrastructure layer - freshness gate, settings and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use kiln_infrastructure::*;
}

pub use builder::ContainerBuilder;

// Commonly used types at the crate root
pub use kiln_application::{BuildConfiguration, Container, Generator, ParameterStore};
pub use kiln_domain::error::{Error, Result};
pub use kiln_domain::value_objects::PassStage;
pub use kiln_infrastructure::{ConfigCache, KilnSettings, SettingsLoader, init_logging};
