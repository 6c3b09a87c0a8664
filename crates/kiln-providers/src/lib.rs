//! # kiln - Provider Implementations
//!
//! Concrete collaborators plugged into the build pipeline. Each one
//! implements a port defined in `kiln-domain` or `kiln-application`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Loaders | `SourceLoader` | `FileLoader` (YAML, JSON, TOML), `DelegatingLoader` |
//! | Selectors | `SourceLoaderSelector` | `FormatSelector`, `DelegatingSelector` |
//! | Dumpers | `ContainerDumper` | `JsonDumper` |
//! | Classes | service class / base registries | `stdClass`, `Container` |
//!
//! ## Usage
//!
//! ```ignore
//! use kiln_providers::dumper::JsonDumper;
//! use kiln_providers::selector::FormatSelector;
//! ```

// Re-export kiln-domain types commonly used with providers
pub use kiln_domain::error::{Error, Result};
pub use kiln_domain::ports::{ContainerDumper, SourceLoader};

/// Built-in service classes and container bases
pub mod classes;

/// Provider-specific constants
pub mod constants;

/// Artifact dumpers
pub mod dumper;

/// Definition file loaders
pub mod loader;

/// Source loader selectors
pub mod selector;

pub use classes::{DefaultContainerBase, GenericObject};
pub use dumper::JsonDumper;
pub use loader::{DelegatingLoader, FileLoader, FileLocator, SourceFormat};
pub use selector::{DelegatingSelector, FormatSelector, resolve_selector};
