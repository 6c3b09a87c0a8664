//! Application Ports
//!
//! Contracts the build pipeline depends on, on top of the domain ports:
//!
//! | Port | Description |
//! |------|-------------|
//! | [`SourceLoaderSelector`] | Picks the loader for a source format |
//! | [`ContainerInitializer`] | Produces a populated, uncompiled registry |
//! | [`registry`] | Factory registries for packages, passes, classes, bases |

pub mod initializer;
pub mod registry;
pub mod selector;

pub use initializer::ContainerInitializer;
pub use kiln_domain::ports::{
    CompilerPass, ContainerDumper, FileContributor, FreshnessGate, Package, PassContributor,
    SourceLoader,
};
pub use selector::SourceLoaderSelector;
