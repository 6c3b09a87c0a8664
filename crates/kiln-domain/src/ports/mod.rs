//! Domain Port Interfaces
//!
//! Contracts between the build pipeline and its pluggable collaborators.
//!
//! | Port | Implemented by |
//! |------|----------------|
//! | [`CompilerPass`] | parameter store, testing passes, user passes |
//! | [`Package`] | reusable bundles of files and passes |
//! | [`SourceLoader`] | format loaders in `kiln-providers` |
//! | [`ContainerDumper`] | JSON dumper in `kiln-providers` |
//! | [`FreshnessGate`] | filesystem cache in `kiln-infrastructure` |

/// Artifact serialization port
pub mod dumper;
/// Cache freshness port
pub mod gate;
/// Definition source loading port
pub mod loader;
/// Package capability ports
pub mod package;
/// Registry transformation port
pub mod pass;

pub use dumper::ContainerDumper;
pub use gate::FreshnessGate;
pub use loader::SourceLoader;
pub use package::{FileContributor, Package, PassContributor};
pub use pass::CompilerPass;
