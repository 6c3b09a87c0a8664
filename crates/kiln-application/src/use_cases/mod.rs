//! Use Cases
//!
//! | Use case | Description |
//! |----------|-------------|
//! | [`Compiler`] | Freshness check, load, passes, compile, dump, persist |
//! | [`Generator`] | Loader selection, registry initialization, compile then load |
//! | [`ArtifactLoader`] | Turns a persisted artifact into a [`Container`](crate::runtime::Container) |

/// Loading persisted artifacts
pub mod artifact_loader;
/// The build coordinator
pub mod compiler;
/// Registry initialization and the compile-then-load entry point
pub mod generator;

pub use artifact_loader::ArtifactLoader;
pub use compiler::Compiler;
pub use generator::Generator;
