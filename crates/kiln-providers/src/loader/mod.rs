//! Source Loader Implementations
//!
//! ## Available Loaders
//!
//! | Loader | Formats | Description |
//! |--------|---------|-------------|
//! | [`FileLoader`] | one of YAML, JSON, TOML | Single-format loader |
//! | [`DelegatingLoader`] | all | Tries YAML, JSON then TOML by extension |
//!
//! Every format shares one document schema (see [`document`]); imports are
//! resolved relative to the importing file first, then against the search
//! paths through the [`FileLocator`].

pub mod delegating;
pub mod document;
pub mod file_loader;
pub mod format;
pub mod locator;

pub use delegating::DelegatingLoader;
pub use file_loader::{FileLoader, ImportResolver};
pub use format::SourceFormat;
pub use locator::FileLocator;
