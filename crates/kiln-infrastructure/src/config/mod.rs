//! Settings
//!
//! [`KilnSettings`] describes a build and its logging; [`SettingsLoader`]
//! merges defaults, a TOML file and `KILN_` environment variables.

pub mod loader;
pub mod types;

pub use loader::SettingsLoader;
pub use types::{BuildSettings, KilnSettings, LoggingConfig};
