//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns of kiln builds.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Filesystem freshness gate for container artifacts |
//! | [`config`] | Settings loading with figment |
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context helpers for foreign errors |
//! | [`utils`] | Atomic file writes |

pub mod cache;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod utils;

pub use cache::ConfigCache;
pub use config::{BuildSettings, KilnSettings, LoggingConfig, SettingsLoader};
pub use error_ext::ErrorContext;
pub use logging::{init_logging, parse_log_level};
