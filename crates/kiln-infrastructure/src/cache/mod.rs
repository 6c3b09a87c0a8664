//! Artifact caching

pub mod config_cache;

pub use config_cache::{CacheMeta, ConfigCache, ResourceFingerprint};
