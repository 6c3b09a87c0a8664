//! Settings loader
//!
//! Sources are merged in this order, later ones overriding earlier ones:
//! 1. [`KilnSettings::default`]
//! 2. the TOML file given to [`SettingsLoader::with_config_path`], or the
//!    first `kiln.toml` found in the current directory or the platform
//!    config directory
//! 3. environment variables such as `KILN_BUILD__NAMESPACE`

use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use kiln_domain::error::{Error, Result};

use crate::config::KilnSettings;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
    SUPPORTED_FORMATS,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};

/// Settings loader service
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    /// Loader with default discovery and the `KILN` environment prefix
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Read settings from `path` instead of discovering `kiln.toml`
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// The explicit settings file, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Load and validate settings from every source
    pub fn load(&self) -> Result<KilnSettings> {
        let mut figment = Figment::new().merge(Serialized::defaults(KilnSettings::default()));

        if let Some(config_path) = &self.config_path {
            let exists = config_path.is_file();
            if exists {
                figment = figment.merge(Toml::file(config_path));
            }
            log_config_loaded(config_path, exists);
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let settings: KilnSettings = figment
            .extract()
            .config_context("Failed to extract settings")?;
        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Write `settings` as TOML to `path`
    pub fn save_to_file<P: AsRef<Path>>(&self, settings: &KilnSettings, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(settings).config_context("Failed to serialize settings")?;
        std::fs::write(path.as_ref(), content).io_context(format!(
            "Failed to write settings file {}",
            path.as_ref().display()
        ))
    }

    fn find_default_config_path() -> Option<PathBuf> {
        let mut candidates = Vec::new();
        if let Ok(current_dir) = env::current_dir() {
            candidates.push(current_dir.join(DEFAULT_CONFIG_FILENAME));
        }
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(
                config_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            );
        }
        candidates.into_iter().find(|path| path.is_file())
    }
}

/// Validate loaded settings
pub fn validate_settings(settings: &KilnSettings) -> Result<()> {
    if settings.build.namespace.trim().is_empty() {
        return Err(Error::configuration("Build namespace cannot be empty"));
    }
    if !SUPPORTED_FORMATS.contains(&settings.build.format.as_str()) {
        return Err(Error::configuration(format!(
            "Unknown source format \"{}\", expected one of: {}",
            settings.build.format,
            SUPPORTED_FORMATS.join(", ")
        )));
    }
    parse_log_level(&settings.logging.level)?;
    Ok(())
}
