//! Source Loader Selectors
//!
//! | Selector | Name | Loader |
//! |----------|------|--------|
//! | [`FormatSelector::yaml`] | `yaml` | YAML only |
//! | [`FormatSelector::json`] | `json` | JSON only |
//! | [`FormatSelector::toml`] | `toml` | TOML only |
//! | [`DelegatingSelector`] | `delegating` | YAML, JSON and TOML |

use std::sync::Arc;

use kiln_application::ports::SourceLoaderSelector;
use kiln_domain::error::{Error, Result};
use kiln_domain::ports::SourceLoader;

use crate::loader::{DelegatingLoader, FileLoader, FileLocator, SourceFormat};

/// Selector for a single format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSelector {
    format: SourceFormat,
}

impl FormatSelector {
    /// Selector for `format`
    pub fn new(format: SourceFormat) -> Self {
        Self { format }
    }

    /// YAML-only selector
    pub fn yaml() -> Self {
        Self::new(SourceFormat::Yaml)
    }

    /// JSON-only selector
    pub fn json() -> Self {
        Self::new(SourceFormat::Json)
    }

    /// TOML-only selector
    pub fn toml() -> Self {
        Self::new(SourceFormat::Toml)
    }
}

impl SourceLoaderSelector for FormatSelector {
    fn name(&self) -> &str {
        self.format.name()
    }

    fn loader(&self, paths: &[String]) -> Arc<dyn SourceLoader> {
        Arc::new(FileLoader::new(self.format, FileLocator::new(paths)))
    }
}

/// Selector for the multi-format loader
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelegatingSelector;

impl SourceLoaderSelector for DelegatingSelector {
    fn name(&self) -> &str {
        "delegating"
    }

    fn loader(&self, paths: &[String]) -> Arc<dyn SourceLoader> {
        Arc::new(DelegatingLoader::new(FileLocator::new(paths)))
    }
}

/// Selector registered under `name` (`yaml`, `json`, `toml` or `delegating`)
///
/// # Errors
///
/// A configuration error listing the known names.
pub fn resolve_selector(name: &str) -> Result<Arc<dyn SourceLoaderSelector>> {
    match name.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(Arc::new(FormatSelector::yaml())),
        "json" => Ok(Arc::new(FormatSelector::json())),
        "toml" => Ok(Arc::new(FormatSelector::toml())),
        "delegating" => Ok(Arc::new(DelegatingSelector)),
        other => Err(Error::configuration(format!(
            "Unknown source format '{other}'. Available formats: [\"yaml\", \"json\", \"toml\", \"delegating\"]"
        ))),
    }
}
