//! Container builder facade
//!
//! The only entry point most applications need: collect files, paths,
//! passes, packages and parameters, then ask for the container.
//!
//! Every builder starts with three parameters and registers its
//! [`ParameterStore`] as the very first pass of the build:
//!
//! | Parameter | Default | Development mode |
//! |-----------|---------|------------------|
//! | `app.devmode` | `false` | `true` |
//! | `container.dumper.inline_factories` | `false` | `false` |
//! | `container.dumper.inline_class_loader` | `true` | `false` |

use std::path::PathBuf;
use std::sync::Arc;

use kiln_application::passes::MakeServicesPublic;
use kiln_application::ports::SourceLoaderSelector;
use kiln_application::{BuildConfiguration, Container, Generator, ParameterStore};
use kiln_domain::constants::{
    DEFAULT_PRIORITY, PARAM_DEV_MODE, PARAM_INLINE_CLASS_LOADER, PARAM_INLINE_FACTORIES,
    TEST_ARTIFACT_PREFIX,
};
use kiln_domain::error::{Error, Result};
use kiln_domain::ports::CompilerPass;
use kiln_domain::value_objects::PassStage;
use kiln_infrastructure::cache::ConfigCache;
use kiln_infrastructure::config::KilnSettings;
use kiln_providers::dumper::JsonDumper;
use kiln_providers::selector::{DelegatingSelector, FormatSelector, resolve_selector};
use serde_json::Value;
use tracing::debug;

/// Fluent builder of compiled containers
///
/// A clone gets its own copy of the parameter store, so setting parameters
/// or switching to development mode on one builder never affects the other.
#[derive(Debug)]
pub struct ContainerBuilder {
    config: BuildConfiguration,
    generator: Generator,
    parameters: Arc<ParameterStore>,
}

impl Clone for ContainerBuilder {
    fn clone(&self) -> Self {
        let parameters = Arc::new(ParameterStore::from_map(self.parameters.all()));
        let mut config = self.config.clone();
        let current = Arc::clone(&self.parameters) as Arc<dyn CompilerPass>;
        config.replace_pass(&current, Arc::clone(&parameters) as Arc<dyn CompilerPass>);

        Self {
            config,
            generator: self.generator.clone(),
            parameters,
        }
    }
}

impl ContainerBuilder {
    /// Builder over `config`, `generator` and `parameters`
    ///
    /// Sets the default parameters on `parameters` and appends it to the
    /// pass list of `config`.
    pub fn new(
        mut config: BuildConfiguration,
        generator: Generator,
        parameters: Arc<ParameterStore>,
    ) -> Self {
        parameters.set(PARAM_DEV_MODE, false);
        parameters.set(PARAM_INLINE_FACTORIES, false);
        parameters.set(PARAM_INLINE_CLASS_LOADER, true);

        config.add_pass(
            Arc::clone(&parameters) as Arc<dyn CompilerPass>,
            PassStage::BeforeOptimization,
            DEFAULT_PRIORITY,
        );

        Self {
            config,
            generator,
            parameters,
        }
    }

    /// Builder for `namespace` loading sources through `selector`
    ///
    /// `config_file` is the file declaring the build, tracked by every
    /// artifact so that editing it triggers a rebuild in development mode.
    pub fn with_selector(
        selector: Arc<dyn SourceLoaderSelector>,
        config_file: impl Into<PathBuf>,
        namespace: impl Into<String>,
    ) -> Self {
        let generator = Generator::new(selector, Arc::new(JsonDumper::new()), config_file);
        Self::new(
            BuildConfiguration::new(namespace),
            generator,
            Arc::new(ParameterStore::new()),
        )
    }

    /// Builder reading YAML definition files
    pub fn yaml(config_file: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self::with_selector(Arc::new(FormatSelector::yaml()), config_file, namespace)
    }

    /// Builder reading JSON definition files
    pub fn json(config_file: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self::with_selector(Arc::new(FormatSelector::json()), config_file, namespace)
    }

    /// Builder reading TOML definition files
    pub fn toml(config_file: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self::with_selector(Arc::new(FormatSelector::toml()), config_file, namespace)
    }

    /// Builder picking the format of every file from its extension
    pub fn delegating(config_file: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self::with_selector(Arc::new(DelegatingSelector), config_file, namespace)
    }

    /// Builder pre-populated from loaded settings
    ///
    /// # Errors
    ///
    /// A configuration error when the settings name an unknown format.
    pub fn from_settings(settings: &KilnSettings, config_file: impl Into<PathBuf>) -> Result<Self> {
        let build = &settings.build;
        let selector = resolve_selector(&build.format)?;

        let mut builder = Self::with_selector(selector, config_file, build.namespace.clone())
            .set_dump_dir(&build.dump_dir);
        for path in &build.paths {
            builder = builder.add_path(path.clone());
        }
        for file in &build.files {
            builder = builder.add_file(file.clone());
        }
        if let Some(base_class) = &build.base_class {
            builder = builder.set_base_class(base_class.clone());
        }
        if build.dev_mode {
            builder = builder.use_development_mode();
        }

        debug!(
            namespace = %build.namespace,
            format = %build.format,
            files = build.files.len(),
            "Builder created from settings"
        );
        Ok(builder)
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    /// Swap the generator (and with it the source format)
    #[must_use]
    pub fn set_generator(mut self, generator: Generator) -> Self {
        self.generator = generator;
        self
    }

    /// Append a definition file
    #[must_use]
    pub fn add_file(mut self, file: impl Into<String>) -> Self {
        self.config.add_file(file);
        self
    }

    /// Append a live pass at the `before_optimization` stage with the default priority
    #[must_use]
    pub fn add_pass(self, pass: Arc<dyn CompilerPass>) -> Self {
        self.add_pass_at(pass, PassStage::BeforeOptimization, DEFAULT_PRIORITY)
    }

    /// Append a live pass at `stage` with `priority`
    #[must_use]
    pub fn add_pass_at(mut self, pass: Arc<dyn CompilerPass>, stage: PassStage, priority: i32) -> Self {
        self.config.add_pass(pass, stage, priority);
        self
    }

    /// Append a pass built from its registered kind at the `before_optimization` stage
    #[must_use]
    pub fn add_delayed_pass(self, kind: impl Into<String>, arguments: Vec<Value>) -> Self {
        self.add_delayed_pass_at(kind, arguments, PassStage::BeforeOptimization, DEFAULT_PRIORITY)
    }

    /// Append a pass built from its registered kind at `stage` with `priority`
    #[must_use]
    pub fn add_delayed_pass_at(
        mut self,
        kind: impl Into<String>,
        arguments: Vec<Value>,
        stage: PassStage,
        priority: i32,
    ) -> Self {
        self.config.add_delayed_pass(kind, arguments, stage, priority);
        self
    }

    /// Declare a package by registered kind and constructor arguments
    #[must_use]
    pub fn add_package(mut self, kind: impl Into<String>, arguments: Vec<Value>) -> Self {
        self.config.add_package(kind, arguments);
        self
    }

    /// Development mode: resource-checked cache and per-service artifact files
    #[must_use]
    pub fn use_development_mode(self) -> Self {
        self.parameters.set(PARAM_DEV_MODE, true);
        self.parameters.set(PARAM_INLINE_CLASS_LOADER, false);
        self
    }

    /// Directory the artifacts are dumped into
    #[must_use]
    pub fn set_dump_dir(mut self, dir: impl AsRef<std::path::Path>) -> Self {
        self.config.set_dump_dir(dir);
        self
    }

    /// Set a parameter injected into every build
    #[must_use]
    pub fn set_parameter(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.set(name, value);
        self
    }

    /// Append a search path for relative files
    #[must_use]
    pub fn add_path(mut self, path: impl Into<String>) -> Self {
        self.config.add_path(path);
        self
    }

    /// Override the base type of the generated container
    #[must_use]
    pub fn set_base_class(mut self, class: impl Into<String>) -> Self {
        self.config.set_base_class(class);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The build configuration
    pub fn configuration(&self) -> &BuildConfiguration {
        &self.config
    }

    /// The generator
    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    /// The parameter store injected as the first pass
    pub fn parameters(&self) -> &ParameterStore {
        &self.parameters
    }

    // ========================================================================
    // Containers
    // ========================================================================

    /// The compiled container, rebuilt only when its artifact is stale
    ///
    /// # Errors
    ///
    /// A configuration error when `app.devmode` is not a boolean, otherwise
    /// whatever stage of the build failed.
    pub fn get_container(&self) -> Result<Container> {
        let gate = ConfigCache::new(self.config.dump_file(""), self.dev_mode()?);
        self.generator.generate(&self.config, &gate)
    }

    /// A container in which every service is public
    ///
    /// Built from a copy of the configuration with an extra pass at the
    /// `before_removing` stage, into its own `test_` artifact that is always
    /// resource-checked.
    pub fn get_test_container(&self) -> Result<Container> {
        let mut config = self.config.clone();
        config.add_pass(
            Arc::new(MakeServicesPublic),
            PassStage::BeforeRemoving,
            DEFAULT_PRIORITY,
        );

        let gate = ConfigCache::new(config.dump_file(TEST_ARTIFACT_PREFIX), true);
        self.generator.generate(&config, &gate)
    }

    fn dev_mode(&self) -> Result<bool> {
        match self.parameters.get(PARAM_DEV_MODE, Value::Bool(false)) {
            Value::Bool(dev_mode) => Ok(dev_mode),
            other => Err(Error::configuration(format!(
                "Parameter \"{PARAM_DEV_MODE}\" must be a boolean, got {other}"
            ))),
        }
    }
}
