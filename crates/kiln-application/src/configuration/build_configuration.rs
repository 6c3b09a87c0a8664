//! Build configuration
//!
//! Everything one container build needs: source files and search paths, the
//! ordered pass list, declared packages, the base type override and where the
//! artifact goes. Lists are append-only.
//!
//! Packages are declared by kind and arguments and instantiated once, on the
//! first call to [`BuildConfiguration::packages`]. Package contributions come
//! first in [`BuildConfiguration::files`] and [`BuildConfiguration::pass_list`]
//! so the build's own files override package services and the build's own
//! passes see what packages registered.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use kiln_domain::constants::{ARTIFACT_EXTENSION, CONTAINER_CLASS_NAME, NAMESPACE_SEPARATOR};
use kiln_domain::error::Result;
use kiln_domain::ports::{CompilerPass, Package};
use kiln_domain::value_objects::{DumpOptions, PassEntry, PassStage, PassTarget};
use once_cell::sync::OnceCell;
use serde_json::Value;

use crate::ports::registry::resolve_package;

/// A package declared by registered kind and constructor arguments
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDeclaration {
    /// Registered package kind
    pub kind: String,
    /// Constructor arguments, forwarded verbatim to the factory
    pub arguments: Vec<Value>,
}

/// Description of one container build
#[derive(Clone)]
pub struct BuildConfiguration {
    namespace: String,
    files: Vec<String>,
    pass_list: Vec<PassEntry>,
    paths: Vec<String>,
    packages: Vec<PackageDeclaration>,
    base_class: Option<String>,
    dump_dir: PathBuf,
    initialized_packages: OnceCell<Vec<Arc<dyn Package>>>,
}

impl fmt::Debug for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildConfiguration")
            .field("namespace", &self.namespace)
            .field("files", &self.files)
            .field("pass_list", &self.pass_list)
            .field("paths", &self.paths)
            .field("packages", &self.packages)
            .field("base_class", &self.base_class)
            .field("dump_dir", &self.dump_dir)
            .field("packages_initialized", &self.initialized_packages.get().is_some())
            .finish()
    }
}

impl BuildConfiguration {
    /// Empty configuration for `namespace`, dumping into the system temp directory
    pub fn new(namespace: impl Into<String>) -> Self {
        Self::with_dump_dir(namespace, std::env::temp_dir())
    }

    /// Empty configuration for `namespace`, dumping into `dump_dir`
    pub fn with_dump_dir(namespace: impl Into<String>, dump_dir: impl AsRef<Path>) -> Self {
        Self {
            namespace: namespace.into(),
            files: Vec::new(),
            pass_list: Vec::new(),
            paths: Vec::new(),
            packages: Vec::new(),
            base_class: None,
            dump_dir: trim_trailing_separators(dump_dir.as_ref()),
            initialized_packages: OnceCell::new(),
        }
    }

    /// Namespace the generated container lives in
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    // ========================================================================
    // Packages
    // ========================================================================

    /// Declare a package by kind and constructor arguments
    ///
    /// Declaring after the packages were instantiated discards the memoized
    /// instances; the next [`packages`](Self::packages) call builds them all again.
    pub fn add_package(&mut self, kind: impl Into<String>, arguments: Vec<Value>) {
        self.packages.push(PackageDeclaration {
            kind: kind.into(),
            arguments,
        });
        self.initialized_packages = OnceCell::new();
    }

    /// Declared packages, not instantiated
    pub fn package_declarations(&self) -> &[PackageDeclaration] {
        &self.packages
    }

    /// Live package instances in declaration order
    ///
    /// Instantiated on the first call; later calls return the same instances.
    ///
    /// # Errors
    ///
    /// A configuration error for the first declaration whose kind is unknown
    /// or whose arguments its factory rejects.
    pub fn packages(&self) -> Result<&[Arc<dyn Package>]> {
        self.initialized_packages
            .get_or_try_init(|| {
                self.packages
                    .iter()
                    .map(|declared| resolve_package(&declared.kind, &declared.arguments))
                    .collect()
            })
            .map(Vec::as_slice)
    }

    // ========================================================================
    // Files
    // ========================================================================

    /// Append a definition source
    pub fn add_file(&mut self, file: impl Into<String>) {
        self.files.push(file.into());
    }

    /// Every source to load: package files first, then the build's own
    pub fn files(&self) -> Result<Vec<String>> {
        let mut files: Vec<String> = self
            .packages()?
            .iter()
            .filter_map(|package| package.as_file_contributor())
            .flat_map(|contributor| contributor.files())
            .collect();
        files.extend(self.files.iter().cloned());
        Ok(files)
    }

    // ========================================================================
    // Passes
    // ========================================================================

    /// Append a live pass
    pub fn add_pass(&mut self, pass: Arc<dyn CompilerPass>, stage: PassStage, priority: i32) {
        self.pass_list.push(PassEntry::instance(pass, stage, priority));
    }

    /// Append a pass constructed from its registered kind at compile time
    pub fn add_delayed_pass(
        &mut self,
        kind: impl Into<String>,
        arguments: Vec<Value>,
        stage: PassStage,
        priority: i32,
    ) {
        self.pass_list
            .push(PassEntry::delayed(kind, arguments, stage, priority));
    }

    /// Swap the live pass `current` for `replacement`, keeping its stage and priority
    ///
    /// Returns whether `current` was found among the build's own passes.
    pub fn replace_pass(
        &mut self,
        current: &Arc<dyn CompilerPass>,
        replacement: Arc<dyn CompilerPass>,
    ) -> bool {
        let current = Arc::as_ptr(current).cast::<()>();
        let Some(entry) = self.pass_list.iter_mut().find(|entry| {
            entry
                .as_instance()
                .is_some_and(|pass| Arc::as_ptr(pass).cast::<()>() == current)
        }) else {
            return false;
        };
        entry.target = PassTarget::Instance(replacement);
        true
    }

    /// Every pass to register: package passes first, then the build's own
    pub fn pass_list(&self) -> Result<Vec<PassEntry>> {
        let mut passes: Vec<PassEntry> = self
            .packages()?
            .iter()
            .filter_map(|package| package.as_pass_contributor())
            .flat_map(|contributor| contributor.compiler_passes())
            .collect();
        passes.extend(self.pass_list.iter().cloned());
        Ok(passes)
    }

    // ========================================================================
    // Paths, base class, output
    // ========================================================================

    /// Append a search path for relative sources
    pub fn add_path(&mut self, path: impl Into<String>) {
        self.paths.push(path.into());
    }

    /// Search paths in lookup order
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Base type override of the generated container
    pub fn base_class(&self) -> Option<&str> {
        self.base_class.as_deref()
    }

    /// Override the base type of the generated container
    pub fn set_base_class(&mut self, base_class: impl Into<String>) {
        self.base_class = Some(base_class.into());
    }

    /// Copy of this configuration with `namespace` appended to the namespace
    pub fn with_sub_namespace(&self, namespace: &str) -> Self {
        let mut config = self.clone();
        config.namespace = format!(
            "{}{}{}",
            self.namespace,
            NAMESPACE_SEPARATOR,
            namespace.trim_start_matches(NAMESPACE_SEPARATOR)
        );
        config
    }

    /// Directory artifacts are dumped into
    pub fn dump_dir(&self) -> &Path {
        &self.dump_dir
    }

    /// Change the dump directory (trailing separators are dropped)
    pub fn set_dump_dir(&mut self, dump_dir: impl AsRef<Path>) {
        self.dump_dir = trim_trailing_separators(dump_dir.as_ref());
    }

    /// Root artifact path: `<dump_dir>/<namespace slug>/<prefix>AppContainer.json`
    pub fn dump_file(&self, prefix: &str) -> PathBuf {
        self.dump_dir
            .join(self.namespace_slug())
            .join(format!("{prefix}{CONTAINER_CLASS_NAME}.{ARTIFACT_EXTENSION}"))
    }

    /// Namespace-qualified class name of the generated container
    pub fn class_name(&self) -> String {
        format!("{}{}{}", self.namespace, NAMESPACE_SEPARATOR, CONTAINER_CLASS_NAME)
    }

    /// Dumper options derived from this configuration
    ///
    /// `file` and `debug` are filled in by the compiler from the gate and the
    /// compiled registry.
    pub fn dump_options(&self) -> DumpOptions {
        let mut options = DumpOptions::new(self.namespace.clone(), PathBuf::new());
        options.base_class = self.base_class.clone();
        options
    }

    fn namespace_slug(&self) -> String {
        self.namespace
            .replace(NAMESPACE_SEPARATOR, "_")
            .to_lowercase()
    }
}

fn trim_trailing_separators(dir: &Path) -> PathBuf {
    let raw = dir.to_string_lossy();
    let trimmed = raw.trim_end_matches(std::path::is_separator);
    if trimmed.is_empty() {
        return dir.to_path_buf();
    }
    PathBuf::from(trimmed)
}
