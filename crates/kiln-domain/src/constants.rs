//! Domain layer constants
//!
//! Names shared between the build pipeline, the registry and the generated
//! artifacts. Infrastructure-specific constants (env prefixes, file names of
//! settings) remain in `kiln_infrastructure::constants`.

// ============================================================================
// PASS ORDERING
// ============================================================================

/// Priority given to passes registered without an explicit one
pub const DEFAULT_PRIORITY: i32 = 0;

// ============================================================================
// WELL-KNOWN PARAMETERS
// ============================================================================

/// Development mode flag, read by the dumper to decide on debug output
pub const PARAM_DEV_MODE: &str = "app.devmode";

/// When true every service factory is inlined into the root artifact
pub const PARAM_INLINE_FACTORIES: &str = "container.dumper.inline_factories";

/// When true the class map is embedded in the root artifact
pub const PARAM_INLINE_CLASS_LOADER: &str = "container.dumper.inline_class_loader";

// ============================================================================
// ARTIFACT NAMING
// ============================================================================

/// Short name of every generated container type
pub const CONTAINER_CLASS_NAME: &str = "AppContainer";

/// Separator between namespace segments (`Acme::Billing`)
pub const NAMESPACE_SEPARATOR: &str = "::";

/// File extension of the generated artifacts
pub const ARTIFACT_EXTENSION: &str = "json";

/// Suffix of the metadata sidecar written next to the root artifact
pub const META_SUFFIX: &str = ".meta";

/// Prefix applied to the artifact of the "test" container variant
pub const TEST_ARTIFACT_PREFIX: &str = "test_";

/// Services tagged with this are always inlined in the root artifact
pub const HOT_PATH_TAG: &str = "container.hot_path";

/// Name of the class-map sidecar when the class loader is not inlined
pub const CLASS_MAP_FILE: &str = "classes.json";

// ============================================================================
// RUNTIME TYPES
// ============================================================================

/// Base type of generated containers when no override is configured
pub const DEFAULT_BASE_CLASS: &str = "Container";

/// Generic empty-object service class
pub const GENERIC_OBJECT_CLASS: &str = "stdClass";
