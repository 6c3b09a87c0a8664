//! Domain Value Objects
//!
//! Immutable value objects that describe a build: definitions, arguments,
//! pass declarations and the serialized artifact layout.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`PassStage`] | Stage a compiler pass runs in |
//! | [`PassEntry`] | Live or delayed pass with stage and priority |
//! | [`Argument`] | Constructor argument (value, reference, parameter) |
//! | [`ServiceDefinition`] | Building-form service description |
//! | [`FileResource`] | File tracked for cache invalidation |
//! | [`ContainerManifest`] | Root artifact of a compiled container |

/// Service constructor arguments
pub mod argument;
/// Service and alias definitions
pub mod definition;
/// Serialized container layout
pub mod manifest;
/// Declared compiler passes
pub mod pass_entry;
/// Tracked build dependencies
pub mod resource;
/// Compiler pass stages
pub mod stage;

pub use argument::Argument;
pub use definition::{Alias, ServiceDefinition};
pub use manifest::{
    ClassMap, ContainerManifest, DumpOptions, ProxyDescriptor, ServiceEntry, ServiceFactory,
};
pub use pass_entry::{DelayedPass, PassEntry, PassTarget};
pub use resource::{FileResource, fingerprint};
pub use stage::PassStage;
