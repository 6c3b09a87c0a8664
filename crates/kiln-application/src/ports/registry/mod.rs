//! Factory Registry System
//!
//! Packages, delayed compiler passes, service classes and container base
//! types are declared by name plus constructor arguments. The names resolve
//! through `linkme` distributed slices filled at link time, so no runtime
//! reflection is involved.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Factory Registration Flow                     │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Crate defines:     #[linkme::distributed_slice(PACKAGES)]   │
//! │                        static ENTRY: PackageEntry = ...         │
//! │                              ↓                                  │
//! │  2. Registry declares: #[linkme::distributed_slice]             │
//! │                        pub static PACKAGES: [Entry] = [..]      │
//! │                              ↓                                  │
//! │  3. Resolver queries:  PACKAGES.iter()                          │
//! │                              ↓                                  │
//! │  4. Build selects:     add_package("mailer", [..]) → instance   │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use kiln_application::ports::registry::{PackageEntry, PACKAGES};
//!
//! #[linkme::distributed_slice(PACKAGES)]
//! static MAILER_PACKAGE: PackageEntry = PackageEntry {
//!     name: "mailer",
//!     description: "SMTP mailer services",
//!     factory: |args| Ok(Arc::new(MailerPackage::from_arguments(args)?)),
//! };
//! ```

pub mod container_base;
pub mod package;
pub mod pass;
pub mod service_class;

use serde_json::Value;

pub use container_base::{
    CONTAINER_BASES, ContainerBase, ContainerBaseEntry, has_container_base, list_container_bases,
    resolve_container_base,
};
pub use package::{PACKAGES, PackageEntry, list_packages, resolve_package};
pub use pass::{COMPILER_PASSES, CompilerPassEntry, list_compiler_passes, resolve_compiler_pass};
pub use service_class::{
    SERVICE_CLASSES, ServiceClassEntry, has_service_class, list_service_classes,
    resolve_service_class,
};

/// Check that a factory received exactly `expected` constructor arguments
///
/// Factories call this first so arity mistakes surface with the declared
/// name instead of as an index panic.
pub fn check_arity(name: &str, arguments: &[Value], expected: usize) -> Result<(), String> {
    if arguments.len() != expected {
        return Err(format!(
            "'{}' expects {} constructor argument(s), {} given",
            name,
            expected,
            arguments.len()
        ));
    }
    Ok(())
}
