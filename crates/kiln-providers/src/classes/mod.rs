//! Built-in Service Classes and Container Bases
//!
//! | Name | Registry | Type |
//! |------|----------|------|
//! | `stdClass` | service classes | [`GenericObject`] |
//! | `Container` | container bases | [`DefaultContainerBase`] |

pub mod base;
pub mod generic;

pub use base::DefaultContainerBase;
pub use generic::GenericObject;
