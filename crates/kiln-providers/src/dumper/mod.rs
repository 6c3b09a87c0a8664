//! Container Dumper Implementations
//!
//! | Dumper | Output |
//! |--------|--------|
//! | [`JsonDumper`] | JSON root manifest plus per-service, proxy and class-map files |

pub mod json;

pub use json::JsonDumper;
