//! Error handling types

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for kiln builds
///
/// Every stage of the build pipeline surfaces one of these variants unmodified;
/// nothing in the pipeline recovers locally.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Configuration-related error: unknown package/pass/class type, bad arguments
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A definition source could not be located, read or parsed
    #[error("Source error in {}: {message}", file.display())]
    Source {
        /// The offending definition file
        file: PathBuf,
        /// Description of the problem
        message: String,
    },

    /// The registry refused to compile (missing reference, cycle, missing parameter)
    #[error("Compilation error: {message}")]
    Compilation {
        /// Description of the compilation failure
        message: String,
    },

    /// Cache artifact or metadata operation error
    #[error("Cache error: {message}")]
    Cache {
        /// Description of the cache error
        message: String,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Runtime lookup of a service id that the container does not know
    #[error("You have requested a non-existent service \"{id}\"")]
    ServiceNotFound {
        /// The requested service id
        id: String,
    },

    /// Runtime lookup of a service that was compiled as private
    #[error("The \"{id}\" service is private and cannot be fetched from the container")]
    PrivateService {
        /// The requested service id
        id: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Create a compilation error
    pub fn compilation<S: Into<String>>(message: S) -> Self {
        Self::Compilation {
            message: message.into(),
        }
    }

    /// Create a source error naming the offending file
    pub fn source<P: Into<PathBuf>, S: Into<String>>(file: P, message: S) -> Self {
        Self::Source {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a service-not-found error
    pub fn service_not_found<S: Into<String>>(id: S) -> Self {
        Self::ServiceNotFound { id: id.into() }
    }

    /// Create a private-service error
    pub fn private_service<S: Into<String>>(id: S) -> Self {
        Self::PrivateService { id: id.into() }
    }
}

// I/O error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
