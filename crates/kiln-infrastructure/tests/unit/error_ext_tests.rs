//! Error context tests

use kiln_domain::error::Error;
use kiln_infrastructure::error_ext::ErrorContext;

fn io_failure() -> Result<(), std::io::Error> {
    Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
}

#[test]
fn test_io_context() {
    let err = io_failure().io_context("Failed to read services.yml").unwrap_err();
    assert!(matches!(err, Error::Io { source: Some(_), .. }));
    assert!(err.to_string().contains("Failed to read services.yml: gone"));
}

#[test]
fn test_config_context() {
    let err = io_failure().config_context("Failed to extract settings").unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert!(err.to_string().contains("Failed to extract settings"));
}

#[test]
fn test_cache_context() {
    let err = io_failure().cache_context("Failed to write artifact").unwrap_err();
    assert!(matches!(err, Error::Cache { .. }));
    assert!(err.to_string().contains("gone"));
}
