//! Unit tests for domain error types

use kiln_domain::Error;

#[test]
fn test_not_found_error() {
    let error = Error::not_found("parameter \"x\"");
    match error {
        Error::NotFound { resource } => assert_eq!(resource, "parameter \"x\""),
        _ => panic!("Expected NotFound error"),
    }
}

#[test]
fn test_source_error_names_file() {
    let error = Error::source("/etc/app/services.yml", "unexpected key \"clas\"");
    let display = error.to_string();
    assert!(display.contains("/etc/app/services.yml"));
    assert!(display.contains("unexpected key"));
}

#[test]
fn test_configuration_error_with_source() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error = Error::configuration_with_source("Cannot read settings", io);
    match &error {
        Error::Configuration { message, source } => {
            assert_eq!(message, "Cannot read settings");
            assert!(source.is_some());
        }
        _ => panic!("Expected Configuration error"),
    }
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_runtime_lookup_errors() {
    assert_eq!(
        Error::service_not_found("mailer").to_string(),
        "You have requested a non-existent service \"mailer\""
    );
    assert!(Error::private_service("mailer")
        .to_string()
        .contains("is private"));
}

#[test]
fn test_io_error_from_std() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error: Error = io.into();
    assert!(matches!(error, Error::IoSimple { .. }));
}
