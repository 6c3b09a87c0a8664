//! Multi-format loader tests

use std::fs;

use kiln_domain::{ServiceRegistry, SourceLoader};
use kiln_providers::{DelegatingLoader, FileLocator};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_supports_every_format() {
    let loader = DelegatingLoader::new(FileLocator::default());

    assert!(loader.supports("a.yml"));
    assert!(loader.supports("a.yaml"));
    assert!(loader.supports("a.json"));
    assert!(loader.supports("a.toml"));
    assert!(!loader.supports("a.xml"));
}

#[test]
fn test_imports_across_formats() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("app.yml"),
        "imports: [{ resource: db.toml }, { resource: mail.json }]\nservices: { app: ~ }",
    )
    .unwrap();
    fs::write(dir.path().join("db.toml"), "[parameters]\n\"db.name\" = \"kiln\"\n").unwrap();
    fs::write(
        dir.path().join("mail.json"),
        r#"{ "services": { "mailer": { "class": "Mailer" } } }"#,
    )
    .unwrap();
    let loader = DelegatingLoader::new(FileLocator::new([dir.path()]));
    let mut registry = ServiceRegistry::new();

    loader.load("app.yml", &mut registry).unwrap();

    assert!(registry.has_definition("app"));
    assert!(registry.has_definition("mailer"));
    assert_eq!(registry.parameter("db.name").unwrap(), &json!("kiln"));
    assert_eq!(registry.resources().len(), 3);
}

#[test]
fn test_unsupported_file() {
    let loader = DelegatingLoader::new(FileLocator::default());

    let err = loader
        .load("services.xml", &mut ServiceRegistry::new())
        .unwrap_err();

    assert!(err.to_string().contains("No loader"));
}
