//! Single-format loader tests

use std::fs;

use kiln_domain::{Alias, Argument, Error, ServiceRegistry, SourceLoader};
use kiln_providers::{FileLoader, FileLocator, SourceFormat};
use serde_json::json;
use tempfile::TempDir;

fn yaml_loader(dir: &TempDir) -> FileLoader {
    FileLoader::new(SourceFormat::Yaml, FileLocator::new([dir.path()]))
}

#[test]
fn test_definitions_parameters_and_aliases() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("services.yml"),
        r"
parameters:
  mailer.host: localhost
services:
  mailer:
    class: Mailer
    arguments: ['%mailer.host%', '@transport', '@?logger', '@@literal']
    public: true
    tags: [mail]
  transport: ~
  mail: '@mailer'
",
    )
    .unwrap();
    let mut registry = ServiceRegistry::new();

    yaml_loader(&dir).load("services.yml", &mut registry).unwrap();

    let mailer = registry.definition("mailer").unwrap();
    assert_eq!(mailer.class, "Mailer");
    assert!(mailer.public);
    assert!(mailer.shared);
    assert!(mailer.has_tag("mail"));
    assert_eq!(
        mailer.arguments,
        vec![
            Argument::Parameter {
                name: "mailer.host".to_string()
            },
            Argument::reference("transport"),
            Argument::Reference {
                id: "logger".to_string(),
                optional: true
            },
            Argument::value("@literal"),
        ]
    );
    assert_eq!(registry.definition("transport").unwrap().class, "transport");
    assert_eq!(registry.alias("mail").unwrap(), &Alias::new("mailer", false));
    assert_eq!(registry.parameter("mailer.host").unwrap(), &json!("localhost"));
    assert_eq!(registry.resources().len(), 1);
}

#[test]
fn test_imports_load_first_and_relative_to_the_importer() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("config")).unwrap();
    fs::write(
        dir.path().join("config/base.yml"),
        "parameters: { level: base, only_base: true }\nservices: { shared: { class: Base } }",
    )
    .unwrap();
    fs::write(
        dir.path().join("config/app.yml"),
        "imports: [{ resource: base.yml }]\nparameters: { level: app }\nservices: { shared: { class: App } }",
    )
    .unwrap();
    let mut registry = ServiceRegistry::new();

    yaml_loader(&dir).load("config/app.yml", &mut registry).unwrap();

    assert_eq!(registry.parameter("level").unwrap(), &json!("app"));
    assert_eq!(registry.parameter("only_base").unwrap(), &json!(true));
    assert_eq!(registry.definition("shared").unwrap().class, "App");
    assert_eq!(registry.resources().len(), 2);
}

#[test]
fn test_ignore_errors_skips_missing_imports() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("app.yml"),
        "imports:\n  - { resource: optional.yml, ignore_errors: true }\nservices: { app: ~ }",
    )
    .unwrap();
    let mut registry = ServiceRegistry::new();

    yaml_loader(&dir).load("app.yml", &mut registry).unwrap();

    assert!(registry.has_definition("app"));
}

#[test]
fn test_missing_import_fails_without_ignore_errors() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app.yml"), "imports: [{ resource: required.yml }]").unwrap();

    let err = yaml_loader(&dir)
        .load("app.yml", &mut ServiceRegistry::new())
        .unwrap_err();

    assert!(matches!(err, Error::Source { .. }), "{err}");
}

#[test]
fn test_import_cycle_loads_each_file_once() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("a.yml"),
        "imports: [{ resource: b.yml }]\nservices: { from_a: ~ }",
    )
    .unwrap();
    fs::write(
        dir.path().join("b.yml"),
        "imports: [{ resource: a.yml }]\nservices: { from_b: ~ }",
    )
    .unwrap();
    let mut registry = ServiceRegistry::new();

    yaml_loader(&dir).load("a.yml", &mut registry).unwrap();

    assert!(registry.has_definition("from_a"));
    assert!(registry.has_definition("from_b"));
    assert_eq!(registry.resources().len(), 2);
}

#[test]
fn test_other_format_cannot_be_imported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app.yml"), "imports: [{ resource: other.json }]").unwrap();
    fs::write(dir.path().join("other.json"), "{}").unwrap();

    let err = yaml_loader(&dir)
        .load("app.yml", &mut ServiceRegistry::new())
        .unwrap_err();

    assert!(err.to_string().contains("cannot import"));
}

#[test]
fn test_invalid_entries_are_source_errors() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("typo.yml"), "services: { mailer: { clas: Mailer } }").unwrap();
    fs::write(dir.path().join("scalar.yml"), "services: { mailer: 42 }").unwrap();
    fs::write(dir.path().join("no_at.yml"), "services: { mailer: other }").unwrap();
    fs::write(dir.path().join("top.yml"), "service: {}").unwrap();
    let loader = yaml_loader(&dir);

    for file in ["typo.yml", "scalar.yml", "no_at.yml", "top.yml"] {
        let err = loader.load(file, &mut ServiceRegistry::new()).unwrap_err();
        match err {
            Error::Source { file: path, .. } => assert!(path.ends_with(file), "{file}"),
            other => panic!("{file}: unexpected error: {other}"),
        }
    }
}

#[test]
fn test_empty_file_is_an_empty_document() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("empty.yml"), "").unwrap();
    let mut registry = ServiceRegistry::new();

    yaml_loader(&dir).load("empty.yml", &mut registry).unwrap();

    assert!(registry.definitions().is_empty());
    assert_eq!(registry.resources().len(), 1);
}
