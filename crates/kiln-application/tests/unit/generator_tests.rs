//! Registry initialization tests

use std::fs;
use std::sync::Arc;

use kiln_application::{BuildConfiguration, ContainerInitializer, Generator, SourceLoaderSelector};
use kiln_domain::{Error, FileResource};
use kiln_providers::JsonDumper;
use kiln_providers::selector::{DelegatingSelector, FormatSelector};
use serde_json::json;

use crate::support::Workspace;

#[test]
fn test_initialize_loads_files_and_tracks_the_configuration_file() {
    let workspace = Workspace::new(
        "parameters: { greeting: hello }\nservices: { testing: { class: stdClass, public: true } }",
    );
    let config = workspace.configuration("App");
    let generator = workspace.yaml_generator();

    let registry = generator.initialize_container(&config).unwrap();

    assert!(!registry.is_compiled());
    assert_eq!(registry.definition("testing").unwrap().class, "stdClass");
    assert_eq!(registry.parameter("greeting").unwrap(), &json!("hello"));
    assert_eq!(
        registry.resources()[0],
        FileResource::new(workspace.config_file(), b"[build]\n")
    );
    assert!(
        registry
            .resources()
            .iter()
            .any(|resource| resource.path().ends_with("services.yml"))
    );
}

#[test]
fn test_files_are_loaded_in_order() {
    let workspace = Workspace::new("services: { shared: { class: stdClass } }");
    fs::write(
        workspace.path().join("override.yml"),
        "services: { shared: { class: test.Transport } }",
    )
    .unwrap();
    let mut config = workspace.configuration("App");
    config.add_file("override.yml");
    config.add_path(workspace.path().to_string_lossy().into_owned());

    let registry = workspace
        .yaml_generator()
        .initialize_container(&config)
        .unwrap();

    assert_eq!(registry.definition("shared").unwrap().class, "test.Transport");
}

#[test]
fn test_unsupported_file_names_the_file() {
    let workspace = Workspace::new("services: {}");
    fs::write(workspace.path().join("services.json"), "{}").unwrap();
    let mut config = BuildConfiguration::with_dump_dir("App", workspace.dump_dir());
    config.add_file(workspace.path().join("services.json").to_string_lossy().into_owned());

    let err = workspace
        .yaml_generator()
        .initialize_container(&config)
        .unwrap_err();

    match err {
        Error::Source { file, message } => {
            assert!(file.ends_with("services.json"));
            assert!(message.contains("No yaml loader"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_file_fails() {
    let workspace = Workspace::new("services: {}");
    let mut config = BuildConfiguration::with_dump_dir("App", workspace.dump_dir());
    config.add_file("nowhere.yml");

    let err = workspace
        .yaml_generator()
        .initialize_container(&config)
        .unwrap_err();

    assert!(matches!(err, Error::Source { .. }));
}

#[test]
fn test_first_malformed_file_aborts() {
    let workspace = Workspace::new("services: [not, a, mapping");
    let mut config = workspace.configuration("App");
    config.add_file("never-reached.yml");

    let err = workspace
        .yaml_generator()
        .initialize_container(&config)
        .unwrap_err();

    match err {
        Error::Source { file, .. } => assert!(file.ends_with("services.yml")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_delegating_selector_mixes_formats() {
    let workspace = Workspace::new("services: { from_yaml: { class: stdClass } }");
    fs::write(
        workspace.path().join("more.json"),
        r#"{ "services": { "from_json": { "class": "stdClass" } } }"#,
    )
    .unwrap();
    fs::write(
        workspace.path().join("extra.toml"),
        "[services.from_toml]\nclass = \"stdClass\"\n",
    )
    .unwrap();
    let mut config = workspace.configuration("App");
    config.add_path(workspace.path().to_string_lossy().into_owned());
    config.add_file("more.json");
    config.add_file("extra.toml");
    let generator = Generator::new(
        Arc::new(DelegatingSelector),
        Arc::new(JsonDumper::new()),
        workspace.config_file(),
    );

    let registry = generator.initialize_container(&config).unwrap();

    for id in ["from_yaml", "from_json", "from_toml"] {
        assert!(registry.has_definition(id), "{id} should be loaded");
    }
}

#[test]
fn test_package_files_are_loaded_first() {
    let workspace = Workspace::new("services: { shared: { class: test.Transport } }");
    fs::write(
        workspace.path().join("package.yml"),
        "services: { shared: { class: stdClass }, from_package: ~ }",
    )
    .unwrap();
    let mut config = workspace.configuration("App");
    config.add_path(workspace.path().to_string_lossy().into_owned());
    config.add_package("test.files_and_pass", vec![json!(["package.yml"])]);

    let registry = workspace
        .yaml_generator()
        .initialize_container(&config)
        .unwrap();

    assert_eq!(registry.definition("shared").unwrap().class, "test.Transport");
    assert!(registry.has_definition("from_package"));
}

#[test]
fn test_generator_exposes_its_parts() {
    let workspace = Workspace::new("services: {}");
    let generator = Generator::new(
        Arc::new(FormatSelector::toml()),
        Arc::new(JsonDumper::new()),
        workspace.config_file(),
    );

    assert_eq!(generator.selector().name(), "toml");
    assert_eq!(generator.configuration_file(), workspace.config_file().as_path());
}
