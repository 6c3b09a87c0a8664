//! Artifact loading tests

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use kiln_application::{ArtifactLoader, BuildConfiguration};
use kiln_domain::{ClassMap, ContainerManifest, Error, ServiceEntry, ServiceFactory};
use kiln_infrastructure::ConfigCache;

use crate::support::{FakeGate, Workspace};

fn write_manifest(path: &Path, manifest: &ContainerManifest) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string(manifest).unwrap()).unwrap();
}

fn manifest(class_name: &str, base: &str, class: &str) -> ContainerManifest {
    let factory = ServiceFactory {
        id: "thing".to_string(),
        class: class.to_string(),
        arguments: Vec::new(),
        public: true,
        shared: true,
        lazy: false,
        proxy: None,
    };
    ContainerManifest {
        class_name: class_name.to_string(),
        base_class: base.to_string(),
        debug: false,
        parameters: IndexMap::new(),
        services: IndexMap::from([("thing".to_string(), ServiceEntry::Inline { factory })]),
        aliases: IndexMap::new(),
        class_map: ClassMap::Inline {
            classes: vec![class.to_string()],
        },
    }
}

#[test]
fn test_compiled_artifact_loads() {
    let workspace = Workspace::new("services: { thing: { class: stdClass, public: true } }");
    let config = workspace.configuration("Loaded");
    let gate = ConfigCache::new(config.dump_file(""), false);
    workspace.yaml_generator().generate(&config, &gate).unwrap();

    let container = ArtifactLoader::new().load_container(&config, &gate).unwrap();

    assert!(container.has("thing"));
    assert_eq!(container.class_name(), "Loaded::AppContainer");
}

#[test]
fn test_artifact_of_another_class_is_rejected() {
    let workspace = Workspace::new("services: { thing: { class: stdClass, public: true } }");
    let config = workspace.configuration("First");
    let gate = ConfigCache::new(config.dump_file(""), false);
    workspace.yaml_generator().generate(&config, &gate).unwrap();

    let other = BuildConfiguration::with_dump_dir("Second", workspace.dump_dir());
    let err = ArtifactLoader::new().load_container(&other, &gate).unwrap_err();

    match err {
        Error::Configuration { message, .. } => {
            assert!(message.contains("\"First::AppContainer\""));
            assert!(message.contains("\"Second::AppContainer\""));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_artifact_is_an_io_error() {
    let workspace = Workspace::new("services: {}");
    let config = workspace.configuration("Missing");
    let gate = FakeGate::new(config.dump_file(""), true);

    let err = ArtifactLoader::new().load_container(&config, &gate).unwrap_err();

    assert!(matches!(err, Error::Io { .. }), "{err}");
}

#[test]
fn test_malformed_artifact_is_a_cache_error() {
    let workspace = Workspace::new("services: {}");
    let config = workspace.configuration("Broken");
    let path = config.dump_file("");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ not json").unwrap();

    let err = ArtifactLoader::new()
        .load_container(&config, &FakeGate::new(path, true))
        .unwrap_err();

    assert!(matches!(err, Error::Cache { .. }), "{err}");
}

#[test]
fn test_hand_written_manifest_loads() {
    let workspace = Workspace::new("services: {}");
    let config = workspace.configuration("Manual");
    let path = config.dump_file("");
    write_manifest(&path, &manifest("Manual::AppContainer", "Container", "stdClass"));

    let container = ArtifactLoader::new()
        .load_container(&config, &FakeGate::new(path, true))
        .unwrap();

    assert_eq!(container.service_ids(), vec!["thing".to_string()]);
}

#[test]
fn test_unregistered_class_is_rejected_at_load() {
    let workspace = Workspace::new("services: {}");
    let config = workspace.configuration("Manual");
    let path = config.dump_file("");
    write_manifest(&path, &manifest("Manual::AppContainer", "Container", "Unknown"));

    let err = ArtifactLoader::new()
        .load_container(&config, &FakeGate::new(path, true))
        .unwrap_err();

    match err {
        Error::Configuration { message, .. } => {
            assert!(message.contains("Class \"Unknown\""));
            assert!(message.contains("not registered"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_base_is_rejected_at_load() {
    let workspace = Workspace::new("services: {}");
    let config = workspace.configuration("Manual");
    let path = config.dump_file("");
    write_manifest(&path, &manifest("Manual::AppContainer", "NoSuchBase", "stdClass"));

    let err = ArtifactLoader::new()
        .load_container(&config, &FakeGate::new(path, true))
        .unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }), "{err}");
    assert!(err.to_string().contains("NoSuchBase"));
}
