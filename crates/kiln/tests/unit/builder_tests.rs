//! Container builder tests

use kiln::domain::constants::{PARAM_DEV_MODE, PARAM_INLINE_CLASS_LOADER, PARAM_INLINE_FACTORIES};
use kiln::application::SourceLoaderSelector;
use kiln::domain::{CompilerPass, PassStage, PassTarget, ServiceRegistry};
use kiln::infrastructure::BuildSettings;
use kiln::{ContainerBuilder, Error, KilnSettings};
use serde_json::{Value, json};
use tempfile::TempDir;

fn flag(builder: &ContainerBuilder, name: &str) -> Value {
    builder.parameters().get(name, Value::Null)
}

#[test]
fn test_default_parameters() {
    let builder = ContainerBuilder::yaml("kiln.toml", "App");

    assert_eq!(flag(&builder, PARAM_DEV_MODE), json!(false));
    assert_eq!(flag(&builder, PARAM_INLINE_FACTORIES), json!(false));
    assert_eq!(flag(&builder, PARAM_INLINE_CLASS_LOADER), json!(true));
}

#[test]
fn test_development_mode_parameters() {
    let builder = ContainerBuilder::yaml("kiln.toml", "App").use_development_mode();

    assert_eq!(flag(&builder, PARAM_DEV_MODE), json!(true));
    assert_eq!(flag(&builder, PARAM_INLINE_FACTORIES), json!(false));
    assert_eq!(flag(&builder, PARAM_INLINE_CLASS_LOADER), json!(false));
}

#[test]
fn test_parameter_store_is_the_first_pass() {
    let builder = ContainerBuilder::json("kiln.toml", "App")
        .add_delayed_pass("make_services_public", vec![])
        .set_parameter("region", "eu");

    let passes = builder.configuration().pass_list().unwrap();

    assert_eq!(passes.len(), 2);
    let PassTarget::Instance(first) = &passes[0].target else {
        panic!("the parameter store is a live pass");
    };
    assert_eq!(first.name(), "parameter_store");
    assert_eq!(passes[0].stage, PassStage::BeforeOptimization);
    assert!(matches!(passes[1].target, PassTarget::Delayed(_)));
    assert_eq!(builder.parameters().get("region", Value::Null), json!("eu"));
}

#[test]
fn test_fluent_configuration() {
    let builder = ContainerBuilder::toml("kiln.toml", "Acme::Web")
        .add_path("config")
        .add_file("services.toml")
        .set_dump_dir("/var/cache/kiln/")
        .set_base_class("Container")
        .add_package("test.none", vec![json!(1)]);
    let config = builder.configuration();

    assert_eq!(config.namespace(), "Acme::Web");
    assert_eq!(config.paths(), ["config".to_string()]);
    assert_eq!(config.base_class(), Some("Container"));
    assert_eq!(config.package_declarations()[0].kind, "test.none");
    assert_eq!(
        config.dump_file(""),
        std::path::PathBuf::from("/var/cache/kiln/acme_web/AppContainer.json")
    );
    assert_eq!(builder.generator().selector().name(), "toml");
}

#[test]
fn test_non_boolean_dev_mode_is_rejected() {
    let dir = TempDir::new().unwrap();
    let builder = ContainerBuilder::yaml("kiln.toml", "App")
        .set_dump_dir(dir.path())
        .set_parameter(PARAM_DEV_MODE, "yes");

    let err = builder.get_container().unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }), "{err}");
}

#[test]
fn test_from_settings() {
    let dir = TempDir::new().unwrap();
    let settings = KilnSettings {
        build: BuildSettings {
            namespace: "FromSettings".to_string(),
            dump_dir: dir.path().to_path_buf(),
            dev_mode: true,
            format: "delegating".to_string(),
            files: vec!["services.yml".to_string(), "mail.json".to_string()],
            paths: vec!["config".to_string()],
            base_class: Some("Container".to_string()),
        },
        ..KilnSettings::default()
    };

    let builder = ContainerBuilder::from_settings(&settings, "kiln.toml").unwrap();
    let config = builder.configuration();

    assert_eq!(config.namespace(), "FromSettings");
    assert_eq!(config.dump_dir(), dir.path());
    assert_eq!(config.files().unwrap(), settings.build.files);
    assert_eq!(config.paths(), settings.build.paths.as_slice());
    assert_eq!(config.base_class(), Some("Container"));
    assert_eq!(flag(&builder, PARAM_DEV_MODE), json!(true));
    assert_eq!(builder.generator().selector().name(), "delegating");
}

#[test]
fn test_from_settings_with_unknown_format() {
    let mut settings = KilnSettings::default();
    settings.build.format = "xml".to_string();

    let err = ContainerBuilder::from_settings(&settings, "kiln.toml").err().unwrap();

    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_clones_have_their_own_parameters() {
    let original = ContainerBuilder::yaml("kiln.toml", "App").set_parameter("region", "eu");
    let clone = original
        .clone()
        .set_parameter("region", "us")
        .use_development_mode();

    assert_eq!(flag(&original, "region"), json!("eu"));
    assert_eq!(flag(&original, PARAM_DEV_MODE), json!(false));
    assert_eq!(flag(&clone, "region"), json!("us"));
    assert_eq!(flag(&clone, PARAM_DEV_MODE), json!(true));

    let passes = clone.configuration().pass_list().unwrap();
    assert_eq!(passes.len(), 1);
    let PassTarget::Instance(store) = &passes[0].target else {
        panic!("the parameter store is a live pass");
    };
    let mut registry = ServiceRegistry::new();
    store.process(&mut registry).unwrap();
    assert_eq!(registry.parameter("region").unwrap(), &json!("us"));

    let passes = original.configuration().pass_list().unwrap();
    let PassTarget::Instance(store) = &passes[0].target else {
        panic!("the parameter store is a live pass");
    };
    let mut registry = ServiceRegistry::new();
    store.process(&mut registry).unwrap();
    assert_eq!(registry.parameter("region").unwrap(), &json!("eu"));
}
