//! Parameter store tests

use indexmap::IndexMap;
use kiln_application::ParameterStore;
use kiln_domain::{CompilerPass, ServiceRegistry};
use serde_json::{Value, json};

#[test]
fn test_set_overwrites_and_get_falls_back() {
    let store = ParameterStore::new();
    store.set("app.devmode", false);
    store.set("app.devmode", true);
    store.set("nothing", Value::Null);

    assert_eq!(store.get("app.devmode", json!(false)), json!(true));
    assert_eq!(store.get("missing", json!("fallback")), json!("fallback"));
    assert_eq!(store.get("nothing", json!(3)), json!(3));
}

#[test]
fn test_all_keeps_insertion_order() {
    let store = ParameterStore::new();
    store.set("b", 1);
    store.set("a", 2);
    store.set("b", 3);

    let keys: Vec<String> = store.all().keys().cloned().collect();
    assert_eq!(keys, vec!["b".to_string(), "a".to_string()]);
}

#[test]
fn test_process_overrides_registry_parameters() {
    let mut registry = ServiceRegistry::new();
    registry.set_parameter("mailer.host", json!("localhost"));
    registry.set_parameter("untouched", json!(1));

    let mut initial = IndexMap::new();
    initial.insert("mailer.host".to_string(), json!("smtp.example.com"));
    let store = ParameterStore::from_map(initial);
    store.process(&mut registry).unwrap();

    assert_eq!(registry.parameter("mailer.host").unwrap(), &json!("smtp.example.com"));
    assert_eq!(registry.parameter("untouched").unwrap(), &json!(1));
}

#[test]
fn test_process_is_idempotent() {
    let store = ParameterStore::new();
    store.set("a", "x");
    let mut registry = ServiceRegistry::new();

    store.process(&mut registry).unwrap();
    let first = registry.parameter_bag().all().clone();
    store.process(&mut registry).unwrap();

    assert_eq!(registry.parameter_bag().all(), &first);
}

#[test]
fn test_values_set_after_registration_are_merged() {
    let store = std::sync::Arc::new(ParameterStore::new());
    let pass: std::sync::Arc<dyn CompilerPass> = store.clone();
    store.set("late", true);

    let mut registry = ServiceRegistry::new();
    pass.process(&mut registry).unwrap();

    assert_eq!(registry.parameter("late").unwrap(), &json!(true));
}
