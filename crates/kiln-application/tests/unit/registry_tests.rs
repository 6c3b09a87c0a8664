//! Factory registry tests

use kiln_application::ports::registry::{
    ContainerBase, check_arity, has_container_base, has_service_class, list_compiler_passes,
    list_container_bases, list_packages, list_service_classes, resolve_container_base,
    resolve_package, resolve_service_class,
};
use kiln_domain::{Error, Package};
use serde_json::json;

fn names(entries: Vec<(&'static str, &'static str)>) -> Vec<&'static str> {
    entries.into_iter().map(|(name, _)| name).collect()
}

#[test]
fn test_built_in_entries_are_registered() {
    let passes = names(list_compiler_passes());
    assert!(passes.contains(&"make_services_public"));
    assert!(passes.contains(&"parameter_store"));

    assert!(names(list_service_classes()).contains(&"stdClass"));
    assert!(names(list_container_bases()).contains(&"Container"));
    assert!(has_service_class("stdClass"));
    assert!(has_container_base("Container"));
}

#[test]
fn test_test_binary_entries_are_registered() {
    let packages = names(list_packages());
    assert!(packages.contains(&"test.files_and_pass"));
    assert!(packages.contains(&"test.inert"));

    assert!(resolve_service_class("test.Mailer").is_some());
    assert!(resolve_service_class("test.Missing").is_none());
    assert_eq!(resolve_container_base("test.AuditedBase").unwrap().name(), "test.AuditedBase");
}

#[test]
fn test_package_factory_receives_arguments() {
    let package = resolve_package("test.files_and_pass", &[json!(["a.yml"])]).unwrap();

    let files = package.as_file_contributor().unwrap().files();
    assert_eq!(files, vec!["a.yml".to_string()]);
}

#[test]
fn test_unknown_package_lists_available_ones() {
    let err = resolve_package("test.missing", &[]).err().unwrap();

    assert!(matches!(err, Error::Configuration { .. }));
    assert!(err.to_string().contains("test.inert"));
}

#[test]
fn test_check_arity() {
    assert!(check_arity("pass", &[], 0).is_ok());

    let message = check_arity("pass", &[json!(1), json!(2)], 1).unwrap_err();
    assert_eq!(message, "'pass' expects 1 constructor argument(s), 2 given");
}
