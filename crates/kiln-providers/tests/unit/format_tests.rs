//! Source format tests

use kiln_providers::SourceFormat;
use serde_json::json;

#[test]
fn test_extensions() {
    assert!(SourceFormat::Yaml.matches("services.yml"));
    assert!(SourceFormat::Yaml.matches("config/services.YAML"));
    assert!(SourceFormat::Json.matches("services.json"));
    assert!(SourceFormat::Toml.matches("services.toml"));
    assert!(!SourceFormat::Yaml.matches("services.json"));
    assert!(!SourceFormat::Json.matches("services"));
}

#[test]
fn test_same_document_in_every_format() {
    let yaml = "services:\n  mailer:\n    class: Mailer\n    public: true\n";
    let json = r#"{ "services": { "mailer": { "class": "Mailer", "public": true } } }"#;
    let toml = "[services.mailer]\nclass = \"Mailer\"\npublic = true\n";
    let expected = json!({ "services": { "mailer": { "class": "Mailer", "public": true } } });

    assert_eq!(SourceFormat::Yaml.parse(yaml).unwrap(), expected);
    assert_eq!(SourceFormat::Json.parse(json).unwrap(), expected);
    assert_eq!(SourceFormat::Toml.parse(toml).unwrap(), expected);
}

#[test]
fn test_empty_document_is_null() {
    for format in SourceFormat::ALL {
        assert!(format.parse("  \n").unwrap().is_null(), "{format}");
    }
}

#[test]
fn test_malformed_document() {
    assert!(SourceFormat::Yaml.parse("services: [a").is_err());
    assert!(SourceFormat::Json.parse("{").is_err());
    assert!(SourceFormat::Toml.parse("[services").is_err());
}
