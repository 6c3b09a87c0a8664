//! File locator tests

use std::fs;

use kiln_domain::Error;
use kiln_providers::FileLocator;
use tempfile::TempDir;

#[test]
fn test_search_paths_in_order() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    fs::write(second.path().join("services.yml"), "").unwrap();

    let locator = FileLocator::new([first.path(), second.path()]);
    let found = locator.locate("services.yml", None).unwrap();
    assert_eq!(found, fs::canonicalize(second.path().join("services.yml")).unwrap());

    fs::write(first.path().join("services.yml"), "").unwrap();
    let found = locator.locate("services.yml", None).unwrap();
    assert_eq!(found, fs::canonicalize(first.path().join("services.yml")).unwrap());
}

#[test]
fn test_current_dir_comes_first() {
    let current = TempDir::new().unwrap();
    let search = TempDir::new().unwrap();
    fs::write(current.path().join("base.yml"), "").unwrap();
    fs::write(search.path().join("base.yml"), "").unwrap();

    let locator = FileLocator::new([search.path()]);
    let found = locator.locate("base.yml", Some(current.path())).unwrap();

    assert_eq!(found, fs::canonicalize(current.path().join("base.yml")).unwrap());
}

#[test]
fn test_absolute_names_ignore_search_paths() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("abs.yml");
    fs::write(&file, "").unwrap();

    let locator = FileLocator::new(["/nonexistent"]);
    assert_eq!(
        locator.locate(file.to_str().unwrap(), None).unwrap(),
        fs::canonicalize(&file).unwrap()
    );
}

#[test]
fn test_missing_file_names_the_searched_paths() {
    let dir = TempDir::new().unwrap();
    let locator = FileLocator::new([dir.path()]);

    let err = locator.locate("missing.yml", None).unwrap_err();

    match err {
        Error::Source { file, message } => {
            assert_eq!(file.to_str(), Some("missing.yml"));
            assert!(message.contains(&dir.path().display().to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_name() {
    assert!(FileLocator::default().locate("", None).is_err());
}
