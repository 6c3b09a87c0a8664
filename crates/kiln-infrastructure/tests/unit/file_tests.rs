//! File utility tests

use std::fs;

use kiln_infrastructure::utils::FileUtils;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a").join("b").join("out.json");

    FileUtils::write_atomic(&path, b"first").unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"first");

    FileUtils::write_atomic(&path, b"second").unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"second");
}

#[test]
fn test_write_atomic_leaves_no_temporary_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");

    FileUtils::write_json_atomic(&path, &serde_json::json!({ "a": 1 })).unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
    let value: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(value["a"], 1);
}

#[test]
fn test_read_if_exists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("maybe");

    assert!(FileUtils::read_if_exists(&path).unwrap().is_none());
    fs::write(&path, "x").unwrap();
    assert_eq!(FileUtils::read_if_exists(&path).unwrap(), Some(b"x".to_vec()));
}
