//! Freshness gate tests

use std::fs;

use kiln_domain::ports::FreshnessGate;
use kiln_domain::value_objects::FileResource;
use kiln_infrastructure::cache::ConfigCache;
use tempfile::TempDir;

fn setup() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("services.yml");
    fs::write(&source, "services: {}\n").unwrap();
    (dir, source)
}

#[test]
fn test_missing_artifact_is_stale() {
    let (dir, _) = setup();
    let artifact = dir.path().join("app").join("AppContainer.json");

    assert!(!ConfigCache::new(&artifact, false).is_fresh());
    assert!(!ConfigCache::new(&artifact, true).is_fresh());
}

#[test]
fn test_write_creates_artifact_and_meta() {
    let (dir, source) = setup();
    let artifact = dir.path().join("app").join("AppContainer.json");
    let cache = ConfigCache::new(&artifact, true);

    cache.write("{}", &[FileResource::read(&source)]).unwrap();

    assert_eq!(fs::read_to_string(&artifact).unwrap(), "{}");
    assert_eq!(cache.meta_path(), dir.path().join("app").join("AppContainer.json.meta"));
    let meta = cache.read_meta().unwrap();
    assert_eq!(meta.resources.len(), 1);
    assert_eq!(meta.resources[0].path, source);
    assert!(meta.resources[0].sha256.is_some());
    assert!(cache.is_fresh());
}

#[test]
fn test_production_gate_ignores_resource_changes() {
    let (dir, source) = setup();
    let artifact = dir.path().join("AppContainer.json");
    let cache = ConfigCache::new(&artifact, false);
    cache.write("{}", &[FileResource::read(&source)]).unwrap();

    fs::write(&source, "services: { changed: ~ }\n").unwrap();

    assert!(cache.is_fresh());
}

#[test]
fn test_debug_gate_detects_changed_resource() {
    let (dir, source) = setup();
    let artifact = dir.path().join("AppContainer.json");
    let cache = ConfigCache::new(&artifact, true);
    cache.write("{}", &[FileResource::read(&source)]).unwrap();
    assert!(cache.is_fresh());

    fs::write(&source, "services: { changed: ~ }\n").unwrap();

    assert!(!cache.is_fresh());
}

#[test]
fn test_debug_gate_detects_deleted_resource() {
    let (dir, source) = setup();
    let artifact = dir.path().join("AppContainer.json");
    let cache = ConfigCache::new(&artifact, true);
    cache.write("{}", &[FileResource::read(&source)]).unwrap();

    fs::remove_file(&source).unwrap();

    assert!(!cache.is_fresh());
}

#[test]
fn test_debug_gate_without_meta_is_stale() {
    let (dir, _) = setup();
    let artifact = dir.path().join("AppContainer.json");
    fs::write(&artifact, "{}").unwrap();

    assert!(!ConfigCache::new(&artifact, true).is_fresh());
    assert!(ConfigCache::new(&artifact, false).is_fresh());
}

#[test]
fn test_corrupt_meta_is_stale() {
    let (dir, source) = setup();
    let artifact = dir.path().join("AppContainer.json");
    let cache = ConfigCache::new(&artifact, true);
    cache.write("{}", &[FileResource::read(&source)]).unwrap();

    fs::write(cache.meta_path(), "not json").unwrap();

    assert!(cache.read_meta().is_none());
    assert!(!cache.is_fresh());
}

#[test]
fn test_rewrite_resets_the_baseline() {
    let (dir, source) = setup();
    let artifact = dir.path().join("AppContainer.json");
    let cache = ConfigCache::new(&artifact, true);
    cache.write("{}", &[FileResource::read(&source)]).unwrap();
    fs::write(&source, "services: { changed: ~ }\n").unwrap();
    assert!(!cache.is_fresh());

    cache.write("{\"v\":2}", &[FileResource::read(&source)]).unwrap();

    assert!(cache.is_fresh());
    assert_eq!(fs::read_to_string(&artifact).unwrap(), "{\"v\":2}");
}

#[test]
fn test_baseline_is_the_content_the_build_read() {
    let (dir, source) = setup();
    let artifact = dir.path().join("AppContainer.json");
    let cache = ConfigCache::new(&artifact, true);
    let read = FileResource::new(&source, b"services: {}\n");

    fs::write(&source, "services: { edited: ~ }\n").unwrap();
    cache.write("{}", &[read]).unwrap();

    assert!(!cache.is_fresh());
}

#[test]
fn test_siblings_are_written_next_to_the_artifact() {
    let (dir, _) = setup();
    let artifact = dir.path().join("app").join("AppContainer.json");
    let cache = ConfigCache::new(&artifact, false);

    cache
        .write_sibling("AppContainer/getMailerService.json", "{\"class\":\"Mailer\"}")
        .unwrap();
    cache
        .write_sibling("AppContainer/getMailerService.json", "{\"class\":\"Other\"}")
        .unwrap();

    let sibling = dir.path().join("app/AppContainer/getMailerService.json");
    assert_eq!(fs::read_to_string(&sibling).unwrap(), "{\"class\":\"Other\"}");
    let entries: Vec<_> = fs::read_dir(sibling.parent().unwrap()).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert!(!cache.is_fresh());
}
