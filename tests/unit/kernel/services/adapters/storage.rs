use super::*;

#[test]
fn test_file_store_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let mut store = FileKeyValueStore::new(tmp.path().join("state"));

    assert_eq!(store.get("file-system-storage").unwrap(), None);
    store.set("file-system-storage", r#"{"a":1}"#).unwrap();
    assert_eq!(
        store.get("file-system-storage").unwrap().as_deref(),
        Some(r#"{"a":1}"#)
    );
    assert!(store.dir().join("file-system-storage.json").is_file());
    assert!(!store.dir().join("file-system-storage.json.tmp").exists());

    store.set("file-system-storage", "{}").unwrap();
    assert_eq!(store.get("file-system-storage").unwrap().as_deref(), Some("{}"));
}

#[test]
fn test_file_store_remove_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let mut store = FileKeyValueStore::new(tmp.path());
    store.set("k", "v").unwrap();
    store.remove("k").unwrap();
    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn test_file_store_sanitizes_keys() {
    let tmp = tempfile::tempdir().unwrap();
    let mut store = FileKeyValueStore::new(tmp.path());
    store.set("../escape", "v").unwrap();
    assert!(tmp.path().join("___escape.json").is_file());
    assert_eq!(store.get("../escape").unwrap().as_deref(), Some("v"));
}

#[test]
fn test_memory_store() {
    let mut store = MemoryKeyValueStore::new();
    assert!(store.is_empty());
    store.set("a", "1").unwrap();
    assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    assert_eq!(store.len(), 1);
    store.remove("a").unwrap();
    assert_eq!(store.get("a").unwrap(), None);
}
