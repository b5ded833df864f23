use super::*;

#[test]
fn open_creates_nested_root() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("a").join("b");
    let store = FileStore::open(&root).unwrap();
    assert!(root.is_dir());
    assert_eq!(store.root(), root.as_path());
}

#[test]
fn unwritten_slot_reads_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    assert_eq!(store.get("gemini-chats").unwrap(), None);
}

#[test]
fn set_then_get_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = FileStore::open(dir.path()).unwrap();
        store.set("gemini-api-key", "AIza-test").unwrap();
    }
    let reopened = FileStore::open(dir.path()).unwrap();
    assert_eq!(reopened.get("gemini-api-key").unwrap().as_deref(), Some("AIza-test"));
    assert!(!dir.path().join("gemini-api-key.tmp").exists());
}

#[test]
fn set_replaces_whole_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    store.set("gemini-chats", "[1,2,3,4,5,6,7,8]").unwrap();
    store.set("gemini-chats", "[]").unwrap();
    assert_eq!(store.get("gemini-chats").unwrap().as_deref(), Some("[]"));
}

#[test]
fn traversal_key_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    assert!(matches!(store.set("../escape", "x"), Err(StoreError::InvalidKey(_))));
    assert!(matches!(store.get("../escape"), Err(StoreError::InvalidKey(_))));
}

#[test]
fn default_root_ends_with_app_dir() {
    assert!(FileStore::default_root().ends_with(APP_DIR_NAME));
}
