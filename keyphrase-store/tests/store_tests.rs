//! Integration tests for PhraseStore: disk round trips and undo/redo.

use keyphrase_store::PhraseStore;
use tempfile::TempDir;

fn store_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("phrases.json")
}

#[test]
fn test_load_missing_file_creates_empty_table() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir);
    assert!(!path.exists());

    let store = PhraseStore::load(&path).unwrap();
    assert!(store.table().is_empty());
    assert!(!store.is_dirty());
    // The file is created so later backups have something to copy
    assert!(path.exists());
}

#[test]
fn test_save_and_reload_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir);

    let mut store = PhraseStore::load(&path).unwrap();
    store.save_entry(&["greeting"], "Hello there!");
    store.save_entry(&["sig", "mail"], "Best regards,\nJ.");
    assert!(store.is_dirty());
    store.save().unwrap();
    assert!(!store.is_dirty());

    let reloaded = PhraseStore::load(&path).unwrap();
    assert_eq!(reloaded.table().len(), 2);
    assert_eq!(reloaded.saved_keys("Best regards,\nJ."), vec!["mail", "sig"]);
    assert_eq!(
        reloaded.phrase_list(&["greeting"]).unwrap(),
        vec!["Hello there!"]
    );
}

#[test]
fn test_load_rejects_malformed_json() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir);
    std::fs::write(&path, "not json at all").unwrap();

    assert!(PhraseStore::load(&path).is_err());
}

#[test]
fn test_undo_restores_previous_table() {
    let dir = TempDir::new().unwrap();
    let mut store = PhraseStore::load(store_path(&dir)).unwrap();

    store.prepare_undo();
    store.save_entry(&["a"], "first");
    store.prepare_undo();
    store.save_entry(&["b"], "second");
    assert_eq!(store.table().len(), 2);

    store.undo();
    assert_eq!(store.table().len(), 1);
    assert!(store.phrase_list(&["b"]).is_none());

    store.undo();
    assert!(store.table().is_empty());

    // Nothing left to undo: silent no-op
    store.undo();
    assert!(store.table().is_empty());
}

#[test]
fn test_redo_reverts_undo() {
    let dir = TempDir::new().unwrap();
    let mut store = PhraseStore::load(store_path(&dir)).unwrap();

    store.prepare_undo();
    store.save_entry(&["a"], "first");
    store.undo();
    assert!(store.table().is_empty());

    store.redo();
    assert_eq!(store.table().len(), 1);
    assert_eq!(store.phrase_list(&["a"]).unwrap(), vec!["first"]);

    // Nothing left to redo: silent no-op
    store.redo();
    assert_eq!(store.table().len(), 1);
}

#[test]
fn test_undo_of_delete() {
    let dir = TempDir::new().unwrap();
    let mut store = PhraseStore::load(store_path(&dir)).unwrap();

    store.prepare_undo();
    store.save_entry(&["a"], "keep me");
    store.prepare_undo();
    store.save_entry::<&str>(&[], "keep me"); // empty key list deletes
    assert!(store.table().is_empty());

    store.undo();
    assert_eq!(store.saved_keys("keep me"), vec!["a"]);
}
