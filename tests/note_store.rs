//! Persistence behaviour of the note document, exercised through the public API

use std::fs;

use selfnote::note::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_HEIGHT, MIN_WIDTH};
use selfnote::store::NOTE_FILE_NAME;
use selfnote::{Geometry, Note, NoteStore};

fn scratch_store() -> (tempfile::TempDir, NoteStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = NoteStore::new(dir.path().join(NOTE_FILE_NAME));
    (dir, store)
}

#[test]
fn save_then_load_reproduces_the_note() {
    let (_dir, store) = scratch_store();
    let note = Note {
        content: "第一行\nsecond line\n\n\"quoted\" and \\ backslash".to_string(),
        geometry: Some(Geometry::new(-200, 15, 360, 420)),
        pinned: true,
    };

    store.save(&note).unwrap();
    let loaded = store.load();

    assert_eq!(loaded.content, note.content);
    assert_eq!(loaded.geometry, note.geometry);
    assert_eq!(loaded.pinned, note.pinned);
}

#[test]
fn later_save_overwrites_earlier_one() {
    let (_dir, store) = scratch_store();

    store
        .save(&Note {
            content: "a much longer first version of the note".to_string(),
            geometry: Some(Geometry::new(0, 0, 500, 500)),
            pinned: true,
        })
        .unwrap();
    let second = Note {
        content: "short".to_string(),
        geometry: Some(Geometry::new(1, 1, 200, 200)),
        pinned: false,
    };
    store.save(&second).unwrap();

    assert_eq!(store.load(), second);
}

#[test]
fn missing_file_yields_defaults() {
    let (_dir, store) = scratch_store();
    let note = store.load();

    assert_eq!(note.content, "");
    assert_eq!(note.geometry, None);
    assert!(!note.pinned);
    assert_eq!(note.size_or_default(), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
}

#[test]
fn malformed_file_yields_defaults() {
    let (_dir, store) = scratch_store();
    fs::write(store.path(), "{ \"content\": \"unterminated").unwrap();

    assert_eq!(store.load(), Note::default());
}

#[test]
fn non_utf8_file_yields_defaults() {
    let (_dir, store) = scratch_store();
    fs::write(store.path(), [0xFF, 0xFE, 0x00, 0x7B]).unwrap();

    assert_eq!(store.load(), Note::default());
}

#[test]
fn document_written_by_hand_is_read_field_by_field() {
    let (_dir, store) = scratch_store();
    fs::write(
        store.path(),
        r#"{"content": "kept", "geometry": "bogus", "always_on_top": true, "extra": 1}"#,
    )
    .unwrap();

    let note = store.load();
    assert_eq!(note.content, "kept");
    assert_eq!(note.geometry, None);
    assert!(note.pinned);
}

#[test]
fn undersized_geometry_is_enlarged_on_load() {
    let (_dir, store) = scratch_store();
    fs::write(
        store.path(),
        r#"{"geometry": {"x": 3, "y": 4, "width": 10, "height": 10}}"#,
    )
    .unwrap();

    assert_eq!(
        store.load().geometry,
        Some(Geometry::new(3, 4, MIN_WIDTH, MIN_HEIGHT))
    );
}

#[test]
fn saved_file_uses_documented_keys() {
    let (_dir, store) = scratch_store();
    store
        .save(&Note {
            content: "x".to_string(),
            geometry: Some(Geometry::new(1, 2, 300, 400)),
            pinned: false,
        })
        .unwrap();

    let raw = fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(value["content"], "x");
    assert_eq!(value["geometry"]["x"], 1);
    assert_eq!(value["geometry"]["y"], 2);
    assert_eq!(value["geometry"]["width"], 300);
    assert_eq!(value["geometry"]["height"], 400);
    assert_eq!(value["always_on_top"], false);
}
