// Tests for WordListStore
// - add assigns sequential ids, trims input, writes through
// - duplicate / empty / too-short input leaves the list untouched
// - edit: not found, no-op detection without write, one-sided length check
// - remove renumbers survivors and keeps the edit marker in step
// - search threshold and matching
// - load: missing, malformed and legacy (non-dense, repeated id) data
// - write failures keep in-memory state and surface a warning
// - reload through FileStore reproduces the list

use super::*;
use crate::services::storage::{FileStore, MemoryStore};
use tempfile::TempDir;

fn empty_store() -> WordListStore<MemoryStore> {
    WordListStore::new(MemoryStore::new())
}

fn seeded_store() -> WordListStore<MemoryStore> {
    let mut store = empty_store();
    store.add("cat", "gato").unwrap();
    store.add("dog", "cachorro").unwrap();
    store
}

fn saved_ids(store: &WordListStore<MemoryStore>) -> Vec<u32> {
    let raw = store.storage().raw(ENTRIES_KEY).unwrap();
    let records: Vec<WordEntry> = serde_json::from_str(raw).unwrap();
    records.iter().map(|e| e.id).collect()
}

fn assert_unique_terms(store: &WordListStore<MemoryStore>) {
    let mut seen = std::collections::HashSet::new();
    for e in store.entries() {
        assert!(seen.insert(fold(&e.source_term)), "repeated term {}", e.source_term);
    }
}

fn assert_dense(store: &WordListStore<MemoryStore>) {
    let ids: Vec<u32> = store.entries().iter().map(|e| e.id).collect();
    let expected: Vec<u32> = (1..=store.len() as u32).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_end_to_end_add_add_remove() {
    let mut store = empty_store();

    let cat = store.add("cat", "gato").unwrap();
    assert_eq!(cat.id, 1);

    let dog = store.add("dog", "cachorro").unwrap();
    assert_eq!(dog.id, 2);

    assert!(store.remove(1));

    let remaining = store.entries();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, 1);
    assert_eq!(remaining[0].source_term, "dog");
    assert_eq!(saved_ids(&store), vec![1]);
}

#[test]
fn test_add_trims_and_persists_with_legacy_field_names() {
    let mut store = empty_store();

    let entry = store.add("  house ", " casa  ").unwrap();
    assert_eq!(entry.source_term, "house");
    assert_eq!(entry.translated_term, "casa");
    assert_eq!(store.storage().writes, 1);

    let raw = store.storage().raw(ENTRIES_KEY).unwrap();
    assert_eq!(raw, r#"[{"ID":1,"English_word":"house","Portuguese_word":"casa"}]"#);
}

#[test]
fn test_add_duplicate_rejected_without_mutation() {
    let mut store = empty_store();
    store.add("hello", "olá").unwrap();
    let revision = store.revision();

    let result = store.add("HELLO", "ola");

    assert!(matches!(
        result,
        Err(ValidationError::DuplicateTerm { existing_id: 1, .. })
    ));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(1).unwrap().translated_term, "olá");
    assert_eq!(store.storage().writes, 1);
    assert_eq!(store.revision(), revision);
}

#[test]
fn test_add_rejects_empty_and_short_fields() {
    let mut store = empty_store();

    assert!(matches!(
        store.add("   ", "gato"),
        Err(ValidationError::EmptyField(Field::Source))
    ));
    assert!(matches!(
        store.add("cat", ""),
        Err(ValidationError::EmptyField(Field::Translation))
    ));
    assert!(matches!(
        store.add("ox", "boi"),
        Err(ValidationError::TooShort { field: Field::Source, .. })
    ));
    assert!(store.is_empty());
    assert_eq!(store.storage().writes, 0);
}

#[test]
fn test_add_uses_max_id_plus_one() {
    let mut store = seeded_store();
    store.add("bird", "pássaro").unwrap();
    assert!(store.remove(2));

    let fish = store.add("fish", "peixe").unwrap();
    assert_eq!(fish.id, 3);
    assert_dense(&store);
}

#[test]
fn test_edit_not_found() {
    let mut store = seeded_store();
    assert_eq!(store.edit(9, "cow", "vaca"), Err(EditError::NotFound(9)));
}

#[test]
fn test_edit_without_changes_is_soft_warning_and_skips_write() {
    let mut store = seeded_store();
    let writes = store.storage().writes;

    let err = store.edit(1, " cat ", "gato").unwrap_err();

    assert_eq!(err, EditError::NoChange);
    assert_eq!(err.severity(), crate::services::notice::Severity::Warning);
    assert_eq!(store.storage().writes, writes);
}

#[test]
fn test_edit_only_checks_length_of_changed_field() {
    let mut store = empty_store();
    store
        .storage_mut()
        .set(ENTRIES_KEY, r#"[{"ID":1,"English_word":"ox","Portuguese_word":"boi"}]"#)
        .unwrap();
    store.load();

    let edited = store.edit(1, "ox", "touro").unwrap();
    assert_eq!(edited.translated_term, "touro");

    assert!(matches!(
        store.edit(1, "ox", "bo"),
        Err(EditError::Invalid(ValidationError::TooShort {
            field: Field::Translation,
            ..
        }))
    ));
}

#[test]
fn test_edit_allows_case_change_of_own_term() {
    let mut store = seeded_store();
    let edited = store.edit(1, "Cat", "gato").unwrap();
    assert_eq!(edited.source_term, "Cat");
    assert_unique_terms(&store);
}

#[test]
fn test_edit_rejects_term_of_another_entry() {
    let mut store = seeded_store();

    let result = store.edit(1, "DOG", "gato");

    assert_eq!(
        result,
        Err(EditError::Invalid(ValidationError::DuplicateTerm {
            term: "DOG".into(),
            existing_id: 2
        }))
    );
    assert_eq!(store.get(1).unwrap().source_term, "cat");
    assert_unique_terms(&store);
}

#[test]
fn test_remove_absent_returns_false_without_write() {
    let mut store = seeded_store();
    let writes = store.storage().writes;

    assert!(!store.remove(42));
    assert_eq!(store.storage().writes, writes);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_remove_keeps_ids_dense() {
    let mut store = empty_store();
    for (s, t) in [("one", "um"), ("two", "dois"), ("three", "três"), ("four", "quatro")] {
        store.add(s, t).unwrap();
    }

    assert!(store.remove(2));
    assert_dense(&store);
    assert!(store.remove(1));
    assert_dense(&store);

    let terms: Vec<&str> = store.entries().iter().map(|e| e.source_term.as_str()).collect();
    assert_eq!(terms, vec!["three", "four"]);
    assert_eq!(saved_ids(&store), vec![1, 2]);
}

#[test]
fn test_edit_marker_follows_renumbering() {
    let mut store = empty_store();
    for (s, t) in [("one", "um"), ("two", "dois"), ("three", "três")] {
        store.add(s, t).unwrap();
    }

    assert_eq!(store.begin_edit(3).unwrap().source_term, "three");
    store.remove(1);
    assert_eq!(store.editing_id(), Some(2));

    store.remove(2);
    assert_eq!(store.editing_id(), None);
}

#[test]
fn test_begin_and_save_edit() {
    let mut store = seeded_store();

    assert!(store.begin_edit(7).is_none());
    assert_eq!(store.editing_id(), None);
    assert_eq!(store.save_edit("x", "y"), Err(EditError::NotEditing));

    let entry = store.begin_edit(2).unwrap().clone();
    assert_eq!(entry.translated_term, "cachorro");

    // a rejected save keeps the marker so the form can be corrected
    assert!(store.save_edit("cat", "cachorro").is_err());
    assert_eq!(store.editing_id(), Some(2));

    let saved = store.save_edit("puppy", "filhote").unwrap();
    assert_eq!(saved.id, 2);
    assert_eq!(store.editing_id(), None);

    store.begin_edit(1);
    store.cancel_edit();
    assert_eq!(store.editing_id(), None);
}

#[test]
fn test_search_threshold() {
    let store = seeded_store();

    assert_eq!(store.search("ab").len(), 2);

    let hits = store.search("cat");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 1);

    let shown = store.search_for_display("");
    assert_eq!(shown.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2, 1]);
}

#[test]
fn test_load_missing_and_malformed_is_empty() {
    let mut store = empty_store();
    store.load();
    assert!(store.is_empty());

    let mut store = WordListStore::new(MemoryStore::with_value(ENTRIES_KEY, "{not json"));
    store.load();
    assert!(store.is_empty());
    assert!(store.take_persistence_warning().is_none());
}

#[test]
fn test_load_migrates_legacy_ids() {
    let legacy = r#"[
        {"ID":2,"English_word":"dog","Portuguese_word":"cachorro"},
        {"ID":5,"English_word":"bird","Portuguese_word":"pássaro"},
        {"ID":3,"English_word":"Dog","Portuguese_word":"cão"},
        {"ID":7,"English_word":"  ","Portuguese_word":"nada"}
    ]"#;
    let mut store = WordListStore::new(MemoryStore::with_value(ENTRIES_KEY, legacy));

    store.load();

    assert_dense(&store);
    assert_unique_terms(&store);
    assert_eq!(store.get(1).unwrap().source_term, "dog");
    assert_eq!(store.get(2).unwrap().source_term, "bird");
    assert_eq!(store.storage().writes, 1);
    assert_eq!(saved_ids(&store), vec![1, 2]);
}

#[test]
fn test_load_repeated_id_keeps_last_record_even_if_blank() {
    let legacy = r#"[
        {"ID":1,"English_word":"cat","Portuguese_word":"gato"},
        {"ID":2,"English_word":"dog","Portuguese_word":"cachorro"},
        {"ID":2,"English_word":"","Portuguese_word":"cão"},
        {"ID":3,"English_word":"bird","Portuguese_word":"pássaro"},
        {"ID":3,"English_word":"fish","Portuguese_word":"peixe"}
    ]"#;
    let mut store = WordListStore::new(MemoryStore::with_value(ENTRIES_KEY, legacy));

    store.load();

    let terms: Vec<&str> = store.entries().iter().map(|e| e.source_term.as_str()).collect();
    assert_eq!(terms, vec!["cat", "fish"]);
    assert_dense(&store);
    assert_eq!(saved_ids(&store), vec![1, 2]);
}

#[test]
fn test_load_dense_data_is_not_rewritten() {
    let data = r#"[{"ID":2,"English_word":"dog","Portuguese_word":"cachorro"},{"ID":1,"English_word":"cat","Portuguese_word":"gato"}]"#;
    let mut store = WordListStore::new(MemoryStore::with_value(ENTRIES_KEY, data));

    store.load();

    assert_eq!(store.len(), 2);
    assert_eq!(store.storage().writes, 0);
}

#[test]
fn test_write_failure_keeps_memory_and_warns_once() {
    let mut store = empty_store();
    store.storage_mut().fail_writes = true;

    let entry = store.add("cat", "gato").unwrap();

    assert_eq!(store.get(entry.id), Some(&entry));
    let warning = store.take_persistence_warning();
    assert!(matches!(warning, Some(PersistenceError::Unavailable(_))));
    assert!(store.take_persistence_warning().is_none());

    store.storage_mut().fail_writes = false;
    store.add("dog", "cachorro").unwrap();
    assert_eq!(saved_ids(&store), vec![1, 2]);
}

#[test]
fn test_revision_bumps_on_mutation_only() {
    let mut store = empty_store();
    let r0 = store.revision();

    store.add("cat", "gato").unwrap();
    let r1 = store.revision();
    assert!(r1 > r0);

    let _ = store.search("cat");
    let _ = store.edit(1, "cat", "gato");
    assert_eq!(store.revision(), r1);

    store.remove(1);
    assert!(store.revision() > r1);
}

#[test]
fn test_entries_persist_across_reload() {
    let temp_dir = TempDir::new().unwrap();

    {
        let mut store = WordListStore::new(FileStore::new(temp_dir.path()));
        store.add("cat", "gato").unwrap();
        store.add("dog", "cachorro").unwrap();
        store.add("bird", "pássaro").unwrap();
        store.edit(2, "dog", "cão").unwrap();
        store.remove(1);
    }

    let mut reloaded = WordListStore::new(FileStore::new(temp_dir.path()));
    reloaded.load();

    let entries: Vec<WordEntry> = reloaded.entries().into_iter().cloned().collect();
    assert_eq!(
        entries,
        vec![WordEntry::new(1, "dog", "cão"), WordEntry::new(2, "bird", "pássaro")]
    );
}
