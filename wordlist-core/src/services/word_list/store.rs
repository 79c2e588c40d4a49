use std::collections::{BTreeMap, HashMap};

use crate::model::entry::{Field, WordEntry};
use crate::services::storage::{KeyValueStore, PersistenceError, ENTRIES_KEY};

use super::error::{EditError, ValidationError};
use super::normalize::fold;
use super::{search, validate};

/// Owns the word list and writes it through to `storage` after every
/// mutation. Ids are kept dense (`1..=len`).
#[derive(Debug)]
pub struct WordListStore<S: KeyValueStore> {
    entries: BTreeMap<u32, WordEntry>,
    editing_id: Option<u32>,
    revision: u64,
    pending_warning: Option<PersistenceError>,
    storage: S,
}

impl<S: KeyValueStore> WordListStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            entries: BTreeMap::new(),
            editing_id: None,
            revision: 0,
            pending_warning: None,
            storage,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Replaces the in-memory list with what is persisted. Absent or
    /// unreadable data leaves the list empty; nothing is returned to the caller.
    pub fn load(&mut self) {
        self.entries.clear();
        self.editing_id = None;
        self.revision += 1;

        let raw = match self.storage.get(ENTRIES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("no saved entries, starting empty");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read saved entries, starting empty");
                return;
            }
        };

        let records: Vec<WordEntry> = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "saved entries are malformed, starting empty");
                return;
            }
        };

        let (entries, migrated) = migrate(records);
        self.entries = entries;
        tracing::info!(count = self.entries.len(), migrated, "loaded entries");

        if migrated {
            self.write_through();
        }
    }

    /// All entries, ascending by id.
    pub fn entries(&self) -> Vec<&WordEntry> {
        self.entries.values().collect()
    }

    pub fn get(&self, id: u32) -> Option<&WordEntry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bumped after every applied mutation and every load.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn editing_id(&self) -> Option<u32> {
        self.editing_id
    }

    /// The last write-through failure, if the caller has not seen it yet.
    pub fn take_persistence_warning(&mut self) -> Option<PersistenceError> {
        self.pending_warning.take()
    }

    #[must_use = "this returns a Result that should be handled"]
    pub fn add(&mut self, source: &str, translation: &str) -> Result<WordEntry, ValidationError> {
        let source = source.trim();
        let translation = translation.trim();

        if let Err(e) = validate::new_pair(self.entries.values(), source, translation) {
            tracing::debug!(code = e.code(), "add rejected");
            return Err(e);
        }

        let id = self.next_id();
        let entry = WordEntry::new(id, source, translation);
        self.entries.insert(id, entry.clone());
        self.revision += 1;
        self.write_through();

        tracing::info!(id, "entry added");
        Ok(entry)
    }

    /// Only fields that actually change are held to the minimum length.
    #[must_use = "this returns a Result that should be handled"]
    pub fn edit(&mut self, id: u32, source: &str, translation: &str) -> Result<WordEntry, EditError> {
        let source = source.trim();
        let translation = translation.trim();

        let current = self.entries.get(&id).ok_or(EditError::NotFound(id))?;
        let source_changed = current.source_term != source;
        let translation_changed = current.translated_term != translation;

        if !source_changed && !translation_changed {
            return Err(EditError::NoChange);
        }

        validate::require_non_empty(Field::Source, source)?;
        validate::require_non_empty(Field::Translation, translation)?;
        if source_changed {
            validate::require_min_len(Field::Source, source)?;
        }
        if translation_changed {
            validate::require_min_len(Field::Translation, translation)?;
        }
        validate::require_unique(self.entries.values(), source, Some(id))?;

        let entry = WordEntry::new(id, source, translation);
        self.entries.insert(id, entry.clone());
        self.revision += 1;
        self.write_through();

        tracing::info!(id, "entry edited");
        Ok(entry)
    }

    /// Removes `id` and renumbers the rest to close the gap.
    pub fn remove(&mut self, id: u32) -> bool {
        if self.entries.remove(&id).is_none() {
            tracing::debug!(id, "remove: no such entry");
            return false;
        }

        let remap = self.renumber();
        self.editing_id = self.editing_id.and_then(|e| remap.get(&e).copied());
        self.revision += 1;
        self.write_through();

        tracing::info!(id, remaining = self.entries.len(), "entry removed");
        true
    }

    /// Entries whose source or translation contains `term`, ascending by id.
    pub fn search(&self, term: &str) -> Vec<&WordEntry> {
        search::filter(self.entries.values(), term)
    }

    /// Every entry, newest first.
    pub fn list_for_display(&self) -> Vec<WordEntry> {
        let mut out: Vec<WordEntry> = self.entries().into_iter().cloned().collect();
        search::sort_for_display(&mut out);
        out
    }

    /// `search` cloned and ordered the way the table shows it.
    pub fn search_for_display(&self, term: &str) -> Vec<WordEntry> {
        let mut out: Vec<WordEntry> = self.search(term).into_iter().cloned().collect();
        search::sort_for_display(&mut out);
        out
    }

    /// Marks `id` as being edited and hands back the entry to prefill the form.
    pub fn begin_edit(&mut self, id: u32) -> Option<&WordEntry> {
        let entry = self.entries.get(&id)?;
        self.editing_id = Some(id);
        Some(entry)
    }

    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
    }

    /// Applies `edit` to the entry marked by `begin_edit`.
    #[must_use = "this returns a Result that should be handled"]
    pub fn save_edit(&mut self, source: &str, translation: &str) -> Result<WordEntry, EditError> {
        let id = self.editing_id.ok_or(EditError::NotEditing)?;
        let result = self.edit(id, source, translation);

        if matches!(result, Ok(_) | Err(EditError::NotFound(_))) {
            self.editing_id = None;
        }

        result
    }

    fn next_id(&self) -> u32 {
        self.entries.keys().next_back().map_or(1, |max| max + 1)
    }

    /// Reassigns ids `1..=len` in ascending order of the current ids.
    /// Returns old id -> new id.
    fn renumber(&mut self) -> HashMap<u32, u32> {
        let old = std::mem::take(&mut self.entries);
        let mut remap = HashMap::with_capacity(old.len());

        for (new_id, (old_id, mut entry)) in (1u32..).zip(old) {
            entry.id = new_id;
            remap.insert(old_id, new_id);
            self.entries.insert(new_id, entry);
        }

        remap
    }

    fn write_through(&mut self) {
        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, "write-through failed, keeping in-memory state");
            self.pending_warning = Some(e);
        }
    }

    fn persist(&mut self) -> Result<(), PersistenceError> {
        let records: Vec<&WordEntry> = self.entries.values().collect();
        let json = serde_json::to_string(&records).map_err(|source| PersistenceError::Encode {
            key: ENTRIES_KEY.to_string(),
            source,
        })?;

        self.storage.set(ENTRIES_KEY, &json)
    }
}

/// Brings saved records in line with the store's invariants. Returns the
/// cleaned map and whether anything had to change.
///
/// - a repeated id keeps the last record, even when that record is blank
/// - records with a blank term are then dropped
/// - a repeated source term keeps the lowest id
/// - ids that are not `1..=len` are renumbered in ascending order
fn migrate(records: Vec<WordEntry>) -> (BTreeMap<u32, WordEntry>, bool) {
    let total = records.len();
    let mut by_id: BTreeMap<u32, WordEntry> = BTreeMap::new();

    for record in records {
        by_id.insert(record.id, record);
    }

    by_id.retain(|id, record| {
        let blank = record.source_term.trim().is_empty() || record.translated_term.trim().is_empty();
        if blank {
            tracing::warn!(id = *id, "dropping saved entry with a blank term");
        }
        !blank
    });

    let mut seen: HashMap<String, u32> = HashMap::new();
    let mut kept: Vec<WordEntry> = Vec::with_capacity(by_id.len());
    for (id, entry) in by_id {
        let key = fold(&entry.source_term);
        if let Some(first) = seen.get(&key) {
            tracing::warn!(id, duplicate_of = *first, "dropping saved entry with a repeated term");
            continue;
        }
        seen.insert(key, id);
        kept.push(entry);
    }

    let mut migrated = kept.len() != total;
    let mut out = BTreeMap::new();

    for (new_id, mut entry) in (1u32..).zip(kept) {
        if entry.id != new_id {
            entry.id = new_id;
            migrated = true;
        }
        out.insert(new_id, entry);
    }

    (out, migrated)
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
