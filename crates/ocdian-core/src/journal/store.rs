//! Journal store: the ordered obsession/compulsion log and its persistence.
//!
//! Every successful mutation rewrites the whole sequence as one JSON blob
//! under [`JOURNAL_KEY`]. Empty input and unknown ids are silent no-ops, and a
//! missing or unreadable blob loads as an empty journal.

use super::entry::{EntryId, JournalEntry};
use crate::coping;
use crate::error::Result;
use crate::storage::BlobStore;

/// Blob key holding the serialized entries.
pub const JOURNAL_KEY: &str = "journal_entries";

pub struct JournalStore<S: BlobStore> {
    store: S,
    entries: Vec<JournalEntry>,
}

impl<S: BlobStore> JournalStore<S> {
    /// Create a store over `store` and load whatever it holds.
    pub fn open(store: S) -> Self {
        let mut journal = Self {
            store,
            entries: Vec::new(),
        };
        journal.load();
        journal
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Coping strategies matching an entry's obsession text.
    pub fn strategies_for(&self, id: &str) -> Vec<&'static str> {
        self.get(id)
            .map(|e| coping::match_strategies(&e.obsession))
            .unwrap_or_default()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Append a new entry. Returns its id, or `None` when the text is blank.
    pub fn add_entry(&mut self, obsession: &str) -> Result<Option<EntryId>> {
        let obsession = obsession.trim();
        if obsession.is_empty() {
            tracing::debug!("ignoring blank obsession");
            return Ok(None);
        }

        let entry = JournalEntry::new(obsession);
        let id = entry.id.clone();
        let mut next = self.entries.clone();
        next.push(entry);
        self.commit(next)?;
        Ok(Some(id))
    }

    /// Overwrite an entry's compulsion. Returns `false` when nothing changed
    /// (blank text or unknown id).
    pub fn attach_compulsion(&mut self, id: &str, compulsion: &str) -> Result<bool> {
        let compulsion = compulsion.trim();
        if compulsion.is_empty() {
            tracing::debug!(id, "ignoring blank compulsion");
            return Ok(false);
        }

        let Some(index) = self.entries.iter().position(|e| e.id == id) else {
            tracing::debug!(id, "no journal entry with this id");
            return Ok(false);
        };
        let mut next = self.entries.clone();
        next[index].compulsion = Some(compulsion.to_string());
        self.commit(next)?;
        Ok(true)
    }

    /// Remove the entry at `index`. Out-of-range indices are ignored.
    pub fn delete_entry(&mut self, index: usize) -> Result<Option<JournalEntry>> {
        if index >= self.entries.len() {
            tracing::debug!(index, len = self.entries.len(), "delete index out of range");
            return Ok(None);
        }
        let mut next = self.entries.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        Ok(Some(removed))
    }

    /// Remove every entry. Returns how many were removed.
    pub fn delete_all(&mut self) -> Result<usize> {
        let removed = self.entries.len();
        self.commit(Vec::new())?;
        Ok(removed)
    }

    /// Write the full sequence to the blob store.
    pub fn save(&self) -> Result<()> {
        self.write(&self.entries)
    }

    /// Persist `next`, then make it the in-memory sequence. A failed write
    /// leaves the store as it was.
    fn commit(&mut self, next: Vec<JournalEntry>) -> Result<()> {
        if let Err(e) = self.write(&next) {
            tracing::warn!(error = %e, "journal write failed; change discarded");
            return Err(e);
        }
        self.entries = next;
        Ok(())
    }

    fn write(&self, entries: &[JournalEntry]) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        self.store.put_blob(JOURNAL_KEY, &json)
    }

    /// Replace the in-memory sequence with the persisted one.
    ///
    /// Leaves the store unchanged when there is no blob or it cannot be read.
    pub fn load(&mut self) {
        let blob = match self.store.get_blob(JOURNAL_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error = %e, "could not read journal blob");
                return;
            }
        };
        match serde_json::from_str::<Vec<JournalEntry>>(&blob) {
            Ok(entries) => self.entries = entries,
            Err(e) => tracing::warn!(error = %e, "discarding unreadable journal blob"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBlobStore;
    use proptest::prelude::*;

    fn journal() -> JournalStore<MemoryBlobStore> {
        JournalStore::open(MemoryBlobStore::new())
    }

    /// Reads from an inner map; writes fail while `fail_writes` is set.
    #[derive(Default)]
    struct FailingWrites {
        inner: MemoryBlobStore,
        fail_writes: std::cell::Cell<bool>,
    }

    impl BlobStore for FailingWrites {
        fn get_blob(&self, key: &str) -> Result<Option<String>> {
            self.inner.get_blob(key)
        }

        fn put_blob(&self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes.get() {
                return Err(std::io::Error::other("disk full").into());
            }
            self.inner.put_blob(key, value)
        }
    }

    #[test]
    fn failed_write_leaves_journal_unchanged() {
        let store = FailingWrites::default();
        let mut j = JournalStore::open(&store);
        let first = j.add_entry("stove on").unwrap().unwrap();
        j.add_entry("door locked").unwrap();
        let before = j.entries().to_vec();
        let blob_before = store.get_blob(JOURNAL_KEY).unwrap();

        store.fail_writes.set(true);
        assert!(j.add_entry("counting").is_err());
        assert!(j.attach_compulsion(&first, "checked").is_err());
        assert!(j.delete_entry(0).is_err());
        assert!(j.delete_all().is_err());
        assert_eq!(j.entries(), before.as_slice());
        assert_eq!(store.get_blob(JOURNAL_KEY).unwrap(), blob_before);

        // A later successful write must not carry the rejected changes.
        store.fail_writes.set(false);
        j.add_entry("third").unwrap();
        let reopened = JournalStore::open(&store);
        let texts: Vec<_> = reopened.entries().iter().map(|e| e.obsession.as_str()).collect();
        assert_eq!(texts, ["stove on", "door locked", "third"]);
        assert!(reopened.get(&first).unwrap().compulsion.is_none());
    }

    #[test]
    fn add_trims_and_persists() {
        let mut j = journal();
        let id = j.add_entry("  counting steps  ").unwrap().unwrap();
        assert_eq!(j.get(&id).unwrap().obsession, "counting steps");
        assert!(j.store.get_blob(JOURNAL_KEY).unwrap().is_some());
    }

    #[test]
    fn blank_add_is_noop() {
        let mut j = journal();
        assert!(j.add_entry("").unwrap().is_none());
        assert!(j.add_entry("   \n\t").unwrap().is_none());
        assert!(j.is_empty());
        assert!(j.store.is_empty());
    }

    #[test]
    fn attach_compulsion_overwrites() {
        let mut j = journal();
        let id = j.add_entry("stove on").unwrap().unwrap();
        assert!(j.attach_compulsion(&id, "checked twice").unwrap());
        assert!(j.attach_compulsion(&id, "checked five times").unwrap());
        assert_eq!(
            j.get(&id).unwrap().compulsion.as_deref(),
            Some("checked five times")
        );
    }

    #[test]
    fn attach_blank_compulsion_is_noop() {
        let mut j = journal();
        let id = j.add_entry("stove on").unwrap().unwrap();
        assert!(!j.attach_compulsion(&id, "  ").unwrap());
        assert!(j.get(&id).unwrap().compulsion.is_none());
    }

    #[test]
    fn attach_unknown_id_leaves_store_unchanged() {
        let mut j = journal();
        j.add_entry("stove on").unwrap();
        let before = j.entries().to_vec();
        let blob_before = j.store.get_blob(JOURNAL_KEY).unwrap();

        assert!(!j.attach_compulsion("no-such-id", "checked").unwrap());
        assert_eq!(j.entries(), before.as_slice());
        assert_eq!(j.store.get_blob(JOURNAL_KEY).unwrap(), blob_before);
    }

    #[test]
    fn delete_by_index() {
        let mut j = journal();
        j.add_entry("one").unwrap();
        j.add_entry("two").unwrap();
        j.add_entry("three").unwrap();

        let removed = j.delete_entry(1).unwrap().unwrap();
        assert_eq!(removed.obsession, "two");
        let left: Vec<_> = j.entries().iter().map(|e| e.obsession.as_str()).collect();
        assert_eq!(left, ["one", "three"]);

        assert!(j.delete_entry(5).unwrap().is_none());
        assert_eq!(j.len(), 2);
    }

    #[test]
    fn delete_all_persists_empty_list() {
        let mut j = journal();
        j.add_entry("one").unwrap();
        j.add_entry("two").unwrap();
        assert_eq!(j.delete_all().unwrap(), 2);
        assert_eq!(j.store.get_blob(JOURNAL_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn reopen_restores_entries_in_order() {
        let store = MemoryBlobStore::new();
        let ids = {
            let mut j = JournalStore::open(&store);
            let a = j.add_entry("first").unwrap().unwrap();
            let b = j.add_entry("second").unwrap().unwrap();
            j.attach_compulsion(&a, "washed hands").unwrap();
            vec![a, b]
        };

        let j = JournalStore::open(&store);
        let loaded: Vec<_> = j.entries().iter().map(|e| e.id.clone()).collect();
        assert_eq!(loaded, ids);
        assert_eq!(j.entries()[0].compulsion.as_deref(), Some("washed hands"));
    }

    #[test]
    fn corrupt_blob_loads_empty() {
        let store = MemoryBlobStore::new();
        store.put_blob(JOURNAL_KEY, "{not json").unwrap();
        let j = JournalStore::open(&store);
        assert!(j.is_empty());
    }

    #[test]
    fn strategies_for_entry() {
        let mut j = journal();
        let id = j.add_entry("Fear of contamination from door handles").unwrap().unwrap();
        assert!(!j.strategies_for(&id).is_empty());
        assert!(j.strategies_for("missing").is_empty());
    }

    proptest! {
        #[test]
        fn count_matches_non_blank_adds(texts in prop::collection::vec("[ a-z]{0,12}", 0..30)) {
            let mut j = journal();
            for text in &texts {
                j.add_entry(text).unwrap();
            }
            let expected = texts.iter().filter(|t| !t.trim().is_empty()).count();
            prop_assert_eq!(j.len(), expected);
        }

        #[test]
        fn save_load_roundtrip(
            items in prop::collection::vec(("[^\\s][a-zA-Z0-9 ,.!?'\"]{0,40}", prop::option::of(".{1,20}")), 0..20)
        ) {
            let store = MemoryBlobStore::new();
            let entries: Vec<JournalEntry> = items
                .into_iter()
                .map(|(obsession, compulsion)| JournalEntry {
                    compulsion,
                    ..JournalEntry::new(obsession)
                })
                .collect();

            let mut writer = JournalStore::open(&store);
            writer.entries = entries.clone();
            writer.save().unwrap();

            let reader = JournalStore::open(&store);
            prop_assert_eq!(reader.entries(), entries.as_slice());
        }
    }
}
