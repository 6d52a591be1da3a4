//! Mood check-in history plus the draft the input flow edits before saving.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::record::{MoodRecord, MoodScore, Trigger};
use crate::error::Result;
use crate::storage::BlobStore;

/// Blob key used when mood history persistence is enabled.
pub const MOOD_KEY: &str = "mood_history";

/// Transient input state: selected triggers and note text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodDraft {
    pub triggers: BTreeSet<Trigger>,
    pub note: String,
}

#[derive(Debug, Default)]
pub struct MoodStore {
    records: Vec<MoodRecord>,
    draft: MoodDraft,
}

impl MoodStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records, oldest first.
    pub fn history(&self) -> &[MoodRecord] {
        &self.records
    }

    pub fn draft(&self) -> &MoodDraft {
        &self.draft
    }

    /// Select or deselect a trigger in the draft. Returns whether it is now
    /// selected.
    pub fn toggle_trigger(&mut self, trigger: Trigger) -> bool {
        if self.draft.triggers.remove(&trigger) {
            false
        } else {
            self.draft.triggers.insert(trigger);
            true
        }
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.draft.note = note.into();
    }

    /// Append a record stamped now and clear the draft.
    pub fn record_mood(
        &mut self,
        score: MoodScore,
        triggers: impl IntoIterator<Item = Trigger>,
        note: impl Into<String>,
    ) -> &MoodRecord {
        let record = MoodRecord::new(score, triggers.into_iter().collect(), note);
        tracing::debug!(score = score.value(), triggers = record.triggers.len(), "mood recorded");
        self.records.push(record);
        self.draft = MoodDraft::default();
        &self.records[self.records.len() - 1]
    }

    /// Record from the current draft.
    pub fn record_draft(&mut self, score: MoodScore) -> &MoodRecord {
        let MoodDraft { triggers, note } = std::mem::take(&mut self.draft);
        self.record_mood(score, triggers, note)
    }

    /// Restore history written by [`save_to`](Self::save_to). A missing or
    /// unreadable blob leaves the history empty.
    pub fn load_from<S: BlobStore>(store: &S) -> Self {
        let records = match store.get_blob(MOOD_KEY) {
            Ok(Some(blob)) => serde_json::from_str(&blob).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "discarding unreadable mood history");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read mood history");
                Vec::new()
            }
        };
        Self {
            records,
            draft: MoodDraft::default(),
        }
    }

    pub fn save_to<S: BlobStore>(&self, store: &S) -> Result<()> {
        let json = serde_json::to_string(&self.records)?;
        store.put_blob(MOOD_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBlobStore;

    fn score(v: u8) -> MoodScore {
        MoodScore::new(v).unwrap()
    }

    #[test]
    fn history_keeps_insertion_order() {
        let mut moods = MoodStore::new();
        moods.record_mood(score(2), [Trigger::Work], "rough day");
        moods.record_mood(score(4), Vec::<Trigger>::new(), "better");
        let scores: Vec<_> = moods.history().iter().map(|r| r.mood_score.value()).collect();
        assert_eq!(scores, [2, 4]);
        assert!(moods.history()[0].timestamp <= moods.history()[1].timestamp);
    }

    #[test]
    fn recording_clears_draft() {
        let mut moods = MoodStore::new();
        assert!(moods.toggle_trigger(Trigger::Stress));
        moods.set_note("deadline");
        moods.record_mood(score(3), [Trigger::Stress], "deadline");
        assert_eq!(moods.draft(), &MoodDraft::default());
    }

    #[test]
    fn record_draft_uses_selection() {
        let mut moods = MoodStore::new();
        moods.toggle_trigger(Trigger::Family);
        moods.toggle_trigger(Trigger::Health);
        moods.toggle_trigger(Trigger::Health);
        moods.set_note("visit");

        let record = moods.record_draft(score(5)).clone();
        assert_eq!(record.triggers, BTreeSet::from([Trigger::Family]));
        assert_eq!(record.note, "visit");
        assert!(moods.draft().triggers.is_empty());
    }

    #[test]
    fn duplicate_triggers_collapse() {
        let mut moods = MoodStore::new();
        let record = moods.record_mood(score(1), [Trigger::Work, Trigger::Work], "");
        assert_eq!(record.triggers.len(), 1);
    }

    #[test]
    fn persisted_history_roundtrips() {
        let store = MemoryBlobStore::new();
        let mut moods = MoodStore::new();
        moods.record_mood(score(2), [Trigger::Social], "party");
        moods.save_to(&store).unwrap();

        let restored = MoodStore::load_from(&store);
        assert_eq!(restored.history(), moods.history());
    }

    #[test]
    fn unreadable_history_loads_empty() {
        let store = MemoryBlobStore::new();
        store.put_blob(MOOD_KEY, "[{\"mood_score\": 42}]").unwrap();
        assert!(MoodStore::load_from(&store).history().is_empty());
    }
}
