//! Journal entry type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a journal entry.
pub type EntryId = String;

/// An obsession, and the compulsion it led to once the user fills it in.
///
/// Serialized as `{ "id", "obsession", "compulsion" }` with `compulsion`
/// written as `null` while unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    pub obsession: String,
    pub compulsion: Option<String>,
}

impl JournalEntry {
    /// Create an entry with a fresh id and no compulsion.
    pub fn new(obsession: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            obsession: obsession.into(),
            compulsion: None,
        }
    }

    pub fn has_compulsion(&self) -> bool {
        self.compulsion.is_some()
    }
}
