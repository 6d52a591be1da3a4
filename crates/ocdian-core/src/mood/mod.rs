//! Mood check-ins tagged with triggers.
//!
//! History is held in memory for the life of the process. Callers that want
//! it to survive a restart use [`MoodStore::save_to`] / [`MoodStore::load_from`]
//! (the CLI does so when `mood.persist_history` is enabled).

mod record;
mod store;

pub use record::{MoodRecord, MoodScore, Trigger};
pub use store::{MoodDraft, MoodStore, MOOD_KEY};
