//! # OCDian Core Library
//!
//! This library provides the core logic for OCDian, a personal OCD
//! self-management tool. Every operation is available through the `ocdian`
//! CLI; any graphical front-end is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Journal**: ordered obsession/compulsion entries persisted as one JSON
//!   blob in a key-value store
//! - **Mood**: trigger-tagged mood check-ins, held in memory by default
//! - **Timer**: a tick-driven phase state machine behind the breathing,
//!   body-scan and ERP exercises; the caller delivers one `tick()` per unit
//! - **Coping / Insights**: pure views recomputed from store state on demand
//! - **Storage**: SQLite key-value blobs and TOML configuration
//!
//! ## Key Components
//!
//! - [`JournalStore`]: journal commands and persistence
//! - [`MoodStore`]: mood history and draft input state
//! - [`PhaseTimer`]: exercise timer state machine
//! - [`Database`]: blob persistence
//! - [`Config`]: application configuration management

pub mod coping;
pub mod erp;
pub mod error;
pub mod events;
pub mod insights;
pub mod journal;
pub mod mood;
pub mod storage;
pub mod timer;

pub use erp::{AnxietyLevel, ErpDuration, ExposureSession};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use insights::{InsightsReport, TriggerCount};
pub use journal::{EntryId, JournalEntry, JournalStore};
pub use mood::{MoodDraft, MoodRecord, MoodScore, MoodStore, Trigger};
pub use storage::{BlobStore, Config, Database, MemoryBlobStore};
pub use timer::{CompletionSignal, PhaseKind, PhaseTimer, TimerMode, TimerState};
