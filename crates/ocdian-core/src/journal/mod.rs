//! Obsession/compulsion journal.
//!
//! ## Usage
//! ```rust,ignore
//! use ocdian_core::{Database, JournalStore};
//!
//! let mut journal = JournalStore::open(Database::open()?);
//! if let Some(id) = journal.add_entry("Did I lock the door?")? {
//!     journal.attach_compulsion(&id, "Went back to check three times")?;
//! }
//! ```

mod entry;
mod store;

pub use entry::{EntryId, JournalEntry};
pub use store::{JournalStore, JOURNAL_KEY};
