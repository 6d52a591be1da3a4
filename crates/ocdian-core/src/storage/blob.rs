//! Named-blob persistence seam.
//!
//! The journal (and, when enabled, the mood history) is stored as one JSON
//! string under a fixed key. Anything that can get and put a string by key
//! can back the stores: the SQLite `kv` table in production, a map in tests.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Result;

/// A key-value store holding serialized blobs.
pub trait BlobStore {
    /// Fetch the blob stored under `key`, if any.
    fn get_blob(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`.
    fn put_blob(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: BlobStore + ?Sized> BlobStore for &T {
    fn get_blob(&self, key: &str) -> Result<Option<String>> {
        (**self).get_blob(key)
    }

    fn put_blob(&self, key: &str, value: &str) -> Result<()> {
        (**self).put_blob(key, value)
    }
}

/// Process-local blob store.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RefCell<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.blobs.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.borrow().is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get_blob(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn put_blob(&self, key: &str, value: &str) -> Result<()> {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_overwrites() {
        let store = MemoryBlobStore::new();
        assert!(store.get_blob("k").unwrap().is_none());
        store.put_blob("k", "one").unwrap();
        store.put_blob("k", "two").unwrap();
        assert_eq!(store.get_blob("k").unwrap().as_deref(), Some("two"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn borrowed_store_is_a_store() {
        let store = MemoryBlobStore::new();
        let by_ref = &store;
        by_ref.put_blob("k", "v").unwrap();
        assert_eq!(store.get_blob("k").unwrap().as_deref(), Some("v"));
    }
}
