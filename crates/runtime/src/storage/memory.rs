//! In-memory store backend.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{KeyValueStore, StorageError};

/// In-memory implementation of [`KeyValueStore`]; the default for tests
/// and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_reads_none() {
        let store = MemoryStore::new();
        assert!(store.get("panini/collections").unwrap().is_none());
    }

    #[test]
    fn put_get_overwrite() {
        let store = MemoryStore::new();
        store.put("a/b", "one".into()).unwrap();
        store.put("a/b", "two".into()).unwrap();
        assert_eq!(store.get("a/b").unwrap().as_deref(), Some("two"));
        assert_eq!(store.keys().unwrap(), vec!["a/b".to_string()]);
    }
}
