//! In-memory storage backend.

use std::collections::HashMap;

use super::{KeyValueStorage, StorageError};

/// Storage held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one value.
    #[must_use]
    pub fn with_item(key: &str, value: impl Into<String>) -> Self {
        let mut items = HashMap::new();
        items.insert(key.to_string(), value.into());
        Self { items }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites() {
        let mut storage = MemoryStorage::new();
        storage.set_item("cart", "[]".to_string()).unwrap();
        storage.set_item("cart", "[1]".to_string()).unwrap();
        assert_eq!(storage.get_item("cart").as_deref(), Some("[1]"));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_remove_absent_key_is_ok() {
        let mut storage = MemoryStorage::new();
        assert!(storage.remove_item("missing").is_ok());
        assert!(storage.is_empty());
    }
}
