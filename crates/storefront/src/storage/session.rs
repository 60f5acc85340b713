//! Session-backed storage backend.
//!
//! A visitor's session plays the role of browser local storage. Session
//! access is async while cart operations are not, so a request takes a
//! snapshot of the keys it needs, mutates the snapshot synchronously, and
//! flushes the changed keys back before responding.

use std::collections::{HashMap, HashSet};

use tower_sessions::Session;

use super::{KeyValueStorage, StorageError};

/// Working copy of selected session keys.
#[derive(Debug)]
pub struct SessionStorage {
    session: Session,
    items: HashMap<String, String>,
    dirty: HashSet<String>,
}

impl SessionStorage {
    /// Snapshot `keys` from the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn load(session: &Session, keys: &[&str]) -> Result<Self, StorageError> {
        let mut items = HashMap::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = session.get::<String>(key).await? {
                items.insert((*key).to_string(), value);
            }
        }

        Ok(Self {
            session: session.clone(),
            items,
            dirty: HashSet::new(),
        })
    }

    /// Whether any key was written since the snapshot was taken.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Write changed keys back to the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects a write.
    pub async fn flush(self) -> Result<(), StorageError> {
        for key in &self.dirty {
            match self.items.get(key) {
                Some(value) => self.session.insert(key, value).await?,
                None => {
                    self.session.remove::<String>(key).await?;
                }
            }
        }
        Ok(())
    }
}

impl KeyValueStorage for SessionStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value);
        self.dirty.insert(key.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        if self.items.remove(key).is_some() {
            self.dirty.insert(key.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_flush_writes_changed_keys() {
        let session = session();

        let mut storage = SessionStorage::load(&session, &["cart"]).await.unwrap();
        assert!(!storage.is_dirty());
        storage.set_item("cart", "[]".to_string()).unwrap();
        assert!(storage.is_dirty());
        storage.flush().await.unwrap();

        let value: Option<String> = session.get("cart").await.unwrap();
        assert_eq!(value.as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_flush_removes_deleted_keys() {
        let session = session();
        session.insert("cart", "[]").await.unwrap();

        let mut storage = SessionStorage::load(&session, &["cart"]).await.unwrap();
        assert_eq!(storage.get_item("cart").as_deref(), Some("[]"));
        storage.remove_item("cart").unwrap();
        storage.flush().await.unwrap();

        let value: Option<String> = session.get("cart").await.unwrap();
        assert_eq!(value, None);
    }
}
