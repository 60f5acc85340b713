//! Cart snapshot persistence.
//!
//! The cart is stored as one JSON array under [`CART_STORAGE_KEY`]. There
//! is no schema version: anything that does not parse is treated as an
//! empty cart so a stale or hand-edited snapshot never breaks a page.

use crate::storage::{KeyValueStorage, StorageError};

use super::CartState;

/// Storage key holding the cart snapshot.
pub const CART_STORAGE_KEY: &str = "cart";

/// Reads and writes [`CartState`] snapshots.
#[derive(Debug)]
pub struct CartRepository<S> {
    storage: S,
}

impl<S: KeyValueStorage> CartRepository<S> {
    /// Wrap a storage backend.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Load the persisted cart.
    ///
    /// A missing key or malformed snapshot yields an empty cart.
    #[must_use]
    pub fn load(&self) -> CartState {
        let Some(raw) = self.storage.get_item(CART_STORAGE_KEY) else {
            return CartState::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Discarding malformed cart snapshot");
            CartState::new()
        })
    }

    /// Overwrite the persisted cart with `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend rejects the write.
    pub fn save(&mut self, state: &CartState) -> Result<(), StorageError> {
        let json = serde_json::to_string(state)?;
        self.storage.set_item(CART_STORAGE_KEY, json)
    }

    /// The raw persisted snapshot, exactly as stored.
    #[must_use]
    pub fn snapshot(&self) -> Option<String> {
        self.storage.get_item(CART_STORAGE_KEY)
    }

    /// Give back the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }
}
