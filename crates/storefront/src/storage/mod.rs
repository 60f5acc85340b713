//! Durable string-keyed storage scoped to one browsing context.
//!
//! The cart never talks to a backend directly; it reads and writes
//! whole string values through [`KeyValueStorage`], the same shape as a
//! browser's local storage. Three backends exist:
//!
//! - [`MemoryStorage`] - plain map, used in tests and as a working copy
//! - [`FileStorage`] - a JSON object on disk, used by the CLI
//! - [`SessionStorage`] - a snapshot of the visitor's session, flushed back
//!   after a request's mutations

mod file;
mod memory;
mod session;

use std::path::PathBuf;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use session::SessionStorage;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The session store rejected a read or write.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// A synchronous string-keyed store.
///
/// Writes overwrite; there is no merge. Reads never fail: a backend that
/// cannot produce a value reports it as absent.
pub trait KeyValueStorage {
    /// Read the value stored under `key`.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot persist the value.
    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete the value under `key`. Absent keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot persist the removal.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &mut S {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
