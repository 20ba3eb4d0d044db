//! Persistence shim
//!
//! A small key-value storage contract with in-memory and on-disk backends,
//! a typed [`Persisted`] value bound to an explicit key, and (feature
//! `bridge`) an asynchronous host bridge for shells where storage lives on
//! the other side of a message channel.

mod file;
mod memory;
mod persisted;

#[cfg(feature = "bridge")]
pub mod bridge;

use thiserror::Error;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use persisted::{Persisted, PersistentCalculator, CALCULATOR_KEY};

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file or a value is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The host side of a bridge has gone away
    #[error("storage bridge closed")]
    BridgeClosed,

    /// The host reported a failure
    #[error("host error: {message}")]
    Host {
        /// Error message
        message: String,
    },
}

impl StorageError {
    /// Create a host error
    #[must_use]
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host {
            message: message.into(),
        }
    }
}

/// Synchronous string key-value storage
pub trait KeyValueStore {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`; removing an absent key is not an error
    fn remove(&mut self, key: &str) -> StorageResult<()>;

    /// Removes every key
    fn clear(&mut self) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn clear(&mut self) -> StorageResult<()> {
        (**self).clear()
    }
}
