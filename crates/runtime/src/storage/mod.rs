//! The opaque namespaced key-value store behind all persistence.
//!
//! The store sees only strings; the [`repository`](crate::repository)
//! layer decides what they mean. Keys are `/`-separated namespaces
//! (`panini/collections`, `penalty/records`, ...).

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors surfaced by store backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String-keyed store with get/set/enumerate semantics.
///
/// Values are opaque to the store. Absent keys read as `None`; overwriting
/// an existing key is an ordinary `put`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn put(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Every key currently present, in unspecified order.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}
