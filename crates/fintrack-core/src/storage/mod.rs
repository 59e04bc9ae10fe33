//! Key-value persistence collaborators
//!
//! The history is stored as one blob under one key, replaced in full on every
//! write. Any backend that can `get` and `set` a string by key qualifies:
//!
//! - `MemoryStore` keeps blobs in process memory (tests, dry runs)
//! - `FileStore` keeps one JSON file per key in a directory
//! - [`Database`](crate::db::Database) keeps blobs in an encrypted SQLite table
//!
//! There is no locking across processes: two writers racing on the same key
//! resolve as last-write-wins.

use crate::error::Result;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// A string blob store addressed by key
pub trait KeyValueStore: Send + Sync {
    /// Human-readable backend name
    fn name(&self) -> &str;

    /// Read the value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
