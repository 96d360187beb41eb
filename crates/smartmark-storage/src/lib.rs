// Key-value slot storage
// The terminal stand-in for browser local storage: named string slots, nothing more

pub mod error;
pub mod memory;
pub mod sqlite;

pub use error::{Result, StorageError};
pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

/// A durable map of named string slots
///
/// Backends only move opaque strings around. What goes inside a slot
/// (a JSON array of bookmarks, usually) is the caller's business.
pub trait KvStore {
    /// Read a slot. `Ok(None)` means the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a slot with a new value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Drop a slot. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
