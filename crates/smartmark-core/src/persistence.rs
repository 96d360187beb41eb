// Fallback-and-log boundary between the store and the key-value slot
use crate::models::Bookmark;
use crate::seed::seed_bookmarks;
use smartmark_storage::KvStore;

/// Slot name the bookmark list lives under
pub const DEFAULT_SLOT_KEY: &str = "smart-bookmarks";

/// Read the bookmark list from its slot
///
/// Never fails: a missing slot, a backend error or unparseable content all
/// yield the seed dataset, with the reason logged.
pub fn load_bookmarks<S: KvStore + ?Sized>(kv: &S, key: &str) -> Vec<Bookmark> {
    match try_load_bookmarks(kv, key) {
        Ok(Some(bookmarks)) => {
            tracing::debug!("Loaded {} bookmarks from slot '{}'", bookmarks.len(), key);
            bookmarks
        }
        Ok(None) => {
            tracing::info!("Slot '{}' is empty, starting from seed bookmarks", key);
            seed_bookmarks()
        }
        Err(e) => {
            tracing::warn!("Error loading bookmarks from slot '{}': {}", key, e);
            seed_bookmarks()
        }
    }
}

/// Same as [`load_bookmarks`] but reports what went wrong
///
/// `Ok(None)` means the slot was never written (or is blank).
pub fn try_load_bookmarks<S: KvStore + ?Sized>(
    kv: &S,
    key: &str,
) -> crate::Result<Option<Vec<Bookmark>>> {
    let Some(raw) = kv.get(key)? else {
        return Ok(None);
    };

    if raw.trim().is_empty() {
        return Ok(None);
    }

    let bookmarks = serde_json::from_str(&raw)?;
    Ok(Some(bookmarks))
}

/// Overwrite the slot with the full list
///
/// Never fails: write errors are logged and dropped, the caller's in-memory
/// list stays as it is. Returns whether the slot now holds `bookmarks`.
pub fn save_bookmarks<S: KvStore + ?Sized>(kv: &S, key: &str, bookmarks: &[Bookmark]) -> bool {
    match try_save_bookmarks(kv, key, bookmarks) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Error saving bookmarks to slot '{}': {}", key, e);
            false
        }
    }
}

pub fn try_save_bookmarks<S: KvStore + ?Sized>(
    kv: &S,
    key: &str,
    bookmarks: &[Bookmark],
) -> crate::Result<()> {
    let json = serde_json::to_string(bookmarks)?;
    kv.set(key, &json)?;
    tracing::debug!("Saved {} bookmarks to slot '{}'", bookmarks.len(), key);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use smartmark_storage::{MemoryKvStore, StorageError};
    use std::io;

    fn unavailable(reason: &str) -> StorageError {
        StorageError::Io(io::Error::new(io::ErrorKind::PermissionDenied, reason.to_string()))
    }

    mockall::mock! {
        pub Kv {}

        impl KvStore for Kv {
            fn get(&self, key: &str) -> smartmark_storage::Result<Option<String>>;
            fn set(&self, key: &str, value: &str) -> smartmark_storage::Result<()>;
            fn remove(&self, key: &str) -> smartmark_storage::Result<()>;
        }
    }

    #[test]
    fn test_round_trip() {
        let kv = MemoryKvStore::new();
        let mut bookmarks = seed_bookmarks();
        bookmarks.push(Bookmark {
            id: 1_700_000_000_000,
            title: "Docs.rs".to_string(),
            url: "https://docs.rs".to_string(),
            category: Category::Learning,
        });

        save_bookmarks(&kv, DEFAULT_SLOT_KEY, &bookmarks);
        assert_eq!(load_bookmarks(&kv, DEFAULT_SLOT_KEY), bookmarks);
    }

    #[test]
    fn test_empty_list_round_trips() {
        let kv = MemoryKvStore::new();
        save_bookmarks(&kv, DEFAULT_SLOT_KEY, &[]);
        assert!(load_bookmarks(&kv, DEFAULT_SLOT_KEY).is_empty());
    }

    #[test]
    fn test_absent_slot_yields_seed() {
        let kv = MemoryKvStore::new();
        assert_eq!(load_bookmarks(&kv, DEFAULT_SLOT_KEY), seed_bookmarks());
    }

    #[test]
    fn test_corrupt_slot_yields_seed() {
        for garbage in ["{not json", "null", "{\"id\":1}", "[{\"id\":\"x\"}]", ""] {
            let kv = MemoryKvStore::with_slot(DEFAULT_SLOT_KEY, garbage);
            assert_eq!(
                load_bookmarks(&kv, DEFAULT_SLOT_KEY),
                seed_bookmarks(),
                "input: {:?}",
                garbage
            );
        }
    }

    #[test]
    fn test_read_failure_yields_seed() {
        let mut kv = MockKv::new();
        kv.expect_get()
            .returning(|_| Err(unavailable("disk on fire")));

        assert_eq!(load_bookmarks(&kv, DEFAULT_SLOT_KEY), seed_bookmarks());
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let mut kv = MockKv::new();
        kv.expect_set()
            .times(1)
            .returning(|_, _| Err(unavailable("quota exceeded")));

        // Must not panic or propagate
        assert!(!save_bookmarks(&kv, DEFAULT_SLOT_KEY, &seed_bookmarks()));

        assert!(try_save_bookmarks(&kv_failing(), DEFAULT_SLOT_KEY, &[]).is_err());
    }

    fn kv_failing() -> MockKv {
        let mut kv = MockKv::new();
        kv.expect_set()
            .returning(|_, _| Err(unavailable("read-only")));
        kv
    }

    #[test]
    fn test_writes_under_given_key() {
        let mut kv = MockKv::new();
        kv.expect_set()
            .withf(|key, value| key.to_string() == "custom" && value.starts_with('['))
            .times(1)
            .returning(|_, _| Ok(()));

        assert!(save_bookmarks(&kv, "custom", &seed_bookmarks()));
    }
}
