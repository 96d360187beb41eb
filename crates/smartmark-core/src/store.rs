use crate::filter::filter;
use crate::id::IdGenerator;
use crate::models::{Bookmark, BookmarkDraft, BookmarkPatch, CategoryFilter};
use crate::persistence::{self, DEFAULT_SLOT_KEY};
use smartmark_storage::KvStore;

/// The bookmark list plus the slot it is mirrored to
///
/// Owned by whoever drives the session (the TUI app or a CLI command).
/// Every mutation that actually changes something rewrites the whole slot;
/// a failed write is logged and the in-memory list stays authoritative.
pub struct BookmarkStore<S: KvStore> {
    kv: S,
    key: String,
    bookmarks: Vec<Bookmark>,
    ids: IdGenerator,
    unsaved: bool,
}

impl<S: KvStore> BookmarkStore<S> {
    /// Load from the default slot
    pub fn open(kv: S) -> Self {
        Self::open_with_key(kv, DEFAULT_SLOT_KEY)
    }

    /// Load from a named slot, falling back to the seed list
    pub fn open_with_key(kv: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let bookmarks = persistence::load_bookmarks(&kv, &key);
        let ids = IdGenerator::seeded_from(&bookmarks);

        Self {
            kv,
            key,
            bookmarks,
            ids,
            unsaved: false,
        }
    }

    /// All bookmarks in insertion order
    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    pub fn get(&self, id: u64) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    pub fn slot_key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.kv
    }

    /// True while the last write to the slot failed
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Append a new bookmark with a fresh id and return it
    pub fn add(&mut self, draft: BookmarkDraft) -> Bookmark {
        let id = match self.ids.next_id() {
            Some(id) => id,
            None => {
                tracing::warn!("Clock-derived ids exhausted, reusing the lowest free id");
                self.lowest_free_id()
            }
        };
        let bookmark = draft.into_bookmark(id);
        tracing::debug!("Adding bookmark {} ({})", bookmark.id, bookmark.url);

        self.bookmarks.push(bookmark.clone());
        self.save();
        bookmark
    }

    /// Replace the named fields of bookmark `id`
    ///
    /// Returns false (and writes nothing) when no bookmark has that id.
    pub fn update(&mut self, id: u64, patch: BookmarkPatch) -> bool {
        let Some(bookmark) = self.bookmarks.iter_mut().find(|b| b.id == id) else {
            tracing::debug!("Update skipped, no bookmark with id {}", id);
            return false;
        };

        patch.apply(bookmark);
        tracing::debug!("Updated bookmark {}", id);
        self.save();
        true
    }

    /// Drop bookmark `id`, handing it back if it existed
    pub fn remove(&mut self, id: u64) -> Option<Bookmark> {
        let index = self.bookmarks.iter().position(|b| b.id == id)?;
        let removed = self.bookmarks.remove(index);
        tracing::debug!("Removed bookmark {}", id);

        self.save();
        Some(removed)
    }

    /// Search box + category selector applied to this store's list
    pub fn search(&self, text: &str, category: &CategoryFilter) -> Vec<&Bookmark> {
        filter(&self.bookmarks, text, category)
    }

    /// Mirror the current list to the slot. Failures are logged, not returned.
    pub fn save(&mut self) {
        self.unsaved = !persistence::save_bookmarks(&self.kv, &self.key, &self.bookmarks);
    }

    fn lowest_free_id(&self) -> u64 {
        let mut taken: Vec<u64> = self.bookmarks.iter().map(|b| b.id).collect();
        taken.sort_unstable();

        let mut candidate = 1;
        for id in taken {
            if id == candidate {
                candidate += 1;
            } else if id > candidate {
                break;
            }
        }
        candidate
    }
}
