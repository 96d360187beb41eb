use crate::models::Bookmark;

/// Clock-derived, strictly increasing bookmark ids
///
/// Ids are the current unix time in milliseconds, bumped past the last id
/// handed out whenever the clock has not moved (or went backwards). Two adds
/// inside the same millisecond therefore still get distinct ids. Once the last
/// id is `u64::MAX` there is nothing above it and the generator yields `None`.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start above every id already in use
    pub fn seeded_from(bookmarks: &[Bookmark]) -> Self {
        Self {
            last: bookmarks.iter().map(|b| b.id).max().unwrap_or(0),
        }
    }

    /// Next id based on the wall clock
    pub fn next_id(&mut self) -> Option<u64> {
        let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
        self.next_at(now)
    }

    /// Next id given an explicit clock reading
    pub fn next_at(&mut self, now_millis: u64) -> Option<u64> {
        let id = now_millis.max(self.last.checked_add(1)?);
        self.last = id;
        Some(id)
    }

    /// Largest id handed out or observed so far
    pub fn last(&self) -> u64 {
        self.last
    }
}
