use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Bookmark model - a title, a url and a category, keyed by id
///
/// Field names match the persisted JSON exactly, so the slot content
/// looks like `[{"id":1,"title":"GitHub","url":"https://github.com","category":"Dev"}]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub category: Category,
}

/// Which shelf a bookmark sits on
///
/// The form only ever offers the four known categories, but loading does not
/// enforce that. Anything else found in storage is kept verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Ai,
    Dev,
    Learning,
    Tools,
    Other(String),
}

impl Category {
    /// The selectable categories, in display order
    pub const ALL: [Category; 4] = [
        Category::Ai,
        Category::Dev,
        Category::Learning,
        Category::Tools,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Ai => "AI",
            Category::Dev => "Dev",
            Category::Learning => "Learning",
            Category::Tools => "Tools",
            Category::Other(name) => name,
        }
    }

    /// True for members of the fixed set
    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }

    /// Next known category, wrapping around. `Other` jumps to the first one.
    pub fn next(&self) -> Category {
        match self {
            Category::Ai => Category::Dev,
            Category::Dev => Category::Learning,
            Category::Learning => Category::Tools,
            Category::Tools | Category::Other(_) => Category::Ai,
        }
    }

    /// Previous known category, wrapping around
    pub fn previous(&self) -> Category {
        match self {
            Category::Ai | Category::Other(_) => Category::Tools,
            Category::Dev => Category::Ai,
            Category::Learning => Category::Dev,
            Category::Tools => Category::Learning,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "AI" => Category::Ai,
            "Dev" => Category::Dev,
            "Learning" => Category::Learning,
            "Tools" => Category::Tools,
            _ => Category::Other(value),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Strict parse: only the four known names are accepted
impl FromStr for Category {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Category::from(s.to_string()) {
            Category::Other(name) => Err(crate::Error::InvalidCategory(name)),
            known => Ok(known),
        }
    }
}

/// Category selector state: everything, or exactly one category
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Selector options in display order, "All" first
    pub fn options() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }

    pub fn next(&self) -> CategoryFilter {
        match self {
            CategoryFilter::All => CategoryFilter::Only(Category::Ai),
            CategoryFilter::Only(Category::Tools) | CategoryFilter::Only(Category::Other(_)) => {
                CategoryFilter::All
            }
            CategoryFilter::Only(c) => CategoryFilter::Only(c.next()),
        }
    }

    pub fn previous(&self) -> CategoryFilter {
        match self {
            CategoryFilter::All => CategoryFilter::Only(Category::Tools),
            CategoryFilter::Only(Category::Ai) | CategoryFilter::Only(Category::Other(_)) => {
                CategoryFilter::All
            }
            CategoryFilter::Only(c) => CategoryFilter::Only(c.previous()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(c) => c.as_str(),
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// A bookmark that has passed validation but has no id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkDraft {
    pub title: String,
    pub url: String,
    pub category: Category,
}

impl BookmarkDraft {
    pub fn into_bookmark(self, id: u64) -> Bookmark {
        Bookmark {
            id,
            title: self.title,
            url: self.url,
            category: self.category,
        }
    }
}

/// Field replacements for an update. `None` leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub category: Option<Category>,
}

impl BookmarkPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.category.is_none()
    }

    pub fn apply(self, bookmark: &mut Bookmark) {
        if let Some(title) = self.title {
            bookmark.title = title;
        }
        if let Some(url) = self.url {
            bookmark.url = url;
        }
        if let Some(category) = self.category {
            bookmark.category = category;
        }
    }
}

/// Submitting the edit form replaces every field
impl From<BookmarkDraft> for BookmarkPatch {
    fn from(draft: BookmarkDraft) -> Self {
        Self {
            title: Some(draft.title),
            url: Some(draft.url),
            category: Some(draft.category),
        }
    }
}
