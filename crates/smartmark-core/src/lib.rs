// Core bookmark logic lives here - models, validation, filtering and the store itself
pub mod config;
pub mod error;
pub mod filter;
pub mod id;
pub mod models;
pub mod persistence;
pub mod seed;
pub mod store;
pub mod validation;

pub use config::Config;
pub use error::Error;
pub use filter::filter;
pub use models::{Bookmark, BookmarkDraft, BookmarkPatch, Category, CategoryFilter};
pub use store::BookmarkStore;
pub use validation::{validate, validate_edit, BookmarkForm, FormErrors, FormField};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
