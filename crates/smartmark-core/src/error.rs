use thiserror::Error;

/// All the ways things can go wrong in SmartMark
///
/// Persistence failures mostly never make it this far: the store logs them
/// and carries on. These variants are for the callers that want to know.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage operation failed: {0}")]
    StorageError(#[from] smartmark_storage::StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Bookmark not found: {0}")]
    NotFound(u64),

    #[error("Unknown category: {0}")]
    InvalidCategory(String),

    #[error("Invalid bookmark: {0}")]
    ValidationError(#[from] crate::validation::FormErrors),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
