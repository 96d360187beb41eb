use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Things that go wrong below the slot abstraction
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
