use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Storage-level error type.
/// Every backend hook and every `ResumeStorage` operation returns `Result<T, StorageError>`,
/// so callers pattern-match on the variant instead of catching.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Resume {0} already exists")]
    AlreadyExists(String),

    #[error("Resume {0} not found")]
    NotFound(String),

    #[error("Storage is full (capacity {capacity})")]
    StorageFull { capacity: usize },

    #[error("I/O error at {}: {source}", .location.display())]
    Io {
        location: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StorageError {
    pub fn io(location: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            location: location.into(),
            source,
        }
    }

    /// True for failures of the underlying medium (disk or database).
    pub fn is_io(&self) -> bool {
        matches!(self, StorageError::Io { .. } | StorageError::Database(_))
    }
}
