use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing the bag's documents.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading, writing or renaming a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document exists but does not parse
    #[error("Malformed document {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: schoolbag_core::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: schoolbag_core::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

/// Specialized result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
