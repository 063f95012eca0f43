use std::path::PathBuf;
use tasklens_core::CoreError;
use thiserror::Error;

/// Application error types for the Tasklens CLI
#[derive(Error, Debug)]
pub enum AppError {
    /// Error raised by the core library
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The task snapshot file could not be read
    #[error("Failed to read task snapshot at {path}: {source}")]
    ReadSnapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The task snapshot file is not valid JSON or has the wrong shape
    #[error("Failed to parse task snapshot at {path}: {source}")]
    ParseSnapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A task record in the snapshot does not have a recognised shape
    #[error("Malformed task record at index {index}: {source}")]
    MalformedRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A task record carries a value the model rejects
    #[error("Invalid task record at index {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: CoreError,
    },

    /// Error reading or writing the preferences file
    #[error("Failed to access preferences at {path}: {source}")]
    Preferences {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error creating a directory
    #[error("Failed to create directory at {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing an output file
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error for invalid input or validation failure
    #[error("{message}")]
    Validation { message: String },
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
