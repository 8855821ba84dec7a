use std::path::PathBuf;

/// Errors from note store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The identifier cannot be mapped to a single file under the root.
    #[error("invalid note name {name:?}: {reason}")]
    InvalidIdentifier { name: String, reason: String },

    /// The note content was rejected (empty or whitespace-only).
    #[error("invalid note content: {reason}")]
    InvalidContent { reason: String },

    /// No note exists with this identifier.
    #[error("note not found: {name}")]
    NotFound { name: String },

    /// A note with this identifier already exists.
    #[error("note already exists: {name}")]
    AlreadyExists { name: String },

    /// The configured root directory is missing or not a directory.
    #[error("notes directory does not exist: {}", .0.display())]
    RootMissing(PathBuf),

    /// I/O error from the underlying filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
