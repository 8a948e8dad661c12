use thiserror::Error;

/// Failures surfaced by the storage layer. Logged at the repository and
/// propagated unmodified to the caller.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;
