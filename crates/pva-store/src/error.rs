use pva_types::ObjectId;
use thiserror::Error;

/// Errors produced by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A worktree path that does not exist (read or remove of a missing file).
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// An object id that resolves to nothing in the object database.
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// An id that resolves to an object of the wrong kind.
    #[error("object {0} is not a snapshot")]
    NotASnapshot(ObjectId),

    /// A snapshot id string that is not valid hex.
    #[error("invalid snapshot id: {0}")]
    InvalidId(String),

    /// Tag creation with a name that is already taken.
    #[error("tag already exists: {name}")]
    TagAlreadyExists { name: String },

    /// Tag deletion or resolution of a name that does not exist.
    #[error("tag not found: {name}")]
    TagNotFound { name: String },

    /// An operation that requires at least one snapshot, on an empty store.
    #[error("store has no snapshots")]
    EmptyHistory,

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
