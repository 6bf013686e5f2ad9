use thiserror::Error;

/// Errors surfaced by engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An audit batch arrived while a rollback holds the store.
    #[error("audit skipped - rollback in progress")]
    RollbackInProgress,

    /// An audit event verb outside create/patch/delete.
    #[error("unsupported verb: {0} (must be create/patch/delete)")]
    UnsupportedVerb(String),

    /// The audit batch body could not be decoded.
    #[error("could not decode audit event list: {0}")]
    MalformedBatch(String),

    /// An individual event is missing the fields its verb requires.
    #[error("malformed audit event: {0}")]
    MalformedEvent(String),

    /// A stored file contradicts the directory it lives in.
    #[error("stored resource at {path} is invalid: {reason}")]
    InvalidStoredResource { path: String, reason: String },

    #[error(transparent)]
    Resource(#[from] pva_resource::ResourceError),

    #[error(transparent)]
    Store(#[from] pva_store::StoreError),

    #[error(transparent)]
    Cluster(#[from] pva_cluster::ClusterError),
}

/// Convenience alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
