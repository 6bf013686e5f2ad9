use thiserror::Error;

/// Errors produced by cluster gateway operations.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// The addressed resource does not exist in the cluster.
    #[error("resource not found: {kind} {namespace}/{name}")]
    NotFound {
        kind: String,
        namespace: String,
        name: String,
    },

    /// The resource document is unusable (missing identity fields, unknown
    /// kind).
    #[error("invalid resource: {0}")]
    InvalidResource(String),

    /// Transport or API-server failure.
    #[error("cluster io error: {0}")]
    Io(String),
}

/// Convenience alias for gateway operations.
pub type ClusterResult<T> = Result<T, ClusterError>;
