use thiserror::Error;

/// Errors produced by resource handling.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The `(kind, group)` pair is outside the supported set. Fatal by
    /// contract: callers never recover from this.
    #[error("unknown resource kind: {kind}.{group}")]
    UnknownKind { kind: String, group: String },

    /// A store path's leading directory does not belong to any kind.
    #[error("unknown resource directory: {0}")]
    UnknownDirectory(String),

    /// The resource's `apiVersion` is outside the supported set.
    #[error("unknown apiVersion found: {0}")]
    UnknownApiVersion(String),

    /// A resource document that is not a mapping at the top level.
    #[error("resource is not an object")]
    NotAnObject,

    /// A required metadata field is absent.
    #[error("resource is missing field: {0}")]
    MissingField(&'static str),

    #[error("yaml error: {0}")]
    Yaml(String),

    #[error("json error: {0}")]
    Json(String),
}

/// Convenience alias for resource operations.
pub type ResourceResult<T> = Result<T, ResourceError>;
