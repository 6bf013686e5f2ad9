use pva_resource::{Resource, ResourceKind};

use crate::error::ClusterResult;

/// Read/write access to the live cluster's resources.
///
/// Implementations must be thread-safe; the engine calls the gateway while
/// holding its store lock, so one call is in flight at a time per service.
///
/// Contract:
/// - `list` returns every resource of the kind, across all namespaces.
/// - `get` fails with `NotFound` rather than returning an empty document.
/// - `create_or_update` creates when absent; when present it carries the
///   server's current resource-version over onto the update, so it is
///   idempotent under replay.
/// - `delete` removes by identity; callers tolerate `NotFound` only during
///   rollback.
pub trait ClusterGateway: Send + Sync {
    /// List all resources of one kind.
    fn list(&self, kind: ResourceKind) -> ClusterResult<Vec<Resource>>;

    /// Fetch one resource by identity.
    fn get(&self, kind: ResourceKind, namespace: &str, name: &str) -> ClusterResult<Resource>;

    /// Create the resource, or update it in place if it already exists.
    fn create_or_update(&self, resource: &Resource) -> ClusterResult<()>;

    /// Delete the resource identified by the document's kind/namespace/name.
    fn delete(&self, resource: &Resource) -> ClusterResult<()>;
}
