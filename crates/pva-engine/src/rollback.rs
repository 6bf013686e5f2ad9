//! The rollback engine: two-phase reconciliation between the live cluster
//! and a historical snapshot.
//!
//! Ordering matters on both sides of the worktree reset. Deletes run first,
//! against the *pre-reset* worktree, because the metadata that addresses the
//! cluster object lives in the very file about to vanish. Creates and
//! updates run after the reset, reading the restored files. The reset pair
//! (hard to the target, then soft back to the old HEAD) leaves the target's
//! tree staged as forward changes for the rollback snapshot.

use pva_cluster::ClusterError;
use pva_resource::{leading_directory, Resource, ResourceKind};
use pva_store::{FileChange, ResetMode, SnapshotStore};
use pva_types::ObjectId;

use crate::env;
use crate::error::{EngineError, EngineResult};
use crate::repo::AuditRepo;

impl AuditRepo {
    /// Reconcile cluster and store so that HEAD's tree equals `target`'s
    /// tree, recording the result as a new snapshot.
    ///
    /// Failure semantics: before the worktree reset, the store is untouched
    /// and ingest is re-enabled on return. From the reset onward the store
    /// is partially applied, so rollback mode stays set until an operator
    /// intervenes.
    pub fn rollback(&self, target: ObjectId) -> EngineResult<ObjectId> {
        let mut store = self.lock_store();
        tracing::info!(
            target = %target,
            "rollback initiated, ignoring all non-rollback generated audits"
        );
        store.set_rollback_mode(true);

        let (head, patch) = match self.delete_phase(&mut store, target) {
            Ok(prepared) => prepared,
            Err(e) => {
                store.set_rollback_mode(false);
                tracing::error!(error = %e, phase = "delete", "rollback aborted; store unchanged");
                return Err(e);
            }
        };

        match self.apply_phase(&mut store, head, target, &patch) {
            Ok(snapshot) => {
                store.set_rollback_mode(false);
                tracing::info!(target = %target, snapshot = %snapshot, "rollback successful");
                Ok(snapshot)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    phase = "create-update",
                    "rollback failed after worktree reset; ingest stays fenced pending operator intervention"
                );
                Err(e)
            }
        }
    }

    /// Phases 1–3: compute the patch and issue cluster deletes for every
    /// file that disappears at the target, reading each from the pre-reset
    /// worktree.
    fn delete_phase(
        &self,
        store: &mut SnapshotStore,
        target: ObjectId,
    ) -> EngineResult<(ObjectId, Vec<FileChange>)> {
        let head = store.head_id()?;
        let patch = store.diff(head, target)?;

        for change in patch.iter().filter(|c| c.is_delete()) {
            let path = change.path();
            let resource = resource_at(store, path)?;
            match self.gateway().delete(&resource) {
                Ok(()) => tracing::info!(path, "(rollback) deleted file"),
                // Already gone from the cluster: drift we tolerate here only.
                Err(ClusterError::NotFound { .. }) => {
                    tracing::warn!(path, "(rollback) resource already absent in cluster");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok((head, patch))
    }

    /// Phases 4–6: reset the worktree, replay creates/updates into the
    /// cluster from the restored files, and record the rollback snapshot.
    fn apply_phase(
        &self,
        store: &mut SnapshotStore,
        head: ObjectId,
        target: ObjectId,
        patch: &[FileChange],
    ) -> EngineResult<ObjectId> {
        store.reset(target, ResetMode::Hard)?;
        store.reset(head, ResetMode::Soft)?;

        for change in patch.iter().filter(|c| c.to_path.is_some()) {
            let path = change.path();
            let resource = resource_at(store, path)?;
            self.gateway().create_or_update(&resource)?;
            tracing::info!(path, "(rollback) created/updated file");
        }

        let message = format!("Rollback to commit {}", target.to_hex());
        Self::add_and_commit(store, env::SERVICE_AUTHOR, env::SERVICE_EMAIL, &message)
    }
}

/// Load and validate the resource stored at a worktree path.
///
/// The kind comes from the path's leading directory; the file's `apiVersion`
/// must agree with it, otherwise the store is corrupt and the rollback must
/// not touch the cluster with it.
fn resource_at(store: &SnapshotStore, path: &str) -> EngineResult<Resource> {
    let bytes = store.read(path)?;
    let text = String::from_utf8(bytes).map_err(|e| EngineError::InvalidStoredResource {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    let resource = Resource::from_yaml(&text)?;

    let dir = leading_directory(path).ok_or_else(|| EngineError::InvalidStoredResource {
        path: path.to_string(),
        reason: "no leading directory".to_string(),
    })?;
    let dir_kind = ResourceKind::from_directory(dir)?;
    ResourceKind::check_api_version(resource.api_version()?)?;
    let doc_kind = resource.kind()?;
    if doc_kind != dir_kind {
        return Err(EngineError::InvalidStoredResource {
            path: path.to_string(),
            reason: format!("document kind {doc_kind} does not match directory {dir}"),
        });
    }
    Ok(resource)
}
