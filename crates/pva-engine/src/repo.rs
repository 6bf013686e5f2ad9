//! The [`AuditRepo`]: shared service state tying the snapshot store to the
//! cluster gateway.
//!
//! Every public operation acquires the store lock for its full duration:
//! ingest batches never interleave, queries see a coherent chain, and a
//! rollback keeps the lock across all of its phases. The lock is
//! intentionally coarse.

use std::sync::{Arc, Mutex, MutexGuard};

use pva_cluster::ClusterGateway;
use pva_store::SnapshotStore;
use pva_types::{ObjectId, Signature};

use crate::env;
use crate::error::EngineResult;

/// The audit service's shared repository state.
pub struct AuditRepo {
    store: Mutex<SnapshotStore>,
    gateway: Arc<dyn ClusterGateway>,
    service_account: String,
}

impl AuditRepo {
    /// Wrap an already-initialized store. The service identity is derived
    /// from the environment (see [`crate::env`]).
    pub fn new(store: SnapshotStore, gateway: Arc<dyn ClusterGateway>) -> Self {
        Self {
            store: Mutex::new(store),
            gateway,
            service_account: env::service_principal(),
        }
    }

    /// The principal the ingest self-filter matches against.
    pub fn service_account(&self) -> &str {
        &self.service_account
    }

    pub(crate) fn gateway(&self) -> &dyn ClusterGateway {
        self.gateway.as_ref()
    }

    /// Acquire the store lock. Public so operators of the embedded engine
    /// (and tests) can inspect state; hold it briefly.
    pub fn lock_store(&self) -> MutexGuard<'_, SnapshotStore> {
        self.store.lock().expect("store lock poisoned")
    }

    /// Current HEAD snapshot id.
    pub fn head(&self) -> EngineResult<ObjectId> {
        Ok(self.lock_store().head_id()?)
    }

    /// Stage the whole worktree and record one snapshot.
    pub(crate) fn add_and_commit(
        store: &mut SnapshotStore,
        username: &str,
        email: &str,
        message: &str,
    ) -> EngineResult<ObjectId> {
        store.stage_all()?;
        let id = store.commit(Signature::now(username, email), message)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::empty_repo;

    #[test]
    fn service_account_uses_env_defaults() {
        let repo = empty_repo();
        assert_eq!(
            repo.service_account(),
            "system:serviceaccount:default:audit-account"
        );
    }

    #[test]
    fn add_and_commit_advances_head() {
        let repo = empty_repo();
        let first = repo.head().unwrap();
        {
            let mut store = repo.lock_store();
            store.write("tiers/t.yaml", b"spec").unwrap();
            AuditRepo::add_and_commit(&mut store, "alice", "alice+u1@audit.example", "Created Tier /t")
                .unwrap();
        }
        let second = repo.head().unwrap();
        assert_ne!(first, second);
        let snapshot = repo.lock_store().snapshot(second).unwrap();
        assert_eq!(snapshot.parent, Some(first));
        assert_eq!(snapshot.author.name, "alice");
        assert_eq!(snapshot.author.email, "alice+u1@audit.example");
    }
}
