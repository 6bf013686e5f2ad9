//! Store bootstrap: seed the snapshot store from live cluster state.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use pva_cluster::ClusterGateway;
use pva_resource::{store_path, ResourceKind};
use pva_store::{Backend, SnapshotStore};
use pva_types::Signature;

use crate::env;
use crate::error::{EngineError, EngineResult};
use crate::repo::AuditRepo;

/// Directory created under the configured root in durable mode.
const REPO_DIR: &str = "resource-audit-repo";

/// Which backend the store runs on. A startup decision, fixed for the
/// process lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageMode {
    InMemory,
    Disk,
}

impl FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mem" | "memory" | "inmemory" => Ok(StorageMode::InMemory),
            "disk" => Ok(StorageMode::Disk),
            other => Err(format!("mode must be memory(mem) or disk, '{other}' is not valid")),
        }
    }
}

/// Create (or reopen) the store and return the service repository.
///
/// On first start the current cluster state is listed kind by kind, written
/// to canonical paths, and recorded as the root snapshot. A durable store
/// that already holds history is opened as-is and seeding is skipped.
pub fn setup_repo(
    gateway: Arc<dyn ClusterGateway>,
    mode: StorageMode,
    dir: &Path,
) -> EngineResult<AuditRepo> {
    let backend = match mode {
        StorageMode::InMemory => Backend::memory(),
        StorageMode::Disk => Backend::disk(dir.join(REPO_DIR))?,
    };
    let mut store = SnapshotStore::new(backend);

    if store.is_initialized()? {
        tracing::info!("resource repository already exists - skipping initialization");
        return Ok(AuditRepo::new(store, gateway));
    }

    if let Err(e) = seed_store(&mut store, gateway.as_ref()) {
        tracing::error!(error = %e, "unable to add resource yamls to repository");
        return Err(e);
    }
    store.stage_all()?;
    store.commit(
        Signature::now(env::INIT_AUTHOR, env::SERVICE_EMAIL),
        "Initial commit of existing policies",
    )?;
    tracing::info!("repository successfully initialized");
    Ok(AuditRepo::new(store, gateway))
}

fn seed_store(store: &mut SnapshotStore, gateway: &dyn ClusterGateway) -> EngineResult<()> {
    for kind in ResourceKind::all() {
        for mut resource in gateway.list(*kind)? {
            resource.clear_server_fields();
            let name = resource
                .name()
                .map_err(EngineError::Resource)?
                .to_string();
            let path = store_path(*kind, resource.namespace(), &name);
            let yaml = resource.to_canonical_yaml()?;
            store.write(&path, yaml.as_bytes())?;
            tracing::info!(path = %path, "added resource");
        }
    }
    Ok(())
}
