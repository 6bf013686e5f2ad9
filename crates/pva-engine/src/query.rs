//! Filtered history queries.

use chrono::{DateTime, Utc};

use pva_store::{path_pattern, LogFilter, Snapshot};
use pva_types::ObjectId;

use crate::error::EngineResult;
use crate::repo::AuditRepo;

/// A history query. Unset fields are wildcards.
#[derive(Clone, Debug, Default)]
pub struct ChangeQuery {
    /// Author name substring.
    pub author: Option<String>,
    /// Inclusive lower time bound.
    pub since: Option<DateTime<Utc>>,
    /// Inclusive upper time bound.
    pub until: Option<DateTime<Utc>>,
    /// Resource directory (e.g. `k8s-policies`).
    pub resource: Option<String>,
    /// Namespace path segment.
    pub namespace: Option<String>,
    /// File name segment (e.g. `npA.yaml`).
    pub name: Option<String>,
}

impl ChangeQuery {
    fn path_glob(&self) -> Option<String> {
        if self.resource.is_none() && self.namespace.is_none() && self.name.is_none() {
            return None;
        }
        Some(path_pattern(
            self.resource.as_deref().unwrap_or(""),
            self.namespace.as_deref().unwrap_or(""),
            self.name.as_deref().unwrap_or(""),
        ))
    }
}

impl AuditRepo {
    /// List snapshots from HEAD backwards, newest first, matching every
    /// supplied filter.
    pub fn filter_commits(&self, query: &ChangeQuery) -> EngineResult<Vec<(ObjectId, Snapshot)>> {
        let store = self.lock_store();
        let head = store.head_id()?;
        let filter = LogFilter {
            author: query.author.clone(),
            since: query.since,
            until: query.until,
            path_glob: query.path_glob(),
        };
        let snapshots = store
            .log(head, filter)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(snapshots)
    }
}
