//! Lazy history traversal with filtering.
//!
//! [`History`] walks parent links from a starting snapshot, newest first,
//! yielding the snapshots that pass every supplied filter. The walk is
//! finite (history is a chain) and restartable from any snapshot id.

use chrono::{DateTime, Utc};

use pva_types::ObjectId;

use crate::diff::diff_trees;
use crate::error::StoreResult;
use crate::glob::glob_match;
use crate::object::{Snapshot, Tree};
use crate::store::SnapshotStore;

/// Filters applied during a history walk. Unset fields match everything.
#[derive(Clone, Debug, Default)]
pub struct LogFilter {
    /// Author name substring.
    pub author: Option<String>,
    /// Inclusive lower bound on the snapshot timestamp.
    pub since: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the snapshot timestamp.
    pub until: Option<DateTime<Utc>>,
    /// Path glob matched against the snapshot's file-change set.
    pub path_glob: Option<String>,
}

impl LogFilter {
    fn matches(&self, store: &SnapshotStore, snapshot: &Snapshot) -> StoreResult<bool> {
        if let Some(author) = &self.author {
            if !snapshot.author.name.contains(author.as_str()) {
                return Ok(false);
            }
        }
        if let Some(since) = self.since {
            if snapshot.author.when < since {
                return Ok(false);
            }
        }
        if let Some(until) = self.until {
            if snapshot.author.when > until {
                return Ok(false);
            }
        }
        if let Some(pattern) = &self.path_glob {
            // The change set is relative to the parent; the root snapshot's
            // change set is its whole tree.
            let new_tree = store.tree_object(snapshot.tree)?;
            let old_tree = match snapshot.parent {
                Some(parent) => {
                    let parent_snapshot = store.snapshot(parent)?;
                    store.tree_object(parent_snapshot.tree)?
                }
                None => Tree::empty(),
            };
            let touched = diff_trees(&old_tree, &new_tree).into_iter().any(|change| {
                let from = change.from_path.as_deref().is_some_and(|p| glob_match(pattern, p));
                let to = change.to_path.as_deref().is_some_and(|p| glob_match(pattern, p));
                from || to
            });
            if !touched {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Iterator over filtered history, newest first.
pub struct History<'a> {
    store: &'a SnapshotStore,
    next: Option<ObjectId>,
    filter: LogFilter,
}

impl<'a> History<'a> {
    pub(crate) fn new(store: &'a SnapshotStore, from: ObjectId, filter: LogFilter) -> Self {
        Self {
            store,
            next: Some(from),
            filter,
        }
    }
}

impl Iterator for History<'_> {
    type Item = StoreResult<(ObjectId, Snapshot)>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.next {
            let snapshot = match self.store.snapshot(id) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    self.next = None;
                    return Some(Err(e));
                }
            };
            self.next = snapshot.parent;
            match self.filter.matches(self.store, &snapshot) {
                Ok(true) => return Some(Ok((id, snapshot))),
                Ok(false) => continue,
                Err(e) => {
                    self.next = None;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Backend;
    use pva_types::Signature;

    fn sig(name: &str) -> Signature {
        Signature::now(name, format!("{name}@audit.example"))
    }

    /// Store with: root (audit-init, npA), c1 (alice, +npB), c2 (bob, ~npA),
    /// c3 (alice, +tier).
    fn history_fixture() -> (SnapshotStore, Vec<ObjectId>) {
        let mut s = SnapshotStore::new(Backend::memory());
        s.write("k8s-policies/nsA/npA.yaml", b"npA v1").unwrap();
        s.stage_all().unwrap();
        let root = s
            .commit(sig("audit-init"), "Initial commit of existing policies")
            .unwrap();

        s.write("k8s-policies/nsA/npB.yaml", b"npB v1").unwrap();
        s.stage_all().unwrap();
        let c1 = s.commit(sig("alice"), "Created K8s NetworkPolicy nsA/npB").unwrap();

        s.write("k8s-policies/nsA/npA.yaml", b"npA v2").unwrap();
        s.stage_all().unwrap();
        let c2 = s.commit(sig("bob"), "Updated K8s NetworkPolicy nsA/npA").unwrap();

        s.write("tiers/TierA.yaml", b"tier").unwrap();
        s.stage_all().unwrap();
        let c3 = s.commit(sig("alice"), "Created Tier /TierA").unwrap();

        (s, vec![root, c1, c2, c3])
    }

    fn collect(store: &SnapshotStore, filter: LogFilter) -> Vec<(ObjectId, Snapshot)> {
        store
            .log(store.head_id().unwrap(), filter)
            .collect::<StoreResult<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn unfiltered_walk_is_newest_first_and_complete() {
        let (s, ids) = history_fixture();
        let all = collect(&s, LogFilter::default());
        let got: Vec<ObjectId> = all.iter().map(|(id, _)| *id).collect();
        let expected: Vec<ObjectId> = ids.iter().rev().copied().collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn chain_length_tracks_commits() {
        let (s, ids) = history_fixture();
        assert_eq!(collect(&s, LogFilter::default()).len(), ids.len());
    }

    #[test]
    fn author_filter_is_substring() {
        let (s, _) = history_fixture();
        let filter = LogFilter {
            author: Some("alice".into()),
            ..Default::default()
        };
        let found = collect(&s, filter);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|(_, c)| c.author.name == "alice"));

        let filter = LogFilter {
            author: Some("ali".into()),
            ..Default::default()
        };
        assert_eq!(collect(&s, filter).len(), 2);
    }

    #[test]
    fn time_range_is_inclusive() {
        let (s, ids) = history_fixture();
        let c2_when = s.snapshot(ids[2]).unwrap().author.when;
        let filter = LogFilter {
            since: Some(c2_when),
            until: Some(c2_when),
            ..Default::default()
        };
        let found = collect(&s, filter);
        assert!(found.iter().any(|(id, _)| *id == ids[2]));
        assert!(found.iter().all(|(_, c)| c.author.when == c2_when));
    }

    #[test]
    fn path_filter_matches_change_set() {
        let (s, ids) = history_fixture();
        let filter = LogFilter {
            path_glob: Some("k8s-policies/nsA/npA.yaml".into()),
            ..Default::default()
        };
        let found = collect(&s, filter);
        // Root created npA; c2 updated it.
        let got: Vec<ObjectId> = found.iter().map(|(id, _)| *id).collect();
        assert_eq!(got, vec![ids[2], ids[0]]);
    }

    #[test]
    fn path_filter_with_wildcards() {
        let (s, ids) = history_fixture();
        let filter = LogFilter {
            path_glob: Some("k8s-policies/*/*".into()),
            ..Default::default()
        };
        let got: Vec<ObjectId> = collect(&s, filter).iter().map(|(id, _)| *id).collect();
        // Everything except the tier commit.
        assert_eq!(got, vec![ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn path_filter_sees_deletions_by_old_path() {
        let (mut s, _) = history_fixture();
        s.remove("k8s-policies/nsA/npB.yaml").unwrap();
        s.stage_all().unwrap();
        let deletion = s.commit(sig("carol"), "Deleted K8s NetworkPolicy nsA/npB").unwrap();

        let filter = LogFilter {
            path_glob: Some("k8s-policies/nsA/npB.yaml".into()),
            ..Default::default()
        };
        let got: Vec<ObjectId> = collect(&s, filter).iter().map(|(id, _)| *id).collect();
        assert!(got.contains(&deletion));
    }

    #[test]
    fn combined_filters_intersect() {
        let (s, ids) = history_fixture();
        let filter = LogFilter {
            author: Some("alice".into()),
            path_glob: Some("tiers/*".into()),
            ..Default::default()
        };
        let got: Vec<ObjectId> = collect(&s, filter).iter().map(|(id, _)| *id).collect();
        assert_eq!(got, vec![ids[3]]);
    }

    #[test]
    fn restartable_from_any_snapshot() {
        let (s, ids) = history_fixture();
        let from_c1: Vec<ObjectId> = s
            .log(ids[1], LogFilter::default())
            .collect::<StoreResult<Vec<_>>>()
            .unwrap()
            .iter()
            .map(|(id, _)| *id)
            .collect();
        assert_eq!(from_c1, vec![ids[1], ids[0]]);
    }
}
