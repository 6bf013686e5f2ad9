//! Structural diff between two snapshots' path sets.

use crate::object::Tree;

/// One changed path between two snapshots.
///
/// `from_path` is `None` for an addition, `to_path` is `None` for a deletion;
/// both are set (and equal) for an in-place modification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileChange {
    pub from_path: Option<String>,
    pub to_path: Option<String>,
}

impl FileChange {
    /// The path disappears going from the old snapshot to the new one.
    pub fn is_delete(&self) -> bool {
        self.to_path.is_none()
    }

    /// Whichever path is set; every change has at least one.
    pub fn path(&self) -> &str {
        self.to_path
            .as_deref()
            .or(self.from_path.as_deref())
            .unwrap_or_default()
    }
}

/// Compare two trees and list the changed paths, sorted.
pub fn diff_trees(old: &Tree, new: &Tree) -> Vec<FileChange> {
    let mut changes = Vec::new();

    for (path, old_id) in &old.entries {
        match new.get(path) {
            Some(new_id) if new_id == *old_id => {}
            Some(_) => changes.push(FileChange {
                from_path: Some(path.clone()),
                to_path: Some(path.clone()),
            }),
            None => changes.push(FileChange {
                from_path: Some(path.clone()),
                to_path: None,
            }),
        }
    }

    for path in new.paths() {
        if !old.contains(path) {
            changes.push(FileChange {
                from_path: None,
                to_path: Some(path.clone()),
            });
        }
    }

    changes.sort_by(|a, b| a.path().cmp(b.path()));
    changes
}
