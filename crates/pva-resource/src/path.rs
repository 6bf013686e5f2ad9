//! Canonical store paths.
//!
//! The path is a pure function of `(kind, namespace, name)`. Namespaced
//! resources live at `<dir>/<namespace>/<name>.yaml`, cluster-scoped ones at
//! `<dir>/<name>.yaml`. `(namespace, name)` is unique within a kind, so
//! collisions are impossible.

use crate::kind::ResourceKind;

/// Compute the repo-relative store path for a resource.
pub fn store_path(kind: ResourceKind, namespace: &str, name: &str) -> String {
    if kind.namespaced() {
        format!("{}/{}/{}.yaml", kind.directory(), namespace, name)
    } else {
        format!("{}/{}.yaml", kind.directory(), name)
    }
}

/// The leading directory of a store path (used to recover the kind).
pub fn leading_directory(path: &str) -> Option<&str> {
    path.split('/').next().filter(|s| !s.is_empty())
}
