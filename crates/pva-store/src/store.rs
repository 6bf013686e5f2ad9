//! The [`SnapshotStore`] facade: a mutable worktree plus an append-only
//! snapshot chain, tags, and the rollback-mode fence.
//!
//! All mutation is single-writer: the owning service wraps the store in one
//! exclusive lock and holds it for the full duration of every operation, so
//! the store itself needs no interior locking.

use std::collections::BTreeMap;

use pva_types::{ObjectId, Signature};

use crate::backend::Backend;
use crate::diff::{diff_trees, FileChange};
use crate::error::{StoreError, StoreResult};
use crate::log::{History, LogFilter};
use crate::object::{Blob, Object, Snapshot, Tag, Tree};

/// How [`SnapshotStore::reset`] moves state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetMode {
    /// Overwrite the worktree to match the target snapshot and move HEAD.
    Hard,
    /// Move HEAD only; the worktree is left as-is.
    Soft,
}

/// A snapshot-versioned object store over a [`Backend`].
#[derive(Debug)]
pub struct SnapshotStore {
    backend: Backend,
    staged: Option<Tree>,
    rollback_mode: bool,
}

impl SnapshotStore {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            staged: None,
            rollback_mode: false,
        }
    }

    /// Whether the store already holds history (a reopened durable store).
    pub fn is_initialized(&self) -> StoreResult<bool> {
        Ok(self.backend.head()?.is_some())
    }

    // ---- worktree ----

    /// Create or overwrite a file. Parent directories appear on demand.
    pub fn write(&mut self, path: &str, bytes: &[u8]) -> StoreResult<()> {
        self.backend.write_file(path, bytes)
    }

    /// Remove a file. Fails if the path is absent.
    pub fn remove(&mut self, path: &str) -> StoreResult<()> {
        self.backend.remove_file(path)
    }

    /// Read a file's bytes. Fails if the path is absent.
    pub fn read(&self, path: &str) -> StoreResult<Vec<u8>> {
        self.backend.read_file(path)
    }

    /// All worktree paths, sorted.
    pub fn list(&self) -> StoreResult<Vec<String>> {
        self.backend.list_files()
    }

    // ---- staging and snapshots ----

    /// Capture the current worktree as the tree for the next snapshot.
    pub fn stage_all(&mut self) -> StoreResult<()> {
        let tree = self.capture_tree()?;
        self.staged = Some(tree);
        Ok(())
    }

    fn capture_tree(&mut self) -> StoreResult<Tree> {
        let mut entries = BTreeMap::new();
        for path in self.backend.list_files()? {
            let data = self.backend.read_file(&path)?;
            let blob_id = self.backend.put_object(&Object::Blob(Blob::new(data)))?;
            entries.insert(path, blob_id);
        }
        Ok(Tree::new(entries))
    }

    /// Record the staged tree as a new snapshot extending HEAD.
    ///
    /// If nothing was staged, the worktree is staged implicitly.
    pub fn commit(&mut self, author: Signature, message: &str) -> StoreResult<ObjectId> {
        let tree = match self.staged.take() {
            Some(tree) => tree,
            None => self.capture_tree()?,
        };
        let tree_id = self.backend.put_object(&Object::Tree(tree))?;
        let snapshot = Snapshot {
            parent: self.backend.head()?,
            author,
            message: message.to_string(),
            tree: tree_id,
        };
        let id = self.backend.put_object(&Object::Snapshot(snapshot))?;
        self.backend.set_head(id)?;
        tracing::debug!(snapshot = %id.short_hex(), message, "recorded snapshot");
        Ok(id)
    }

    /// Current HEAD, if any snapshot exists.
    pub fn head(&self) -> StoreResult<Option<ObjectId>> {
        self.backend.head()
    }

    /// Current HEAD; an empty store is an error.
    pub fn head_id(&self) -> StoreResult<ObjectId> {
        self.backend.head()?.ok_or(StoreError::EmptyHistory)
    }

    /// Load a snapshot record by id.
    pub fn snapshot(&self, id: ObjectId) -> StoreResult<Snapshot> {
        let object = self
            .backend
            .get_object(&id)?
            .ok_or(StoreError::ObjectNotFound(id))?;
        object
            .as_snapshot()
            .cloned()
            .ok_or(StoreError::NotASnapshot(id))
    }

    /// Resolve a hex `sha` to a snapshot id, verifying it exists.
    pub fn resolve_hex(&self, sha: &str) -> StoreResult<ObjectId> {
        let id = ObjectId::from_hex(sha).map_err(|_| StoreError::InvalidId(sha.to_string()))?;
        self.snapshot(id)?;
        Ok(id)
    }

    /// Load the full tree of a snapshot.
    pub fn tree_of(&self, id: ObjectId) -> StoreResult<Tree> {
        let snapshot = self.snapshot(id)?;
        self.tree_object(snapshot.tree)
    }

    /// Load a tree object directly by its digest.
    pub fn tree_object(&self, tree_id: ObjectId) -> StoreResult<Tree> {
        let object = self
            .backend
            .get_object(&tree_id)?
            .ok_or(StoreError::ObjectNotFound(tree_id))?;
        object
            .as_tree()
            .cloned()
            .ok_or(StoreError::NotASnapshot(tree_id))
    }

    /// The tree digest recorded by a snapshot.
    pub fn tree_digest(&self, id: ObjectId) -> StoreResult<ObjectId> {
        Ok(self.snapshot(id)?.tree)
    }

    /// Read a blob's bytes out of a snapshot's tree (not the worktree).
    pub fn read_at(&self, id: ObjectId, path: &str) -> StoreResult<Vec<u8>> {
        let tree = self.tree_of(id)?;
        let blob_id = tree.get(path).ok_or(StoreError::FileNotFound {
            path: path.to_string(),
        })?;
        let object = self
            .backend
            .get_object(&blob_id)?
            .ok_or(StoreError::ObjectNotFound(blob_id))?;
        object
            .as_blob()
            .map(|b| b.data.clone())
            .ok_or(StoreError::NotASnapshot(blob_id))
    }

    /// Structural diff between two snapshots.
    pub fn diff(&self, from: ObjectId, to: ObjectId) -> StoreResult<Vec<FileChange>> {
        let old = self.tree_of(from)?;
        let new = self.tree_of(to)?;
        Ok(diff_trees(&old, &new))
    }

    /// Move the store to `target`, per [`ResetMode`]. Drops any staged tree.
    pub fn reset(&mut self, target: ObjectId, mode: ResetMode) -> StoreResult<()> {
        match mode {
            ResetMode::Hard => {
                let tree = self.tree_of(target)?;
                for path in self.backend.list_files()? {
                    if !tree.contains(&path) {
                        self.backend.remove_file(&path)?;
                    }
                }
                for (path, blob_id) in &tree.entries {
                    let object = self
                        .backend
                        .get_object(blob_id)?
                        .ok_or(StoreError::ObjectNotFound(*blob_id))?;
                    let blob = object
                        .as_blob()
                        .ok_or(StoreError::NotASnapshot(*blob_id))?;
                    self.backend.write_file(path, &blob.data)?;
                }
                self.backend.set_head(target)?;
            }
            ResetMode::Soft => {
                self.snapshot(target)?;
                self.backend.set_head(target)?;
            }
        }
        self.staged = None;
        Ok(())
    }

    /// Lazy history traversal from `from` back to the root.
    pub fn log(&self, from: ObjectId, filter: LogFilter) -> History<'_> {
        History::new(self, from, filter)
    }

    // ---- tags ----

    /// Create an annotated tag. Fails if the name is taken or the target
    /// does not resolve to a snapshot.
    pub fn create_tag(
        &mut self,
        name: &str,
        target: ObjectId,
        tagger: Signature,
    ) -> StoreResult<()> {
        validate_tag_name(name)?;
        self.snapshot(target)?;
        if self.backend.get_tag(name)?.is_some() {
            return Err(StoreError::TagAlreadyExists {
                name: name.to_string(),
            });
        }
        let tag = Tag {
            name: name.to_string(),
            target,
            tagger,
            message: name.to_string(),
        };
        self.backend.put_tag(&tag)
    }

    /// Delete a tag. Fails if the name does not exist.
    pub fn delete_tag(&mut self, name: &str) -> StoreResult<()> {
        if self.backend.delete_tag(name)? {
            Ok(())
        } else {
            Err(StoreError::TagNotFound {
                name: name.to_string(),
            })
        }
    }

    /// Dereference a tag to its record.
    pub fn resolve_tag(&self, name: &str) -> StoreResult<Tag> {
        self.backend.get_tag(name)?.ok_or(StoreError::TagNotFound {
            name: name.to_string(),
        })
    }

    /// All tags, sorted by name.
    pub fn tags(&self) -> StoreResult<Vec<Tag>> {
        self.backend.list_tags()
    }

    // ---- rollback fence ----

    pub fn rollback_mode(&self) -> bool {
        self.rollback_mode
    }

    pub fn set_rollback_mode(&mut self, on: bool) {
        self.rollback_mode = on;
    }
}

fn validate_tag_name(name: &str) -> StoreResult<()> {
    let valid = !name.is_empty()
        && !name.contains('/')
        && !name.contains("..")
        && !name.chars().any(char::is_whitespace);
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidId(format!("invalid tag name: {name}")))
    }
}
