//! The tag index: named, unique references to snapshots.

use pva_types::{ObjectId, Signature};

use crate::error::EngineResult;
use crate::repo::AuditRepo;

impl AuditRepo {
    /// Tag the snapshot identified by `sha` as `tag`. Returns the sha.
    pub fn tag_commit(&self, sha: &str, tag: &str, tagger: Signature) -> EngineResult<String> {
        let mut store = self.lock_store();
        let target = store.resolve_hex(sha)?;
        store.create_tag(tag, target, tagger)?;
        tracing::info!(tag, commit = sha, "tag created");
        Ok(sha.to_string())
    }

    /// Delete `tag`. Returns the tag name.
    pub fn remove_tag(&self, tag: &str) -> EngineResult<String> {
        let mut store = self.lock_store();
        store.delete_tag(tag)?;
        tracing::info!(tag, "tag deleted");
        Ok(tag.to_string())
    }

    /// Dereference a tag to its snapshot id.
    pub fn tag_to_snapshot(&self, tag: &str) -> EngineResult<ObjectId> {
        let store = self.lock_store();
        Ok(store.resolve_tag(tag)?.target)
    }

    /// Resolve a hex sha to a snapshot id, verifying it exists.
    pub fn hash_to_snapshot(&self, sha: &str) -> EngineResult<ObjectId> {
        let store = self.lock_store();
        Ok(store.resolve_hex(sha)?)
    }
}
