//! The objects the store persists: blobs, trees, snapshots, and tags.
//!
//! Blobs, trees, and snapshots are content-addressed: their id is the BLAKE3
//! hash of their kind-tagged JSON encoding, so identical content always
//! dedups and ids double as integrity checks. Tags are named rather than
//! content-addressed; they live in the ref namespace.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pva_types::{ObjectId, Signature};

use crate::error::{StoreError, StoreResult};

/// Raw file content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    pub data: Vec<u8>,
}

impl Blob {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

/// The full path set of one snapshot: repo-relative path → blob id.
///
/// Paths are kept sorted (BTreeMap), so the tree's encoding, and therefore
/// its digest, is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub entries: BTreeMap<String, ObjectId>,
}

impl Tree {
    pub fn new(entries: BTreeMap<String, ObjectId>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Blob id stored at `path`, if any.
    pub fn get(&self, path: &str) -> Option<ObjectId> {
        self.entries.get(path).copied()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// All paths, in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An immutable snapshot record.
///
/// Snapshots form a chain through `parent`; the root snapshot has none. The
/// `tree` id is the digest of the full path set at commit time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub parent: Option<ObjectId>,
    pub author: Signature,
    pub message: String,
    pub tree: ObjectId,
}

/// A named, annotated reference to a snapshot. Names are unique.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub target: ObjectId,
    pub tagger: Signature,
    pub message: String,
}

/// A stored object, tagged by kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Snapshot(Snapshot),
}

impl Object {
    /// Kind-tagged JSON encoding, used both for hashing and persistence.
    pub fn encode(&self) -> StoreResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> StoreResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Content-addressed id of this object.
    pub fn id(&self) -> StoreResult<ObjectId> {
        Ok(ObjectId::from_bytes(&self.encode()?))
    }

    pub fn as_snapshot(&self) -> Option<&Snapshot> {
        match self {
            Object::Snapshot(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Object::Tree(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            Object::Blob(b) => Some(b),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig() -> Signature {
        Signature::now("audit-init", "system@audit.example")
    }

    #[test]
    fn blob_id_is_content_addressed() {
        let a = Object::Blob(Blob::new(b"apiVersion: v1\n".to_vec()));
        let b = Object::Blob(Blob::new(b"apiVersion: v1\n".to_vec()));
        assert_eq!(a.id().unwrap(), b.id().unwrap());
    }

    #[test]
    fn tree_digest_is_order_independent() {
        let mut left = BTreeMap::new();
        left.insert("a.yaml".to_string(), ObjectId::from_bytes(b"a"));
        left.insert("b.yaml".to_string(), ObjectId::from_bytes(b"b"));

        let mut right = BTreeMap::new();
        right.insert("b.yaml".to_string(), ObjectId::from_bytes(b"b"));
        right.insert("a.yaml".to_string(), ObjectId::from_bytes(b"a"));

        let left = Object::Tree(Tree::new(left));
        let right = Object::Tree(Tree::new(right));
        assert_eq!(left.id().unwrap(), right.id().unwrap());
    }

    #[test]
    fn tree_digest_tracks_content() {
        let mut entries = BTreeMap::new();
        entries.insert("a.yaml".to_string(), ObjectId::from_bytes(b"v1"));
        let before = Object::Tree(Tree::new(entries.clone())).id().unwrap();

        entries.insert("a.yaml".to_string(), ObjectId::from_bytes(b"v2"));
        let after = Object::Tree(Tree::new(entries)).id().unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn object_roundtrip() {
        let snapshot = Object::Snapshot(Snapshot {
            parent: None,
            author: sig(),
            message: "Initial commit of existing policies".into(),
            tree: ObjectId::from_bytes(b"tree"),
        });
        let encoded = snapshot.encode().unwrap();
        let decoded = Object::decode(&encoded).unwrap();
        assert_eq!(snapshot, decoded);
        assert_eq!(snapshot.id().unwrap(), decoded.id().unwrap());
    }

    #[test]
    fn kind_accessors() {
        let blob = Object::Blob(Blob::new(vec![1]));
        assert!(blob.as_blob().is_some());
        assert!(blob.as_tree().is_none());
        assert!(blob.as_snapshot().is_none());
    }

    #[test]
    fn different_kinds_hash_differently() {
        // A blob and a tree that would encode the same payload still differ
        // because the kind tag participates in the hash.
        let blob = Object::Blob(Blob::new(Vec::new()));
        let tree = Object::Tree(Tree::empty());
        assert_ne!(blob.id().unwrap(), tree.id().unwrap());
    }
}
