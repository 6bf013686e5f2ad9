//! Storage backends: an ephemeral in-memory variant and a durable on-disk
//! variant, as a tagged enum behind the [`SnapshotStore`] facade.
//!
//! Both variants cover the same two surfaces:
//!
//! - the **worktree**: mutable files keyed by repo-relative path
//! - the **metadata**: content-addressed objects, the HEAD ref, and tags,
//!   kept in maps (memory) or under the hidden `.pva/` directory (disk)
//!
//! [`SnapshotStore`]: crate::store::SnapshotStore

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use pva_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::object::{Object, Tag};

/// Hidden directory holding snapshot and tag metadata in durable mode.
const META_DIR: &str = ".pva";

/// A storage backend for one store instance.
#[derive(Debug)]
pub enum Backend {
    Memory(MemoryBackend),
    Disk(DiskBackend),
}

impl Backend {
    /// New ephemeral backend. Used by tests and by in-memory deployments.
    pub fn memory() -> Self {
        Backend::Memory(MemoryBackend::default())
    }

    /// Open (or initialize) a durable backend rooted at `root`.
    pub fn disk(root: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Backend::Disk(DiskBackend::open(root.as_ref().to_path_buf())?))
    }

    // ---- worktree ----

    pub fn write_file(&mut self, path: &str, bytes: &[u8]) -> StoreResult<()> {
        match self {
            Backend::Memory(m) => {
                m.files.insert(path.to_string(), bytes.to_vec());
                Ok(())
            }
            Backend::Disk(d) => d.write_file(path, bytes),
        }
    }

    pub fn remove_file(&mut self, path: &str) -> StoreResult<()> {
        match self {
            Backend::Memory(m) => match m.files.remove(path) {
                Some(_) => Ok(()),
                None => Err(StoreError::FileNotFound {
                    path: path.to_string(),
                }),
            },
            Backend::Disk(d) => d.remove_file(path),
        }
    }

    pub fn read_file(&self, path: &str) -> StoreResult<Vec<u8>> {
        match self {
            Backend::Memory(m) => m.files.get(path).cloned().ok_or(StoreError::FileNotFound {
                path: path.to_string(),
            }),
            Backend::Disk(d) => d.read_file(path),
        }
    }

    /// All worktree paths, sorted.
    pub fn list_files(&self) -> StoreResult<Vec<String>> {
        match self {
            Backend::Memory(m) => Ok(m.files.keys().cloned().collect()),
            Backend::Disk(d) => d.list_files(),
        }
    }

    // ---- objects ----

    pub fn put_object(&mut self, object: &Object) -> StoreResult<ObjectId> {
        let id = object.id()?;
        match self {
            Backend::Memory(m) => {
                // Content-addressing makes double-writes a no-op.
                m.objects.entry(id).or_insert_with(|| object.clone());
            }
            Backend::Disk(d) => d.put_object(id, object)?,
        }
        Ok(id)
    }

    pub fn get_object(&self, id: &ObjectId) -> StoreResult<Option<Object>> {
        match self {
            Backend::Memory(m) => Ok(m.objects.get(id).cloned()),
            Backend::Disk(d) => d.get_object(id),
        }
    }

    // ---- refs ----

    pub fn head(&self) -> StoreResult<Option<ObjectId>> {
        match self {
            Backend::Memory(m) => Ok(m.head),
            Backend::Disk(d) => d.head(),
        }
    }

    pub fn set_head(&mut self, id: ObjectId) -> StoreResult<()> {
        match self {
            Backend::Memory(m) => {
                m.head = Some(id);
                Ok(())
            }
            Backend::Disk(d) => d.set_head(id),
        }
    }

    // ---- tags ----

    pub fn get_tag(&self, name: &str) -> StoreResult<Option<Tag>> {
        match self {
            Backend::Memory(m) => Ok(m.tags.get(name).cloned()),
            Backend::Disk(d) => d.get_tag(name),
        }
    }

    pub fn put_tag(&mut self, tag: &Tag) -> StoreResult<()> {
        match self {
            Backend::Memory(m) => {
                m.tags.insert(tag.name.clone(), tag.clone());
                Ok(())
            }
            Backend::Disk(d) => d.put_tag(tag),
        }
    }

    /// Returns `true` if the tag existed.
    pub fn delete_tag(&mut self, name: &str) -> StoreResult<bool> {
        match self {
            Backend::Memory(m) => Ok(m.tags.remove(name).is_some()),
            Backend::Disk(d) => d.delete_tag(name),
        }
    }

    pub fn list_tags(&self) -> StoreResult<Vec<Tag>> {
        match self {
            Backend::Memory(m) => Ok(m.tags.values().cloned().collect()),
            Backend::Disk(d) => d.list_tags(),
        }
    }
}

/// Ephemeral backend: everything in maps, gone on drop.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    files: BTreeMap<String, Vec<u8>>,
    objects: HashMap<ObjectId, Object>,
    head: Option<ObjectId>,
    tags: BTreeMap<String, Tag>,
}

/// Durable backend: worktree files under `root`, metadata under `root/.pva`.
#[derive(Debug)]
pub struct DiskBackend {
    root: PathBuf,
}

impl DiskBackend {
    fn open(root: PathBuf) -> StoreResult<Self> {
        fs::create_dir_all(root.join(META_DIR).join("objects"))?;
        fs::create_dir_all(root.join(META_DIR).join("tags"))?;
        Ok(Self { root })
    }

    fn worktree_path(&self, path: &str) -> PathBuf {
        let mut full = self.root.clone();
        for segment in path.split('/') {
            full.push(segment);
        }
        full
    }

    fn write_file(&self, path: &str, bytes: &[u8]) -> StoreResult<()> {
        let full = self.worktree_path(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full, bytes)?;
        Ok(())
    }

    fn remove_file(&self, path: &str) -> StoreResult<()> {
        let full = self.worktree_path(path);
        if !full.is_file() {
            return Err(StoreError::FileNotFound {
                path: path.to_string(),
            });
        }
        fs::remove_file(full)?;
        Ok(())
    }

    fn read_file(&self, path: &str) -> StoreResult<Vec<u8>> {
        let full = self.worktree_path(path);
        if !full.is_file() {
            return Err(StoreError::FileNotFound {
                path: path.to_string(),
            });
        }
        Ok(fs::read(full)?)
    }

    fn list_files(&self) -> StoreResult<Vec<String>> {
        let mut paths = Vec::new();
        Self::walk(&self.root, &self.root, &mut paths)?;
        paths.sort();
        Ok(paths)
    }

    fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) -> StoreResult<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name();
            if path.is_dir() {
                if dir == root && name == META_DIR {
                    continue;
                }
                Self::walk(root, &path, out)?;
            } else if path.is_file() {
                let rel = path
                    .strip_prefix(root)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                let rel = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                out.push(rel);
            }
        }
        Ok(())
    }

    fn object_path(&self, id: ObjectId) -> PathBuf {
        self.root.join(META_DIR).join("objects").join(id.to_hex())
    }

    fn put_object(&self, id: ObjectId, object: &Object) -> StoreResult<()> {
        let path = self.object_path(id);
        if path.exists() {
            return Ok(());
        }
        fs::write(path, object.encode()?)?;
        Ok(())
    }

    fn get_object(&self, id: &ObjectId) -> StoreResult<Option<Object>> {
        let path = self.object_path(*id);
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = fs::read(path)?;
        Ok(Some(Object::decode(&bytes)?))
    }

    fn head_path(&self) -> PathBuf {
        self.root.join(META_DIR).join("HEAD")
    }

    fn head(&self) -> StoreResult<Option<ObjectId>> {
        let path = self.head_path();
        if !path.is_file() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)?;
        let id = ObjectId::from_hex(text.trim())
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Some(id))
    }

    fn set_head(&self, id: ObjectId) -> StoreResult<()> {
        fs::write(self.head_path(), id.to_hex())?;
        Ok(())
    }

    fn tag_path(&self, name: &str) -> PathBuf {
        self.root.join(META_DIR).join("tags").join(name)
    }

    fn get_tag(&self, name: &str) -> StoreResult<Option<Tag>> {
        let path = self.tag_path(name);
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = fs::read(path)?;
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn put_tag(&self, tag: &Tag) -> StoreResult<()> {
        let bytes =
            serde_json::to_vec(tag).map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(self.tag_path(&tag.name), bytes)?;
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> StoreResult<bool> {
        let path = self.tag_path(name);
        if !path.is_file() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }

    fn list_tags(&self) -> StoreResult<Vec<Tag>> {
        let dir = self.root.join(META_DIR).join("tags");
        let mut tags = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.path().is_file() {
                let bytes = fs::read(entry.path())?;
                let tag: Tag = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                tags.push(tag);
            }
        }
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Blob;
    use pva_types::Signature;

    fn backends() -> Vec<(&'static str, Backend, Option<tempfile::TempDir>)> {
        let dir = tempfile::tempdir().unwrap();
        let disk = Backend::disk(dir.path().join("store")).unwrap();
        vec![
            ("memory", Backend::memory(), None),
            ("disk", disk, Some(dir)),
        ]
    }

    #[test]
    fn file_roundtrip() {
        for (label, mut backend, _guard) in backends() {
            backend
                .write_file("k8s-policies/nsA/npA.yaml", b"content")
                .unwrap();
            assert_eq!(
                backend.read_file("k8s-policies/nsA/npA.yaml").unwrap(),
                b"content",
                "{label}"
            );
            backend.remove_file("k8s-policies/nsA/npA.yaml").unwrap();
            assert!(
                matches!(
                    backend.read_file("k8s-policies/nsA/npA.yaml"),
                    Err(StoreError::FileNotFound { .. })
                ),
                "{label}"
            );
        }
    }

    #[test]
    fn remove_missing_file_fails() {
        for (label, mut backend, _guard) in backends() {
            assert!(
                matches!(
                    backend.remove_file("tiers/absent.yaml"),
                    Err(StoreError::FileNotFound { .. })
                ),
                "{label}"
            );
        }
    }

    #[test]
    fn overwrite_replaces_content() {
        for (label, mut backend, _guard) in backends() {
            backend.write_file("tiers/t.yaml", b"v1").unwrap();
            backend.write_file("tiers/t.yaml", b"v2").unwrap();
            assert_eq!(backend.read_file("tiers/t.yaml").unwrap(), b"v2", "{label}");
        }
    }

    #[test]
    fn list_files_is_sorted_and_skips_metadata() {
        for (label, mut backend, _guard) in backends() {
            backend.write_file("tiers/b.yaml", b"b").unwrap();
            backend.write_file("k8s-policies/nsA/a.yaml", b"a").unwrap();
            let files = backend.list_files().unwrap();
            assert_eq!(
                files,
                vec!["k8s-policies/nsA/a.yaml".to_string(), "tiers/b.yaml".to_string()],
                "{label}"
            );
        }
    }

    #[test]
    fn object_put_get() {
        for (label, mut backend, _guard) in backends() {
            let object = Object::Blob(Blob::new(b"data".to_vec()));
            let id = backend.put_object(&object).unwrap();
            let read_back = backend.get_object(&id).unwrap().unwrap();
            assert_eq!(read_back, object, "{label}");
            // Re-put is a no-op.
            assert_eq!(backend.put_object(&object).unwrap(), id, "{label}");
        }
    }

    #[test]
    fn get_missing_object_is_none() {
        for (label, backend, _guard) in backends() {
            let id = ObjectId::from_bytes(b"missing");
            assert!(backend.get_object(&id).unwrap().is_none(), "{label}");
        }
    }

    #[test]
    fn head_roundtrip() {
        for (label, mut backend, _guard) in backends() {
            assert!(backend.head().unwrap().is_none(), "{label}");
            let id = ObjectId::from_bytes(b"snap");
            backend.set_head(id).unwrap();
            assert_eq!(backend.head().unwrap(), Some(id), "{label}");
        }
    }

    #[test]
    fn tag_roundtrip() {
        for (label, mut backend, _guard) in backends() {
            let tag = Tag {
                name: "base".into(),
                target: ObjectId::from_bytes(b"snap"),
                tagger: Signature::now("ops", "ops@audit.example"),
                message: "base".into(),
            };
            backend.put_tag(&tag).unwrap();
            assert_eq!(backend.get_tag("base").unwrap().unwrap(), tag, "{label}");
            assert_eq!(backend.list_tags().unwrap().len(), 1, "{label}");
            assert!(backend.delete_tag("base").unwrap(), "{label}");
            assert!(!backend.delete_tag("base").unwrap(), "{label}");
        }
    }

    #[test]
    fn disk_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("store");
        let id = {
            let mut backend = Backend::disk(&root).unwrap();
            backend.write_file("tiers/t.yaml", b"spec").unwrap();
            let id = backend
                .put_object(&Object::Blob(Blob::new(b"spec".to_vec())))
                .unwrap();
            backend.set_head(id).unwrap();
            id
        };
        let backend = Backend::disk(&root).unwrap();
        assert_eq!(backend.read_file("tiers/t.yaml").unwrap(), b"spec");
        assert_eq!(backend.head().unwrap(), Some(id));
        assert!(backend.get_object(&id).unwrap().is_some());
    }
}
