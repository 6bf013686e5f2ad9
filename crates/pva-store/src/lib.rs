//! Snapshot-versioned object store for Policy Version Audit.
//!
//! The store pairs a mutable **worktree** (files keyed by repo-relative
//! path) with an append-only chain of **snapshots**, each recording the full
//! path set as a content-addressed tree. Named **tags** point at snapshots.
//! A **rollback-mode** flag fences ingest while a rollback is reconciling
//! external state.
//!
//! # Storage Backends
//!
//! Two backends sit behind the [`SnapshotStore`] facade as a tagged variant:
//!
//! - [`Backend::memory`] — ephemeral, map-based; used by every test
//! - [`Backend::disk`] — durable; worktree files on disk, snapshot/tag
//!   metadata under the hidden `.pva/` directory
//!
//! # Design Rules
//!
//! 1. Snapshots are immutable once recorded; history is never rewritten.
//! 2. A committed snapshot's tree equals the worktree path set at commit
//!    time.
//! 3. The store does no interior locking — the owner serializes access with
//!    one exclusive lock held for each operation's full duration.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod backend;
pub mod diff;
pub mod error;
pub mod glob;
pub mod log;
pub mod object;
pub mod store;

pub use backend::Backend;
pub use diff::{diff_trees, FileChange};
pub use error::{StoreError, StoreResult};
pub use glob::{glob_match, path_pattern};
pub use log::{History, LogFilter};
pub use object::{Blob, Object, Snapshot, Tag, Tree};
pub use store::{ResetMode, SnapshotStore};
