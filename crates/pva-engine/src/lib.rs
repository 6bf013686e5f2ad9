//! The Policy Version Audit engine.
//!
//! This crate wires the snapshot store and the cluster gateway into the
//! service's core behaviors:
//!
//! - [`setup_repo`] — bootstrap: seed the store from live cluster state
//! - [`AuditRepo::handle_event_list`] — ingest one audit batch, one snapshot
//!   per surviving event
//! - [`AuditRepo::filter_commits`] — filtered history queries
//! - [`AuditRepo::tag_commit`] / [`AuditRepo::remove_tag`] — the tag index
//! - [`AuditRepo::rollback`] — two-phase reconciliation of store and cluster
//!   back to a recorded snapshot
//!
//! One exclusive lock on the store serializes everything: no two batches
//! interleave, queries see coherent history, and a rollback holds the lock
//! across its whole protocol.

pub mod bootstrap;
pub mod env;
pub mod error;
pub mod event;
pub mod ingest;
pub mod query;
pub mod repo;
pub mod rollback;
pub mod tags;

pub use bootstrap::{setup_repo, StorageMode};
pub use error::{EngineError, EngineResult};
pub use event::{Event, EventList, ObjectRef, ResponseStatus, UserInfo};
pub use query::ChangeQuery;
pub use repo::AuditRepo;

#[cfg(test)]
pub(crate) mod testutil;
