//! Foundation types for Policy Version Audit (PVA).
//!
//! This crate provides the identifier, signature, and API wire types used
//! throughout the PVA system. Every other PVA crate depends on `pva-types`.
//!
//! # Key Types
//!
//! - [`ObjectId`] — Content-addressed identifier (BLAKE3 hash) for blobs,
//!   trees, and snapshots
//! - [`Signature`] — Author identity attached to snapshots and tags
//! - [`TagRequest`] / [`RollbackRequest`] / [`ChangeEntry`] — wire types
//!   shared by the HTTP façade and the CLI

pub mod error;
pub mod id;
pub mod request;
pub mod signature;

pub use error::TypeError;
pub use id::ObjectId;
pub use request::{ChangeEntry, RollbackRequest, TagRequest, TagRequestType};
pub use signature::{Signature, TIMESTAMP_FORMAT};
