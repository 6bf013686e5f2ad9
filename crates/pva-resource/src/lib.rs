//! Resource model for Policy Version Audit.
//!
//! This crate owns everything the store and engine need to know about the
//! cluster resources being versioned:
//!
//! - [`ResourceKind`] — the closed set of supported kinds and their
//!   group/directory/scope table
//! - [`Resource`] — a dynamically-typed resource object with metadata
//!   accessors and server-field clearing
//! - [`store_path`] — the canonical store path for a `(kind, namespace,
//!   name)` triple
//! - [`canon`] — the canonical YAML form (deterministic key order,
//!   idempotent, free of volatile server fields)

pub mod canon;
pub mod error;
pub mod kind;
pub mod path;
pub mod resource;

pub use error::{ResourceError, ResourceResult};
pub use kind::ResourceKind;
pub use path::{leading_directory, store_path};
pub use resource::Resource;
