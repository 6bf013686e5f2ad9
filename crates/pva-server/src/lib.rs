//! HTTP façade for the Policy Version Audit service.
//!
//! Endpoints:
//!
//! - `POST /` — ingest one audit batch (503 while a rollback is in progress)
//! - `GET /changes` — filtered history as `{sha, author, message}` entries
//! - `POST /tag` — create or delete a tag
//! - `POST /rollback` — roll store and cluster back to a tagged or addressed
//!   snapshot
//!
//! The handlers are thin: decode, call into [`pva_engine::AuditRepo`], map
//! errors onto status codes.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::build_router;
pub use server::AuditServer;
