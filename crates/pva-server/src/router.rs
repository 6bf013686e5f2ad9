use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use pva_engine::AuditRepo;

use crate::handler;

/// Build the axum router over a shared repository.
pub fn build_router(repo: Arc<AuditRepo>) -> Router {
    Router::new()
        .route("/", post(handler::events))
        .route("/changes", get(handler::changes))
        .route("/tag", post(handler::tag))
        .route("/rollback", post(handler::rollback))
        .with_state(repo)
}
