//! Request handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use pva_engine::{AuditRepo, ChangeQuery};
use pva_types::{ChangeEntry, RollbackRequest, TagRequest, TagRequestType, Signature, TIMESTAMP_FORMAT};

use crate::error::ApiError;

/// `POST /` — ingest an audit batch.
pub async fn events(
    State(repo): State<Arc<AuditRepo>>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    tracing::debug!(bytes = body.len(), "audit batch received");
    repo.handle_event_list(&body)?;
    Ok(StatusCode::OK)
}

/// Query string of `GET /changes`. Empty fields are wildcards.
#[derive(Debug, Default, Deserialize)]
pub struct ChangesParams {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub until: Option<String>,
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// `GET /changes` — filtered history.
pub async fn changes(
    State(repo): State<Arc<AuditRepo>>,
    Query(params): Query<ChangesParams>,
) -> Result<Json<Vec<ChangeEntry>>, ApiError> {
    let query = ChangeQuery {
        author: non_empty(params.author),
        since: parse_time(params.since.as_deref())?,
        until: parse_time(params.until.as_deref())?,
        resource: non_empty(params.resource),
        namespace: non_empty(params.namespace),
        name: non_empty(params.name),
    };
    let snapshots = repo.filter_commits(&query)?;
    let entries = snapshots
        .into_iter()
        .map(|(id, snapshot)| ChangeEntry {
            sha: id.to_hex(),
            author: snapshot.author.name,
            message: snapshot.message,
        })
        .collect();
    Ok(Json(entries))
}

/// `POST /tag` — create or delete a tag.
pub async fn tag(State(repo): State<Arc<AuditRepo>>, body: Bytes) -> Result<String, ApiError> {
    let request: TagRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("could not decode tag request: {e}")))?;
    match request.request_type {
        TagRequestType::Create => {
            let sha = request
                .sha
                .ok_or_else(|| ApiError::BadRequest("tag create requires sha".to_string()))?;
            let tagger = Signature::now(
                request.author.unwrap_or_else(|| "no-author".to_string()),
                request.email.unwrap_or_else(|| "default@audit.example".to_string()),
            );
            let sha = repo.tag_commit(&sha, &request.tag, tagger)?;
            Ok(format!("Commit {sha} tagged"))
        }
        TagRequestType::Delete => {
            let tag = repo.remove_tag(&request.tag)?;
            Ok(format!("Tag {tag} deleted"))
        }
    }
}

/// `POST /rollback` — roll back to a tagged or addressed snapshot.
pub async fn rollback(State(repo): State<Arc<AuditRepo>>, body: Bytes) -> Result<String, ApiError> {
    let request: RollbackRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("could not decode rollback request: {e}")))?;
    let target = match (request.tag.as_deref(), request.sha.as_deref()) {
        (Some(tag), None) => repo.tag_to_snapshot(tag)?,
        (None, Some(sha)) => repo.hash_to_snapshot(sha)?,
        _ => {
            return Err(ApiError::BadRequest(
                "exactly one of tag or sha must be set".to_string(),
            ))
        }
    };
    repo.rollback(target)?;
    Ok(format!("Rollback to commit {} successful", target.to_hex()))
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

/// Parse an ISO-8601 millisecond timestamp; empty means unset.
fn parse_time(field: Option<&str>) -> Result<Option<DateTime<Utc>>, ApiError> {
    match field {
        None | Some("") => Ok(None),
        Some(text) => NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
            .map(|naive| Some(naive.and_utc()))
            .map_err(|e| ApiError::BadRequest(format!("invalid timestamp {text:?}: {e}"))),
    }
}
