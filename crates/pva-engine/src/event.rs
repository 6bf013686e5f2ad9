//! The audit event wire model.
//!
//! Only the fields the ingest pipeline consumes are modeled; everything else
//! in an audit event is ignored by serde. All fields default so that a
//! partially-populated event is skippable rather than a decode failure.

use serde::Deserialize;
use serde_json::Value;

use pva_resource::{store_path, ResourceKind, ResourceResult};

use crate::error::{EngineError, EngineResult};

/// UTF-8 byte-order mark some webhook senders prepend to the JSON body.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// A batch of audit events.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EventList {
    #[serde(default)]
    pub items: Vec<Event>,
}

/// One audit event.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub verb: String,
    #[serde(default)]
    pub user: UserInfo,
    #[serde(default)]
    pub object_ref: Option<ObjectRef>,
    #[serde(default)]
    pub response_status: Option<ResponseStatus>,
    #[serde(default)]
    pub response_object: Option<Value>,
}

/// The authenticated user an event is attributed to.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub uid: String,
}

/// The resource the event addressed.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    /// Lowercase plural resource name (e.g. `networkpolicies`).
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub api_group: String,
}

/// Outcome of the request the event records.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ResponseStatus {
    #[serde(default)]
    pub status: String,
}

/// Decode an audit batch, tolerating a leading UTF-8 BOM.
pub fn parse_event_list(body: &[u8]) -> EngineResult<EventList> {
    let body = body.strip_prefix(UTF8_BOM).unwrap_or(body);
    serde_json::from_slice(body).map_err(|e| EngineError::MalformedBatch(e.to_string()))
}

impl Event {
    /// Whether the recorded request failed on the API server.
    pub fn response_failed(&self) -> bool {
        self.response_status
            .as_ref()
            .is_some_and(|s| s.status == "Failure")
    }

    /// The `objectRef`, required for any event that survives filtering.
    pub fn object_ref(&self) -> EngineResult<&ObjectRef> {
        self.object_ref
            .as_ref()
            .ok_or_else(|| EngineError::MalformedEvent("missing objectRef".to_string()))
    }

    /// Resolve the event's resource kind from its `objectRef`.
    pub fn kind(&self) -> EngineResult<ResourceKind> {
        let object_ref = self.object_ref()?;
        resolve_kind(&object_ref.resource, &object_ref.api_group).map_err(EngineError::from)
    }

    /// The canonical store path for the event's resource.
    pub fn path(&self) -> EngineResult<String> {
        let object_ref = self.object_ref()?;
        let kind = self.kind()?;
        Ok(store_path(kind, &object_ref.namespace, &object_ref.name))
    }

    /// The `<kindLabel> <ns>/<name>` suffix used in commit messages.
    /// Cluster-scoped resources render as `<kindLabel> /<name>`.
    pub fn message_suffix(&self) -> EngineResult<String> {
        let object_ref = self.object_ref()?;
        let kind = self.kind()?;
        Ok(format!(
            "{} {}/{}",
            kind.label(),
            object_ref.namespace,
            object_ref.name
        ))
    }
}

fn resolve_kind(resource: &str, api_group: &str) -> ResourceResult<ResourceKind> {
    ResourceKind::from_plural_group(resource, api_group)
}
