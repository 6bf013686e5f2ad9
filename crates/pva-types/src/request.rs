//! Wire types shared by the HTTP façade and the CLI client.

use serde::{Deserialize, Serialize};

/// Operation requested against the tag index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagRequestType {
    Create,
    Delete,
}

/// Body of `POST /tag`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TagRequest {
    #[serde(rename = "type")]
    pub request_type: TagRequestType,
    pub tag: String,
    /// Target snapshot id in hex. Required for create, ignored for delete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Body of `POST /rollback`. Exactly one of `tag` / `sha` must be set.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RollbackRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

/// One entry in the `GET /changes` response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    pub sha: String,
    pub author: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_request_json_shape() {
        let req = TagRequest {
            request_type: TagRequestType::Create,
            tag: "base".into(),
            sha: Some("abc123".into()),
            author: Some("ops".into()),
            email: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains(r#""type":"create""#));
        assert!(json.contains(r#""tag":"base""#));
        assert!(!json.contains("email"));
    }

    #[test]
    fn tag_request_delete_roundtrip() {
        let json = r#"{"type":"delete","tag":"base"}"#;
        let req: TagRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.request_type, TagRequestType::Delete);
        assert!(req.sha.is_none());
    }

    #[test]
    fn rollback_request_accepts_either_field() {
        let by_tag: RollbackRequest = serde_json::from_str(r#"{"tag":"base"}"#).unwrap();
        assert_eq!(by_tag.tag.as_deref(), Some("base"));
        assert!(by_tag.sha.is_none());

        let by_sha: RollbackRequest = serde_json::from_str(r#"{"sha":"ff00"}"#).unwrap();
        assert_eq!(by_sha.sha.as_deref(), Some("ff00"));
    }

    #[test]
    fn change_entry_roundtrip() {
        let entry = ChangeEntry {
            sha: "deadbeef".into(),
            author: "alice".into(),
            message: "Created K8s NetworkPolicy nsA/npA".into(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: ChangeEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, parsed);
    }
}
