//! Canonical textual form of a resource.
//!
//! The canonical form is YAML with deterministic key order. Resources are
//! modeled as [`serde_json::Value`] documents whose object maps are ordered
//! (BTreeMap-backed), so serializing the same logical document always yields
//! byte-equal output, and serialize∘parse∘serialize is a fixpoint.

use serde_json::Value;

use crate::error::{ResourceError, ResourceResult};

/// Serialize a resource document to its canonical YAML form.
pub fn to_canonical_yaml(value: &Value) -> ResourceResult<String> {
    serde_yaml::to_string(value).map_err(|e| ResourceError::Yaml(e.to_string()))
}

/// Parse a YAML document into a resource value.
///
/// Only JSON-compatible YAML is accepted (string keys, no anchors producing
/// cycles), which is all the cluster API ever emits.
pub fn parse_yaml(text: &str) -> ResourceResult<Value> {
    let value: Value =
        serde_yaml::from_str(text).map_err(|e| ResourceError::Yaml(e.to_string()))?;
    if !value.is_object() {
        return Err(ResourceError::NotAnObject);
    }
    Ok(value)
}
