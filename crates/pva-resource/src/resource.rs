//! Dynamically-typed resource objects.
//!
//! A [`Resource`] wraps a JSON document as received from audit events or the
//! cluster API. The engine never needs typed specs, it moves whole documents
//! between the cluster and the store, so the model stays schemaless with
//! metadata accessors on top.

use serde_json::{Map, Value};

use crate::canon;
use crate::error::{ResourceError, ResourceResult};
use crate::kind::ResourceKind;
use crate::path::store_path;

const LAST_APPLIED_ANNOTATION: &str = "kubectl.kubernetes.io/last-applied-configuration";

/// A cluster resource document.
#[derive(Clone, Debug, PartialEq)]
pub struct Resource {
    value: Value,
}

impl Resource {
    /// Wrap a JSON value. The value must be an object.
    pub fn from_value(value: Value) -> ResourceResult<Self> {
        if !value.is_object() {
            return Err(ResourceError::NotAnObject);
        }
        Ok(Self { value })
    }

    /// Parse from canonical (or any JSON-compatible) YAML.
    pub fn from_yaml(text: &str) -> ResourceResult<Self> {
        Self::from_value(canon::parse_yaml(text)?)
    }

    /// The underlying JSON document.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consume into the underlying JSON document.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Serialize to the canonical YAML form.
    pub fn to_canonical_yaml(&self) -> ResourceResult<String> {
        canon::to_canonical_yaml(&self.value)
    }

    // ---- metadata accessors ----

    /// The `apiVersion` field.
    pub fn api_version(&self) -> ResourceResult<&str> {
        self.value
            .get("apiVersion")
            .and_then(Value::as_str)
            .ok_or(ResourceError::MissingField("apiVersion"))
    }

    /// The `kind` field.
    pub fn kind_name(&self) -> ResourceResult<&str> {
        self.value
            .get("kind")
            .and_then(Value::as_str)
            .ok_or(ResourceError::MissingField("kind"))
    }

    /// `metadata.name`.
    pub fn name(&self) -> ResourceResult<&str> {
        self.metadata_str("name")
            .ok_or(ResourceError::MissingField("metadata.name"))
    }

    /// `metadata.namespace`, empty for cluster-scoped resources.
    pub fn namespace(&self) -> &str {
        self.metadata_str("namespace").unwrap_or("")
    }

    /// `metadata.resourceVersion`, if present.
    pub fn resource_version(&self) -> Option<&str> {
        self.metadata_str("resourceVersion")
    }

    /// Set or clear `metadata.resourceVersion`.
    pub fn set_resource_version(&mut self, version: Option<&str>) {
        if let Some(meta) = self.metadata_mut() {
            match version {
                Some(v) => {
                    meta.insert("resourceVersion".to_string(), Value::String(v.to_string()));
                }
                None => {
                    meta.remove("resourceVersion");
                }
            }
        }
    }

    /// Resolve the resource's [`ResourceKind`] from its `kind` and
    /// `apiVersion` fields.
    pub fn kind(&self) -> ResourceResult<ResourceKind> {
        let api_version = self.api_version()?;
        let group = api_version.split('/').next().unwrap_or(api_version);
        ResourceKind::from_kind_group(self.kind_name()?, group)
    }

    /// The canonical store path for this resource.
    pub fn store_path(&self) -> ResourceResult<String> {
        let kind = self.kind()?;
        Ok(store_path(kind, self.namespace(), self.name()?))
    }

    // ---- server-field clearing ----

    /// Remove server-generated metadata so the stored form is stable across
    /// reads: uid, generation, managed fields, creation timestamp, resource
    /// version, the whole `status` subtree, and the last-applied-configuration
    /// annotation. An annotation map left empty is removed entirely, so a
    /// resource that never had annotations and one whose only annotation was
    /// cleared serialize identically.
    pub fn clear_server_fields(&mut self) {
        if let Some(meta) = self.metadata_mut() {
            meta.remove("uid");
            meta.remove("generation");
            meta.remove("managedFields");
            meta.remove("creationTimestamp");
            meta.remove("resourceVersion");
            let annotations_empty = match meta.get_mut("annotations").and_then(Value::as_object_mut)
            {
                Some(annotations) => {
                    annotations.remove(LAST_APPLIED_ANNOTATION);
                    annotations.is_empty()
                }
                None => false,
            };
            if annotations_empty {
                meta.remove("annotations");
            }
        }
        if let Some(obj) = self.value.as_object_mut() {
            obj.remove("status");
        }
    }

    fn metadata(&self) -> Option<&Map<String, Value>> {
        self.value.get("metadata").and_then(Value::as_object)
    }

    fn metadata_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.value.get_mut("metadata").and_then(Value::as_object_mut)
    }

    fn metadata_str(&self, field: &str) -> Option<&str> {
        self.metadata()?.get(field).and_then(Value::as_str)
    }
}
