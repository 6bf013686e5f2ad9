//! Shared fixtures for engine tests.

use std::sync::Arc;

use serde_json::{json, Value};

use pva_cluster::InMemoryCluster;
use pva_resource::Resource;

use crate::bootstrap::{setup_repo, StorageMode};
use crate::repo::AuditRepo;

pub fn np(namespace: &str, name: &str) -> Resource {
    Resource::from_value(json!({
        "apiVersion": "networking.example/v1",
        "kind": "NetworkPolicy",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": format!("uid-{name}"),
        },
        "spec": {
            "podSelector": {},
            "policyTypes": ["Ingress"],
            "ingress": [{}],
        },
    }))
    .unwrap()
}

pub fn anp(namespace: &str, name: &str) -> Resource {
    Resource::from_value(json!({
        "apiVersion": "crd.example/v1alpha1",
        "kind": "NetworkPolicy",
        "metadata": {"name": name, "namespace": namespace},
        "spec": {
            "priority": 10.0,
            "appliedTo": [{"podSelector": {"matchLabels": {"foo1": "bar1"}}}],
        },
    }))
    .unwrap()
}

pub fn acnp(name: &str) -> Resource {
    Resource::from_value(json!({
        "apiVersion": "crd.example/v1alpha1",
        "kind": "ClusterNetworkPolicy",
        "metadata": {"name": name},
        "spec": {
            "priority": 10.0,
            "appliedTo": [{"podSelector": {"matchLabels": {"foo1": "bar1"}}}],
        },
    }))
    .unwrap()
}

pub fn tier(name: &str) -> Resource {
    Resource::from_value(json!({
        "apiVersion": "crd.example/v1alpha1",
        "kind": "Tier",
        "metadata": {"name": name},
        "spec": {"priority": 10, "description": "test tier"},
    }))
    .unwrap()
}

/// A repo bootstrapped over an empty in-memory cluster.
pub fn empty_repo() -> AuditRepo {
    repo_with(vec![])
}

/// A repo bootstrapped over a cluster holding `resources`.
pub fn repo_with(resources: Vec<Resource>) -> AuditRepo {
    let cluster = Arc::new(InMemoryCluster::with_resources(resources).unwrap());
    setup_repo(cluster, StorageMode::InMemory, std::path::Path::new("")).unwrap()
}

/// A repo plus a handle on its cluster, for asserting on live state.
pub fn repo_and_cluster(resources: Vec<Resource>) -> (AuditRepo, Arc<InMemoryCluster>) {
    let cluster = Arc::new(InMemoryCluster::with_resources(resources).unwrap());
    let repo = setup_repo(cluster.clone(), StorageMode::InMemory, std::path::Path::new("")).unwrap();
    (repo, cluster)
}

/// Build one audit event as JSON.
pub fn audit_event(
    verb: &str,
    user: &str,
    uid: &str,
    resource_plural: &str,
    api_group: &str,
    namespace: &str,
    name: &str,
    response_object: Option<Value>,
) -> Value {
    let mut event = json!({
        "stage": "ResponseComplete",
        "verb": verb,
        "user": {"username": user, "uid": uid},
        "objectRef": {
            "resource": resource_plural,
            "namespace": namespace,
            "name": name,
            "apiGroup": api_group,
        },
        "responseStatus": {"status": "Success"},
    });
    if let Some(obj) = response_object {
        event["responseObject"] = obj;
    }
    event
}

/// Serialize events into an audit batch body.
pub fn batch(events: Vec<Value>) -> Vec<u8> {
    serde_json::to_vec(&json!({"items": events})).unwrap()
}
