//! In-memory cluster for tests and ephemeral deployments.
//!
//! [`InMemoryCluster`] keeps resources in a `RwLock`'d map keyed by
//! `(kind, namespace, name)` and mimics the API server's resource-version
//! bookkeeping: every write bumps a monotonic counter onto the stored
//! document, and updates must go through the same create-or-update flow the
//! real server enforces.

use std::collections::BTreeMap;
use std::sync::RwLock;

use pva_resource::{Resource, ResourceKind};

use crate::error::{ClusterError, ClusterResult};
use crate::gateway::ClusterGateway;

type Key = (ResourceKind, String, String);

/// An in-memory implementation of [`ClusterGateway`].
#[derive(Debug, Default)]
pub struct InMemoryCluster {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    resources: BTreeMap<Key, Resource>,
    next_version: u64,
}

impl InMemoryCluster {
    /// Create an empty cluster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cluster pre-populated with resources (bootstrap fixtures).
    pub fn with_resources(resources: Vec<Resource>) -> ClusterResult<Self> {
        let cluster = Self::new();
        for resource in &resources {
            cluster.create_or_update(resource)?;
        }
        Ok(cluster)
    }

    /// Number of resources currently stored.
    pub fn len(&self) -> usize {
        self.inner.read().expect("lock poisoned").resources.len()
    }

    /// Returns `true` if the cluster holds no resources.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn key_of(resource: &Resource) -> ClusterResult<Key> {
        let kind = resource
            .kind()
            .map_err(|e| ClusterError::InvalidResource(e.to_string()))?;
        let name = resource
            .name()
            .map_err(|e| ClusterError::InvalidResource(e.to_string()))?;
        Ok((kind, resource.namespace().to_string(), name.to_string()))
    }
}

impl ClusterGateway for InMemoryCluster {
    fn list(&self, kind: ResourceKind) -> ClusterResult<Vec<Resource>> {
        let inner = self.inner.read().expect("lock poisoned");
        Ok(inner
            .resources
            .iter()
            .filter(|((k, _, _), _)| *k == kind)
            .map(|(_, r)| r.clone())
            .collect())
    }

    fn get(&self, kind: ResourceKind, namespace: &str, name: &str) -> ClusterResult<Resource> {
        let inner = self.inner.read().expect("lock poisoned");
        inner
            .resources
            .get(&(kind, namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| ClusterError::NotFound {
                kind: kind.to_string(),
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }

    fn create_or_update(&self, resource: &Resource) -> ClusterResult<()> {
        let key = Self::key_of(resource)?;
        let mut inner = self.inner.write().expect("lock poisoned");
        inner.next_version += 1;
        let version = inner.next_version.to_string();
        let mut stored = resource.clone();
        stored.set_resource_version(Some(&version));
        match inner.resources.insert(key.clone(), stored) {
            Some(_) => tracing::debug!(name = %key.2, "updated resource"),
            None => tracing::debug!(name = %key.2, "created resource"),
        }
        Ok(())
    }

    fn delete(&self, resource: &Resource) -> ClusterResult<()> {
        let key = Self::key_of(resource)?;
        let mut inner = self.inner.write().expect("lock poisoned");
        if inner.resources.remove(&key).is_none() {
            return Err(ClusterError::NotFound {
                kind: key.0.to_string(),
                namespace: key.1,
                name: key.2,
            });
        }
        tracing::debug!(name = %key.2, "deleted resource");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn np(namespace: &str, name: &str) -> Resource {
        Resource::from_value(json!({
            "apiVersion": "networking.example/v1",
            "kind": "NetworkPolicy",
            "metadata": {"name": name, "namespace": namespace},
            "spec": {"podSelector": {}},
        }))
        .unwrap()
    }

    fn tier(name: &str) -> Resource {
        Resource::from_value(json!({
            "apiVersion": "crd.example/v1alpha1",
            "kind": "Tier",
            "metadata": {"name": name},
            "spec": {"priority": 10},
        }))
        .unwrap()
    }

    #[test]
    fn create_then_get() {
        let cluster = InMemoryCluster::new();
        cluster.create_or_update(&np("nsA", "npA")).unwrap();
        let got = cluster
            .get(ResourceKind::K8sNetworkPolicy, "nsA", "npA")
            .unwrap();
        assert_eq!(got.name().unwrap(), "npA");
        assert!(got.resource_version().is_some());
    }

    #[test]
    fn get_missing_is_not_found() {
        let cluster = InMemoryCluster::new();
        assert!(matches!(
            cluster.get(ResourceKind::Tier, "", "absent"),
            Err(ClusterError::NotFound { .. })
        ));
    }

    #[test]
    fn list_filters_by_kind() {
        let cluster = InMemoryCluster::with_resources(vec![
            np("nsA", "npA"),
            np("nsB", "npB"),
            tier("TierA"),
        ])
        .unwrap();
        assert_eq!(cluster.list(ResourceKind::K8sNetworkPolicy).unwrap().len(), 2);
        assert_eq!(cluster.list(ResourceKind::Tier).unwrap().len(), 1);
        assert!(cluster.list(ResourceKind::ClusterNetworkPolicy).unwrap().is_empty());
    }

    #[test]
    fn update_bumps_resource_version() {
        let cluster = InMemoryCluster::new();
        cluster.create_or_update(&np("nsA", "npA")).unwrap();
        let v1 = cluster
            .get(ResourceKind::K8sNetworkPolicy, "nsA", "npA")
            .unwrap()
            .resource_version()
            .unwrap()
            .to_string();
        cluster.create_or_update(&np("nsA", "npA")).unwrap();
        let v2 = cluster
            .get(ResourceKind::K8sNetworkPolicy, "nsA", "npA")
            .unwrap()
            .resource_version()
            .unwrap()
            .to_string();
        assert_ne!(v1, v2);
        assert_eq!(cluster.len(), 1);
    }

    #[test]
    fn delete_removes_and_second_delete_fails() {
        let cluster = InMemoryCluster::new();
        let resource = tier("TierA");
        cluster.create_or_update(&resource).unwrap();
        cluster.delete(&resource).unwrap();
        assert!(cluster.is_empty());
        assert!(matches!(
            cluster.delete(&resource),
            Err(ClusterError::NotFound { .. })
        ));
    }

    #[test]
    fn unknown_kind_is_invalid() {
        let cluster = InMemoryCluster::new();
        let bogus = Resource::from_value(json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {"name": "d"},
        }))
        .unwrap();
        assert!(matches!(
            cluster.create_or_update(&bogus),
            Err(ClusterError::InvalidResource(_))
        ));
    }
}
