//! The closed set of resource kinds the service versions.
//!
//! Dispatch by `(kind, group)` is a table lookup over this enum; there is no
//! open registration. Adding a kind means adding a variant and a row in each
//! match below.

use serde::{Deserialize, Serialize};

use crate::error::{ResourceError, ResourceResult};

/// A supported cluster resource kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    /// `NetworkPolicy` in `networking.example/v1`.
    K8sNetworkPolicy,
    /// `NetworkPolicy` in `crd.example/v1alpha1`.
    CrdNetworkPolicy,
    /// `ClusterNetworkPolicy` in `crd.example/v1alpha1` (cluster-scoped).
    ClusterNetworkPolicy,
    /// `Tier` in `crd.example/v1alpha1` (cluster-scoped).
    Tier,
}

impl ResourceKind {
    /// All supported kinds, in bootstrap order.
    pub fn all() -> &'static [ResourceKind] {
        &[
            ResourceKind::K8sNetworkPolicy,
            ResourceKind::CrdNetworkPolicy,
            ResourceKind::ClusterNetworkPolicy,
            ResourceKind::Tier,
        ]
    }

    /// API group.
    pub fn group(&self) -> &'static str {
        match self {
            ResourceKind::K8sNetworkPolicy => "networking.example",
            _ => "crd.example",
        }
    }

    /// API version within the group.
    pub fn version(&self) -> &'static str {
        match self {
            ResourceKind::K8sNetworkPolicy => "v1",
            _ => "v1alpha1",
        }
    }

    /// The `apiVersion` string as it appears on resource documents.
    pub fn api_version(&self) -> String {
        format!("{}/{}", self.group(), self.version())
    }

    /// The `kind` field value on resource documents.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ResourceKind::K8sNetworkPolicy | ResourceKind::CrdNetworkPolicy => "NetworkPolicy",
            ResourceKind::ClusterNetworkPolicy => "ClusterNetworkPolicy",
            ResourceKind::Tier => "Tier",
        }
    }

    /// Lowercase plural, as used by audit `objectRef.resource`.
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::K8sNetworkPolicy | ResourceKind::CrdNetworkPolicy => "networkpolicies",
            ResourceKind::ClusterNetworkPolicy => "clusternetworkpolicies",
            ResourceKind::Tier => "tiers",
        }
    }

    /// Top-level store directory for this kind.
    pub fn directory(&self) -> &'static str {
        match self {
            ResourceKind::K8sNetworkPolicy => "k8s-policies",
            ResourceKind::CrdNetworkPolicy => "policies",
            ResourceKind::ClusterNetworkPolicy => "cluster-policies",
            ResourceKind::Tier => "tiers",
        }
    }

    /// Whether resources of this kind live inside a namespace.
    pub fn namespaced(&self) -> bool {
        matches!(
            self,
            ResourceKind::K8sNetworkPolicy | ResourceKind::CrdNetworkPolicy
        )
    }

    /// Human-readable label used in commit messages.
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::K8sNetworkPolicy => "K8s NetworkPolicy",
            ResourceKind::CrdNetworkPolicy => "NetworkPolicy",
            ResourceKind::ClusterNetworkPolicy => "ClusterNetworkPolicy",
            ResourceKind::Tier => "Tier",
        }
    }

    /// Look up a kind by its `kind` field and API group.
    pub fn from_kind_group(kind: &str, group: &str) -> ResourceResult<Self> {
        match (kind, group) {
            ("NetworkPolicy", "networking.example") => Ok(ResourceKind::K8sNetworkPolicy),
            ("NetworkPolicy", "crd.example") => Ok(ResourceKind::CrdNetworkPolicy),
            ("ClusterNetworkPolicy", "crd.example") => Ok(ResourceKind::ClusterNetworkPolicy),
            ("Tier", "crd.example") => Ok(ResourceKind::Tier),
            _ => Err(ResourceError::UnknownKind {
                kind: kind.to_string(),
                group: group.to_string(),
            }),
        }
    }

    /// Look up a kind by audit `objectRef` plural name and API group.
    pub fn from_plural_group(plural: &str, group: &str) -> ResourceResult<Self> {
        match (plural, group) {
            ("networkpolicies", "networking.example") => Ok(ResourceKind::K8sNetworkPolicy),
            ("networkpolicies", "crd.example") => Ok(ResourceKind::CrdNetworkPolicy),
            ("clusternetworkpolicies", "crd.example") => Ok(ResourceKind::ClusterNetworkPolicy),
            ("tiers", "crd.example") => Ok(ResourceKind::Tier),
            _ => Err(ResourceError::UnknownKind {
                kind: plural.to_string(),
                group: group.to_string(),
            }),
        }
    }

    /// Look up a kind by its store directory.
    pub fn from_directory(dir: &str) -> ResourceResult<Self> {
        match dir {
            "k8s-policies" => Ok(ResourceKind::K8sNetworkPolicy),
            "policies" => Ok(ResourceKind::CrdNetworkPolicy),
            "cluster-policies" => Ok(ResourceKind::ClusterNetworkPolicy),
            "tiers" => Ok(ResourceKind::Tier),
            _ => Err(ResourceError::UnknownDirectory(dir.to_string())),
        }
    }

    /// Validate that an `apiVersion` string belongs to a supported group.
    pub fn check_api_version(api_version: &str) -> ResourceResult<()> {
        match api_version {
            "networking.example/v1" | "crd.example/v1alpha1" => Ok(()),
            other => Err(ResourceError::UnknownApiVersion(other.to_string())),
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.kind_name(), self.group())
    }
}
