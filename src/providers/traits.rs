//! Core traits and types for membership discovery
//!
//! This module defines the common contract that all discovery providers
//! implement, along with the shared data types exchanged with the bootstrap
//! controller.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProviderResult;

/// One expected member of the coordination cluster, as seen by a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Member name
    pub name: String,
    /// Member hostname or IP address
    pub address: String,
}

impl Instance {
    /// Create a new instance
    pub fn new<N: Into<String>, A: Into<String>>(name: N, address: A) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// Point-in-time membership view returned by a provider status query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsgStatus {
    /// Every member the provider currently observes
    pub instances: Vec<Instance>,
    /// The member corresponding to the local host, when one matches
    pub self_instance: Option<Instance>,
    /// Declared capacity of the group, independent of the observed count
    pub size: usize,
}

/// Loosely typed provider configuration, handed over by the host application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Backend-specific parameters, bound at configure time
    #[serde(default)]
    pub params: HashMap<String, Value>,
}

impl ProviderConfig {
    /// Build a config from an iterator of parameter key/value pairs
    pub fn from_params<I, K>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            params: params.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// The closed set of discovery backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Container-runtime introspection
    Docker,
    /// Seeded cache recovered from an etcd reconciler's cache file
    Etcd,
    /// Orchestrator-maintained membership file
    Kubernetes,
    /// Fixed membership supplied up front
    Static,
}

impl ProviderKind {
    /// All backend kinds, in registration order
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::Docker,
        ProviderKind::Etcd,
        ProviderKind::Kubernetes,
        ProviderKind::Static,
    ];

    /// Registry name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Docker => "docker",
            ProviderKind::Etcd => "etcd",
            ProviderKind::Kubernetes => "kubernetes",
            ProviderKind::Static => "static",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Membership discovery contract consumed by the bootstrap controller
///
/// A provider is configured once (or again on reconfiguration) and then
/// polled repeatedly for its membership view. Providers never retry or
/// time out on their own; bounding call latency belongs to the caller's
/// polling loop. `status` is only meaningful after a successful `configure`.
#[async_trait]
pub trait AsgProvider: Send + Sync {
    /// Bind and validate the provider's configuration
    ///
    /// This is the only point where persisted or recovered state is loaded.
    /// Validation failures indicate a deployment misconfiguration and are
    /// fatal to bootstrap.
    async fn configure(&self, config: ProviderConfig) -> ProviderResult<()>;

    /// Query the current membership view
    ///
    /// Returns every observed member, the member matching the local host (if
    /// any; its absence is not an error), and the declared group size. The
    /// observed and declared counts are allowed to diverge; reconciling them
    /// is the caller's job.
    async fn status(&self) -> ProviderResult<AsgStatus>;
}

/// Details of one running container, as reported by the runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDetails {
    /// Full container identifier
    pub id: String,
    /// Container name
    pub name: String,
    /// Container network address
    pub address: String,
}

/// Container-runtime collaborator used by the Docker provider
///
/// The concrete runtime client lives outside this crate; the provider only
/// needs name-filtered listing and per-container inspection.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// List the names of running containers whose name matches `name_filter`
    async fn list_containers(&self, name_filter: &str) -> ProviderResult<Vec<String>>;

    /// Inspect one container by name
    async fn inspect_container(&self, name: &str) -> ProviderResult<ContainerDetails>;
}

/// Local hostname, with lookup failures collapsing to an empty string the
/// same way the self-detection heuristic has always treated them.
pub(crate) fn local_hostname() -> String {
    hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_default()
}
