//! Discovery providers
//!
//! This module provides cluster-membership discovery with support for four
//! backends:
//! - Docker: container-runtime introspection, filtered by name prefix
//! - Etcd: cached membership seeded from a descriptor and recovered from a
//!   reconciler-written cache file
//! - Kubernetes: orchestrator-maintained membership file, re-read per query
//! - Static: fixed membership supplied up front

pub mod docker;
pub mod etcd;
pub mod kubernetes;
pub mod static_provider;
pub mod traits;


// Re-export public types for convenience
pub use traits::{
    AsgProvider, AsgStatus, ContainerDetails, ContainerRuntime, Instance, ProviderConfig,
    ProviderKind,
};

pub use docker::{DockerConfig, DockerProvider};
pub use etcd::{EtcdConfig, EtcdProvider, PersistedCluster};
pub use kubernetes::{ClusterManifest, ClusterSpec, KubernetesConfig, KubernetesProvider};
pub use static_provider::{StaticConfig, StaticProvider};
