//! Kubernetes discovery provider
//!
//! Reads the cluster specification document maintained by an orchestrator
//! level controller. The document is the authoritative source of truth, so
//! it is re-read and re-parsed on every status query with no local caching.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::params::{bind_params, ParamOverlay};
use crate::providers::traits::{
    local_hostname, AsgProvider, AsgStatus, Instance, ProviderConfig,
};

/// Kubernetes provider configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct KubernetesConfig {
    /// Path of the controller-maintained membership document
    pub membership_file: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KubernetesConfigOverlay {
    membership_file: Option<String>,
}

impl ParamOverlay for KubernetesConfig {
    type Overlay = KubernetesConfigOverlay;

    fn apply(&mut self, overlay: KubernetesConfigOverlay) {
        if let Some(membership_file) = overlay.membership_file {
            self.membership_file = membership_file;
        }
    }
}

/// Cluster specification document, as written by the membership controller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterManifest {
    /// Desired-state section holding the membership
    #[serde(default)]
    pub spec: ClusterSpec,
}

/// Membership section of the cluster specification
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterSpec {
    /// Expected members
    #[serde(default)]
    pub instances: Vec<Instance>,
    /// Declared group size
    #[serde(default)]
    pub size: usize,
}

/// Kubernetes discovery provider
#[derive(Default)]
pub struct KubernetesProvider {
    config: RwLock<Option<KubernetesConfig>>,
}

impl KubernetesProvider {
    /// Create an unconfigured provider
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AsgProvider for KubernetesProvider {
    async fn configure(&self, provider_config: ProviderConfig) -> ProviderResult<()> {
        let mut config = KubernetesConfig::default();
        bind_params(&mut config, &provider_config.params)?;

        debug!(membership_file = %config.membership_file, "configured kubernetes provider");
        *self.config.write().await = Some(config);
        Ok(())
    }

    async fn status(&self) -> ProviderResult<AsgStatus> {
        let config = self
            .config
            .read()
            .await
            .clone()
            .ok_or_else(|| ProviderError::not_configured("kubernetes"))?;

        let data = tokio::fs::read(&config.membership_file).await?;
        let manifest: ClusterManifest = serde_yaml::from_slice(&data).map_err(|e| {
            ProviderError::invalid_format(format!(
                "invalid membership file {}: {}",
                config.membership_file, e
            ))
        })?;

        let hostname = local_hostname();

        let mut instances = Vec::with_capacity(manifest.spec.instances.len());
        let mut self_instance = None;
        for instance in manifest.spec.instances {
            if instance.name.contains(&hostname) {
                self_instance = Some(instance.clone());
            }
            instances.push(instance);
        }

        Ok(AsgStatus {
            instances,
            self_instance,
            size: manifest.spec.size,
        })
    }
}
