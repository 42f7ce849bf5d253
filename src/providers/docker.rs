//! Docker discovery provider
//!
//! Discovers cluster members by listing running containers whose name matches
//! a configured filter and inspecting each one. The container runtime client
//! itself is an injected collaborator.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::params::{bind_params, ParamOverlay};
use crate::providers::traits::{
    local_hostname, AsgProvider, AsgStatus, ContainerRuntime, Instance, ProviderConfig,
};

/// Docker provider configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DockerConfig {
    /// Declared group size
    pub size: usize,
    /// Container name prefix to discover members by
    pub name_filter: String,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            size: 3,
            name_filter: "eco-".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DockerConfigOverlay {
    size: Option<usize>,
    name_filter: Option<String>,
}

impl ParamOverlay for DockerConfig {
    type Overlay = DockerConfigOverlay;

    fn apply(&mut self, overlay: DockerConfigOverlay) {
        if let Some(size) = overlay.size {
            self.size = size;
        }
        if let Some(name_filter) = overlay.name_filter {
            self.name_filter = name_filter;
        }
    }
}

/// Docker discovery provider
pub struct DockerProvider {
    runtime: Arc<dyn ContainerRuntime>,
    config: RwLock<Option<DockerConfig>>,
}

impl DockerProvider {
    /// Create a provider backed by the given container runtime
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self {
            runtime,
            config: RwLock::new(None),
        }
    }
}

#[async_trait]
impl AsgProvider for DockerProvider {
    async fn configure(&self, provider_config: ProviderConfig) -> ProviderResult<()> {
        let mut config = DockerConfig::default();
        bind_params(&mut config, &provider_config.params)?;

        debug!(size = config.size, name_filter = %config.name_filter, "configured docker provider");
        *self.config.write().await = Some(config);
        Ok(())
    }

    async fn status(&self) -> ProviderResult<AsgStatus> {
        let config = self
            .config
            .read()
            .await
            .clone()
            .ok_or_else(|| ProviderError::not_configured("docker"))?;

        // Containers commonly use a shortened form of their own ID as
        // hostname, hence the substring match for self-detection.
        let hostname = local_hostname();

        let container_names = self.runtime.list_containers(&config.name_filter).await?;

        let mut instances = Vec::with_capacity(container_names.len());
        let mut self_instance = None;
        for name in &container_names {
            let container = self.runtime.inspect_container(name).await?;
            let instance = Instance::new(&container.name, &container.address);
            if container.id.contains(&hostname) {
                self_instance = Some(instance.clone());
            }
            instances.push(instance);
        }

        debug!(
            observed = instances.len(),
            size = config.size,
            "docker provider status"
        );

        Ok(AsgStatus {
            instances,
            self_instance,
            size: config.size,
        })
    }
}
