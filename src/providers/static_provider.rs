//! Static discovery provider
//!
//! The membership is supplied up front as an initial-cluster descriptor and
//! never changes: the instance list and self reference are built once at
//! configure time, and status serves them back without any I/O.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::cluster::parse_initial_cluster;
use crate::error::{ProviderError, ProviderResult};
use crate::params::{bind_params, ParamOverlay};
use crate::providers::traits::{AsgProvider, AsgStatus, Instance, ProviderConfig};

/// Static provider configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StaticConfig {
    /// Name of the local member, matched exactly for self-detection
    pub name: String,
    /// Declared group size; must equal the descriptor's entry count
    pub size: usize,
    /// Initial-cluster descriptor holding the fixed membership
    pub initial_cluster: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StaticConfigOverlay {
    name: Option<String>,
    size: Option<usize>,
    initial_cluster: Option<String>,
}

impl ParamOverlay for StaticConfig {
    type Overlay = StaticConfigOverlay;

    fn apply(&mut self, overlay: StaticConfigOverlay) {
        if let Some(name) = overlay.name {
            self.name = name;
        }
        if let Some(size) = overlay.size {
            self.size = size;
        }
        if let Some(initial_cluster) = overlay.initial_cluster {
            self.initial_cluster = initial_cluster;
        }
    }
}

#[derive(Debug)]
struct StaticState {
    instances: Vec<Instance>,
    self_instance: Option<Instance>,
}

/// Static discovery provider
#[derive(Default)]
pub struct StaticProvider {
    state: RwLock<Option<StaticState>>,
}

impl StaticProvider {
    /// Create an unconfigured provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Stable identifier of this backend
    pub fn uid(&self) -> &'static str {
        "static"
    }

    /// No-op refresh; there is nothing dynamic to refresh, but the broader
    /// controller-facing surface expects the operation to exist.
    pub async fn refresh(&self, _params: HashMap<String, String>) -> ProviderResult<()> {
        Ok(())
    }
}

#[async_trait]
impl AsgProvider for StaticProvider {
    async fn configure(&self, provider_config: ProviderConfig) -> ProviderResult<()> {
        let mut config = StaticConfig::default();
        bind_params(&mut config, &provider_config.params)?;

        let members = parse_initial_cluster(&config.initial_cluster)?;
        if members.len() != config.size {
            return Err(ProviderError::size_mismatch(
                &config.initial_cluster,
                config.size,
                members.len(),
            ));
        }

        let mut instances = Vec::with_capacity(members.len());
        let mut self_instance = None;
        for (name, address) in members {
            let instance = Instance::new(&name, &address);
            if name == config.name {
                self_instance = Some(instance.clone());
            }
            instances.push(instance);
        }

        *self.state.write().await = Some(StaticState {
            instances,
            self_instance,
        });
        Ok(())
    }

    async fn status(&self) -> ProviderResult<AsgStatus> {
        let state = self.state.read().await;
        let state = state
            .as_ref()
            .ok_or_else(|| ProviderError::not_configured("static"))?;

        Ok(AsgStatus {
            instances: state.instances.clone(),
            self_instance: state.self_instance.clone(),
            size: state.instances.len(),
        })
    }
}
