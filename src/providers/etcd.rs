//! Etcd discovery provider
//!
//! Holds the membership view in memory, seeded from an initial-cluster
//! descriptor and overlaid with entries recovered from a cache file that the
//! external reconciler maintains. The cache never changes after configure:
//! membership changes written to the cache file are only picked up on the
//! next configure (in practice, a process restart).

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::cluster::parse_initial_cluster;
use crate::error::{ProviderError, ProviderResult};
use crate::params::{bind_params, ParamOverlay};
use crate::providers::traits::{AsgProvider, AsgStatus, Instance, ProviderConfig};

/// Etcd provider configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct EtcdConfig {
    /// Name of the local member, matched exactly for self-detection
    pub name: String,
    /// Declared group size; must equal the descriptor's entry count
    pub size: usize,
    /// Initial-cluster descriptor seeding the membership cache
    pub initial_cluster: String,
    /// Path of the reconciler-written cache file; empty disables recovery
    pub cache_file: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EtcdConfigOverlay {
    name: Option<String>,
    size: Option<usize>,
    initial_cluster: Option<String>,
    cache_file: Option<String>,
}

impl ParamOverlay for EtcdConfig {
    type Overlay = EtcdConfigOverlay;

    fn apply(&mut self, overlay: EtcdConfigOverlay) {
        if let Some(name) = overlay.name {
            self.name = name;
        }
        if let Some(size) = overlay.size {
            self.size = size;
        }
        if let Some(initial_cluster) = overlay.initial_cluster {
            self.initial_cluster = initial_cluster;
        }
        if let Some(cache_file) = overlay.cache_file {
            self.cache_file = cache_file;
        }
    }
}

/// Persisted membership record written by the external reconciler
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedCluster {
    /// Member name -> address mapping
    #[serde(default)]
    pub instances: BTreeMap<String, String>,
    /// Declared group size at the time of writing
    #[serde(default)]
    pub size: usize,
}

#[derive(Debug)]
struct EtcdState {
    config: EtcdConfig,
    cache: BTreeMap<String, String>,
}

/// Etcd discovery provider
///
/// Configure holds the state lock exclusively; status holds it shared, so
/// concurrent status queries proceed in parallel while reconfiguration
/// serializes against them.
#[derive(Default)]
pub struct EtcdProvider {
    state: RwLock<Option<EtcdState>>,
}

impl EtcdProvider {
    /// Create an unconfigured provider
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AsgProvider for EtcdProvider {
    async fn configure(&self, provider_config: ProviderConfig) -> ProviderResult<()> {
        let mut state = self.state.write().await;

        let mut config = EtcdConfig::default();
        bind_params(&mut config, &provider_config.params)?;

        let seeded = parse_initial_cluster(&config.initial_cluster)?;
        if seeded.len() != config.size {
            return Err(ProviderError::size_mismatch(
                &config.initial_cluster,
                config.size,
                seeded.len(),
            ));
        }

        let mut cache = seeded;

        // Recover membership changes the reconciler persisted before a
        // restart. A missing or corrupt cache file is not an error.
        if !config.cache_file.is_empty() {
            match tokio::fs::read(&config.cache_file).await {
                Ok(data) => match serde_yaml::from_slice::<PersistedCluster>(&data) {
                    Ok(persisted) => {
                        for (name, address) in persisted.instances {
                            cache.insert(name, address);
                        }
                        debug!(cache_file = %config.cache_file, "recovered persisted membership");
                    }
                    Err(err) => {
                        debug!(cache_file = %config.cache_file, %err, "skipping corrupt cache file");
                    }
                },
                Err(err) => {
                    debug!(cache_file = %config.cache_file, %err, "skipping unreadable cache file");
                }
            }
        }

        *state = Some(EtcdState { config, cache });
        Ok(())
    }

    async fn status(&self) -> ProviderResult<AsgStatus> {
        let state = self.state.read().await;
        let state = state
            .as_ref()
            .ok_or_else(|| ProviderError::not_configured("etcd"))?;

        let mut instances = Vec::with_capacity(state.config.size);
        let mut self_instance = None;
        for (name, address) in &state.cache {
            let instance = Instance::new(name, address);
            if *name == state.config.name {
                self_instance = Some(instance.clone());
            }
            instances.push(instance);
        }

        Ok(AsgStatus {
            instances,
            self_instance,
            size: state.config.size,
        })
    }
}
