//! Provider registry
//!
//! Name -> provider lookup table, explicitly constructed and populated by the
//! host application during startup. Registration finishes before any
//! concurrent reads, so the table itself needs no locking.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{ProviderError, ProviderResult};
use crate::providers::docker::DockerProvider;
use crate::providers::etcd::EtcdProvider;
use crate::providers::kubernetes::KubernetesProvider;
use crate::providers::static_provider::StaticProvider;
use crate::providers::traits::{AsgProvider, ContainerRuntime, ProviderKind};

/// Lookup table binding provider names to backend implementations
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn AsgProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with all four built-in backends registered under
    /// their kind names
    pub fn with_builtin(runtime: Arc<dyn ContainerRuntime>) -> Self {
        let mut registry = Self::new();
        for kind in ProviderKind::ALL {
            let provider: Arc<dyn AsgProvider> = match kind {
                ProviderKind::Docker => Arc::new(DockerProvider::new(runtime.clone())),
                ProviderKind::Etcd => Arc::new(EtcdProvider::new()),
                ProviderKind::Kubernetes => Arc::new(KubernetesProvider::new()),
                ProviderKind::Static => Arc::new(StaticProvider::new()),
            };
            // Kind names are distinct, so registration cannot fail here.
            let _ = registry.register(kind.name(), provider);
        }
        registry
    }

    /// Bind a name to a provider
    ///
    /// Registering the same name twice is a programming error and is rejected
    /// deterministically rather than silently overwriting.
    pub fn register<S: Into<String>>(
        &mut self,
        name: S,
        provider: Arc<dyn AsgProvider>,
    ) -> ProviderResult<()> {
        let name = name.into();
        if self.providers.contains_key(&name) {
            return Err(ProviderError::AlreadyRegistered { name });
        }
        self.providers.insert(name, provider);
        Ok(())
    }

    /// Look up a provider by name
    pub fn lookup(&self, name: &str) -> ProviderResult<Arc<dyn AsgProvider>> {
        self.providers
            .get(name)
            .cloned()
            .ok_or_else(|| ProviderError::not_found(name))
    }

    /// Names of every registered provider, sorted
    pub fn provider_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::providers::traits::{AsgStatus, ContainerDetails};

    struct NullRuntime;

    #[async_trait]
    impl ContainerRuntime for NullRuntime {
        async fn list_containers(&self, _name_filter: &str) -> ProviderResult<Vec<String>> {
            Ok(Vec::new())
        }

        async fn inspect_container(&self, name: &str) -> ProviderResult<ContainerDetails> {
            Err(ProviderError::io(format!("no such container: {}", name)))
        }
    }

    struct NullProvider;

    #[async_trait]
    impl AsgProvider for NullProvider {
        async fn configure(&self, _config: crate::providers::ProviderConfig) -> ProviderResult<()> {
            Ok(())
        }

        async fn status(&self) -> ProviderResult<AsgStatus> {
            Ok(AsgStatus {
                instances: Vec::new(),
                self_instance: None,
                size: 0,
            })
        }
    }

    #[test]
    fn test_lookup_unregistered_name() {
        let registry = ProviderRegistry::new();
        let err = registry.lookup("nomad").err().unwrap();
        assert!(matches!(err, ProviderError::NotFound { name } if name == "nomad"));
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = ProviderRegistry::new();
        registry.register("static", Arc::new(NullProvider)).unwrap();

        let err = registry
            .register("static", Arc::new(NullProvider))
            .unwrap_err();
        assert!(matches!(err, ProviderError::AlreadyRegistered { name } if name == "static"));

        // The original binding survives.
        assert!(registry.lookup("static").is_ok());
    }

    #[test]
    fn test_builtin_registry_exposes_all_kinds() {
        let registry = ProviderRegistry::with_builtin(Arc::new(NullRuntime));
        assert_eq!(
            registry.provider_names(),
            vec!["docker", "etcd", "kubernetes", "static"]
        );
        for kind in ProviderKind::ALL {
            assert!(registry.lookup(kind.name()).is_ok());
        }
    }
}
