//! # asg-discovery — cluster-membership discovery for etcd bootstrap
//!
//! This crate answers three questions for a bootstrap controller bringing up
//! an etcd cluster: who are the expected members of this deployment, which
//! one is "me", and how many members should exist. Different deployment
//! substrates expose that information differently, so the crate defines one
//! uniform [`AsgProvider`](providers::AsgProvider) contract and four
//! interchangeable backends (Docker, Etcd, Kubernetes, Static).
//!
//! Providers are point-in-time membership oracles: the caller configures one
//! once, then polls its status on its own cadence. This layer never retries,
//! never imposes timeouts, and never decides cluster actions.
//!
//! ## Usage example
//!
//! ```rust,no_run
//! use asg_discovery::providers::{ProviderConfig, StaticProvider, AsgProvider};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = StaticProvider::new();
//! let config = ProviderConfig::from_params([
//!     ("name", json!("eco-1")),
//!     ("size", json!(3)),
//!     ("initial-cluster", json!("eco-1=http://h1,eco-2=http://h2,eco-3=http://h3")),
//! ]);
//! provider.configure(config).await?;
//!
//! let status = provider.status().await?;
//! println!("{} of {} members known", status.instances.len(), status.size);
//! # Ok(())
//! # }
//! ```

pub mod cluster;
pub mod error;
pub mod params;
pub mod providers;
pub mod registry;

// Re-export commonly used types
pub use cluster::parse_initial_cluster;
pub use error::{ProviderError, ProviderResult};
pub use params::{bind_params, ParamOverlay};
pub use providers::{
    AsgProvider, AsgStatus, ContainerDetails, ContainerRuntime, Instance, ProviderConfig,
    ProviderKind,
};
pub use registry::ProviderRegistry;
