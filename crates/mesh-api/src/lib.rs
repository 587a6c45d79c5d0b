//! Typed control plane configuration.
//!
//! [`ControlPlaneSpec`] is the operator-facing configuration object. Optional
//! sub-objects are modelled as `Option<T>` and override flags as the
//! three-valued [`Enablement`], so that "not configured" never collapses into
//! an explicit `false`.

pub mod enablement;
pub mod error;
pub mod spec;
pub mod version;

pub use enablement::Enablement;
pub use error::{Error, Result};
pub use spec::{
    ClusterConfig, ClusterIngressGatewayConfig, ControlPlaneSpec, EgressGatewayConfig,
    GatewayConfig, GatewayServiceConfig, GatewaysConfig, MeshEndpointConfig, MeshExpansionConfig,
    MeshGatewayConfig, MeshNetworkConfig, MultiClusterConfig, ProxyConfig, ProxyDnsConfig,
    ProxyNetworkingConfig, ServicePort,
};
pub use version::Version;
