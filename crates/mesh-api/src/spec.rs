//! Control plane configuration types
//!
//! Every optional section is an `Option<T>` so that an omitted section and a
//! section written with default contents stay distinguishable after a round
//! trip through serde.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enablement::Enablement;

/// Top-level control plane configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPlaneSpec {
    /// Schema version as written by the user, e.g. `v2.0`
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<ClusterConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateways: Option<GatewaysConfig>,
}

impl ControlPlaneSpec {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Default::default()
        }
    }

    /// Whether the cluster section opts into multicluster
    pub fn is_multi_cluster(&self) -> bool {
        self.cluster
            .as_ref()
            .is_some_and(|cluster| cluster.multi_cluster.is_some())
    }

    /// Cluster domain set by the user, if any
    pub fn cluster_domain(&self) -> Option<&str> {
        self.proxy
            .as_ref()
            .map(|proxy| proxy.networking.cluster_domain.as_str())
            .filter(|domain| !domain.is_empty())
    }

    /// DNS search suffixes set by the user, in order
    pub fn search_suffixes(&self) -> &[String] {
        self.proxy
            .as_ref()
            .map(|proxy| proxy.networking.dns.search_suffixes.as_slice())
            .unwrap_or_default()
    }
}

/// Cluster identity and multicluster topology
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub network: String,
    /// Presence alone enables multicluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_cluster: Option<MultiClusterConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_expansion: Option<MeshExpansionConfig>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiClusterConfig {
    /// Networks keyed by network name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mesh_networks: BTreeMap<String, MeshNetworkConfig>,
}

/// How to reach the workloads of one network
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshNetworkConfig {
    #[serde(default)]
    pub endpoints: Vec<MeshEndpointConfig>,
    #[serde(default)]
    pub gateways: Vec<MeshGatewayConfig>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshEndpointConfig {
    pub from_registry: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshGatewayConfig {
    pub service: String,
    pub port: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshExpansionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ilb_gateway: Option<GatewayConfig>,
}

impl MeshExpansionConfig {
    /// True only when the ILB gateway is explicitly enabled
    pub fn uses_ilb(&self) -> bool {
        self.ilb_gateway
            .as_ref()
            .is_some_and(|gateway| gateway.enabled.is_enabled())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    #[serde(default, skip_serializing_if = "Enablement::is_unset")]
    pub enabled: Enablement,
}

/// Sidecar proxy settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfig {
    #[serde(default)]
    pub networking: ProxyNetworkingConfig,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyNetworkingConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cluster_domain: String,
    #[serde(default)]
    pub dns: ProxyDnsConfig,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyDnsConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_suffixes: Vec<String>,
}

/// Cluster gateway settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewaysConfig {
    #[serde(default, skip_serializing_if = "Enablement::is_unset")]
    pub enabled: Enablement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_egress: Option<EgressGatewayConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_ingress: Option<ClusterIngressGatewayConfig>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EgressGatewayConfig {
    #[serde(default, skip_serializing_if = "Enablement::is_unset")]
    pub enabled: Enablement,
    /// Networks whose endpoints this gateway may route to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requested_network_view: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterIngressGatewayConfig {
    #[serde(default, skip_serializing_if = "Enablement::is_unset")]
    pub enabled: Enablement,
    #[serde(default)]
    pub service: GatewayServiceConfig,
    /// Whether the gateway also serves Kubernetes `Ingress` resources
    #[serde(default, skip_serializing_if = "Enablement::is_unset")]
    pub ingress_enabled: Enablement,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayServiceConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<ServicePort>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePort {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub port: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_port: Option<i64>,
}

impl ServicePort {
    pub fn is_https(&self) -> bool {
        self.port == 443 || self.name == "https"
    }
}
