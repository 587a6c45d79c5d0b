//! Settings tree paths read and written by the conversion
//!
//! Gateway sections are keyed by the gateway names of the version profile,
//! see [`gateway_path`].

pub const USE_MCP: &str = "global.useMCP";
pub const NETWORK: &str = "global.network";
pub const MESH_NETWORKS: &str = "global.meshNetworks";

pub const MULTI_CLUSTER_ENABLED: &str = "global.multiCluster.enabled";
pub const CLUSTER_NAME: &str = "global.multiCluster.clusterName";
pub const ADDED_LOCAL_NETWORK: &str = "global.multiCluster.addedLocalNetwork";
pub const ADDED_SEARCH_SUFFIXES: &str = "global.multiCluster.addedSearchSuffixes";
pub const GATEWAYS_OVERRIDES: &str = "global.multiCluster.gatewaysOverrides";

pub const MESH_EXPANSION_ENABLED: &str = "global.meshExpansion.enabled";
pub const USE_ILB: &str = "global.meshExpansion.useILB";

pub const CLUSTER_DOMAIN: &str = "global.proxy.clusterDomain";
pub const POD_DNS_SEARCH_NAMESPACES: &str = "global.podDNSSearchNamespaces";

pub const K8S_INGRESS_ENABLED: &str = "global.k8sIngress.enabled";
pub const K8S_INGRESS_HTTPS: &str = "global.k8sIngress.enableHttps";

pub const GATEWAYS_ENABLED: &str = "gateways.enabled";

/// Environment variable carrying the egress gateway's network view
pub const REQUESTED_NETWORK_VIEW_ENV: &str = "env.ISTIO_META_REQUESTED_NETWORK_VIEW";

/// Keys inside `gatewaysOverrides`
pub mod overrides {
    pub const ENABLED: &str = "enabled";
    pub const EGRESS_ENABLED: &str = "egressEnabled";
    pub const INGRESS_ENABLED: &str = "ingressEnabled";
    pub const K8S_INGRESS_ENABLED: &str = "k8sIngressEnabled";
    pub const ADDED_EXTERNAL: &str = "addedExternal";
}

/// Path of `field` within the section of gateway `gateway`
pub fn gateway_path(gateway: &str, field: &str) -> String {
    format!("gateways.{gateway}.{field}")
}
