//! Canonical form of a control plane spec
//!
//! A settings tree cannot tell an absent sub-object from an empty one, or an
//! explicit value from the implicit default it equals. [`canonicalize`] picks
//! the representative that hydration returns, so for every valid spec
//! `hydrate(merge(baseline, project(spec))) == canonicalize(spec)`.

use mesh_api::{
    ClusterConfig, ClusterIngressGatewayConfig, ControlPlaneSpec, EgressGatewayConfig,
    Enablement, GatewayConfig, GatewaysConfig, MeshExpansionConfig, ProxyConfig,
};

use crate::gate::VersionProfile;

/// Normalize `spec` to the form hydration produces under `profile`.
pub fn canonicalize(spec: &ControlPlaneSpec, profile: &VersionProfile) -> ControlPlaneSpec {
    ControlPlaneSpec {
        version: profile.version.to_string(),
        cluster: spec.cluster.as_ref().and_then(canonical_cluster),
        proxy: spec
            .proxy
            .as_ref()
            .and_then(|proxy| canonical_proxy(proxy, profile)),
        gateways: spec.gateways.as_ref().and_then(canonical_gateways),
    }
}

fn canonical_cluster(cluster: &ClusterConfig) -> Option<ClusterConfig> {
    if cluster.name.is_empty() && cluster.network.is_empty() && cluster.multi_cluster.is_none() {
        return None;
    }
    // Mesh expansion only reaches the tree as the ILB switch of a multicluster mesh
    let uses_ilb = cluster.multi_cluster.is_some()
        && cluster
            .mesh_expansion
            .as_ref()
            .is_some_and(MeshExpansionConfig::uses_ilb);
    let mesh_expansion = uses_ilb.then(|| MeshExpansionConfig {
        ilb_gateway: Some(GatewayConfig {
            enabled: Enablement::Enabled,
        }),
    });
    Some(ClusterConfig {
        name: cluster.name.clone(),
        network: cluster.network.clone(),
        multi_cluster: cluster.multi_cluster.clone(),
        mesh_expansion,
    })
}

fn canonical_proxy(proxy: &ProxyConfig, profile: &VersionProfile) -> Option<ProxyConfig> {
    let mut proxy = proxy.clone();
    if proxy.networking.cluster_domain == profile.default_cluster_domain {
        proxy.networking.cluster_domain.clear();
    }
    let networking = &proxy.networking;
    if networking.cluster_domain.is_empty() && networking.dns.search_suffixes.is_empty() {
        return None;
    }
    Some(proxy)
}

fn canonical_gateways(gateways: &GatewaysConfig) -> Option<GatewaysConfig> {
    let cluster_egress = gateways
        .cluster_egress
        .as_ref()
        .filter(|egress| !is_empty_egress(egress))
        .cloned();
    let cluster_ingress = gateways
        .cluster_ingress
        .as_ref()
        .filter(|ingress| !is_empty_ingress(ingress))
        .cloned();
    if gateways.enabled.is_unset() && cluster_egress.is_none() && cluster_ingress.is_none() {
        return None;
    }
    Some(GatewaysConfig {
        enabled: gateways.enabled,
        cluster_egress,
        cluster_ingress,
    })
}

fn is_empty_ingress(ingress: &ClusterIngressGatewayConfig) -> bool {
    ingress.enabled.is_unset()
        && ingress.ingress_enabled.is_unset()
        && ingress.service.ports.is_empty()
}

fn is_empty_egress(egress: &EgressGatewayConfig) -> bool {
    egress.enabled.is_unset() && egress.requested_network_view.is_empty()
}
