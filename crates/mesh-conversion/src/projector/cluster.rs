use mesh_api::{ControlPlaneSpec, MeshNetworkConfig};
use mesh_values::{Mapping, Value};

use crate::error::{Error, Result};
use crate::gate::VersionProfile;
use crate::keys;
use crate::projector::{added_search_suffixes, gateways, uses_ilb};

/// Write the cluster identity and multicluster topology of `spec`.
///
/// `global.useMCP`, `global.multiCluster.enabled` and the mesh expansion
/// switches are always written. With multicluster enabled this also writes
/// the mesh networks (synthesizing the cluster's own network when the user
/// did not configure it) and the markers hydration needs to tell injected
/// defaults from user input.
pub fn populate_cluster_values(
    spec: &ControlPlaneSpec,
    profile: &VersionProfile,
    values: &mut Value,
) -> Result<()> {
    let cluster = spec.cluster.as_ref();
    let name = cluster.map(|cluster| cluster.name.as_str()).unwrap_or_default();
    let network = cluster
        .map(|cluster| cluster.network.as_str())
        .unwrap_or_default();
    let multi_cluster = cluster.and_then(|cluster| cluster.multi_cluster.as_ref());

    if multi_cluster.is_some() {
        if name.is_empty() || network.is_empty() {
            return Err(Error::invalid(
                "cluster",
                "multicluster requires both a cluster name and a network",
            ));
        }
        if !profile.multi_cluster {
            return Err(Error::UnsupportedFeature {
                feature: "multicluster".to_string(),
                version: profile.version,
            });
        }
    }

    values.set(keys::USE_MCP, true)?;
    if !name.is_empty() {
        values.set(keys::CLUSTER_NAME, name)?;
    }
    if !network.is_empty() {
        values.set(keys::NETWORK, network)?;
    }
    values.set(keys::MULTI_CLUSTER_ENABLED, multi_cluster.is_some())?;
    values.set(keys::MESH_EXPANSION_ENABLED, multi_cluster.is_some())?;
    values.set(keys::USE_ILB, uses_ilb(spec))?;

    let Some(multi_cluster) = multi_cluster else {
        return Ok(());
    };
    tracing::debug!(cluster = %name, network = %network, "Projecting multicluster topology");

    let mut networks = Mapping::new();
    for (network_name, config) in &multi_cluster.mesh_networks {
        validate_network(network_name, config)?;
        networks.insert(network_name.clone(), network_value(config));
    }
    if !networks.contains_key(network) {
        let domain = spec
            .cluster_domain()
            .unwrap_or(&profile.default_cluster_domain);
        tracing::trace!(network = %network, domain = %domain, "Synthesizing local mesh network");
        networks.insert(
            network.to_string(),
            network_value(&profile.local_network(name, domain)),
        );
        values.set(keys::ADDED_LOCAL_NETWORK, network)?;
    }
    values.set(keys::MESH_NETWORKS, Value::Map(networks))?;

    let added_suffixes = added_search_suffixes(spec, profile);
    if !added_suffixes.is_empty() {
        values.set(keys::ADDED_SEARCH_SUFFIXES, Value::seq(added_suffixes))?;
    }

    let overrides = gateways::multicluster_overrides(spec, profile);
    if !overrides.is_empty() {
        values.set(keys::GATEWAYS_OVERRIDES, Value::Map(overrides))?;
    }

    values.set(
        &keys::gateway_path(&profile.ilb_gateway, "enabled"),
        uses_ilb(spec),
    )?;
    Ok(())
}

fn validate_network(name: &str, config: &MeshNetworkConfig) -> Result<()> {
    let path = format!("cluster.multiCluster.meshNetworks.{name}");
    if name.is_empty() {
        return Err(Error::invalid(path, "network name must not be empty"));
    }
    if config.endpoints.is_empty() {
        return Err(Error::invalid(
            format!("{path}.endpoints"),
            "at least one endpoint is required",
        ));
    }
    for (index, endpoint) in config.endpoints.iter().enumerate() {
        if endpoint.from_registry.is_empty() {
            return Err(Error::invalid(
                format!("{path}.endpoints[{index}].fromRegistry"),
                "must not be empty",
            ));
        }
    }
    for (index, gateway) in config.gateways.iter().enumerate() {
        if gateway.service.is_empty() {
            return Err(Error::invalid(
                format!("{path}.gateways[{index}].service"),
                "must not be empty",
            ));
        }
        if !(1..=65535).contains(&gateway.port) {
            return Err(Error::invalid(
                format!("{path}.gateways[{index}].port"),
                format!("{} is not a valid port", gateway.port),
            ));
        }
    }
    Ok(())
}

fn network_value(config: &MeshNetworkConfig) -> Value {
    let endpoints = config.endpoints.iter().map(|endpoint| {
        Value::Map(Mapping::from([(
            "fromRegistry".to_string(),
            Value::from(&endpoint.from_registry),
        )]))
    });
    let gateways = config.gateways.iter().map(|gateway| {
        Value::Map(Mapping::from([
            ("port".to_string(), Value::from(gateway.port)),
            ("service".to_string(), Value::from(&gateway.service)),
        ]))
    });
    Value::Map(Mapping::from([
        ("endpoints".to_string(), Value::seq(endpoints)),
        ("gateways".to_string(), Value::seq(gateways)),
    ]))
}
