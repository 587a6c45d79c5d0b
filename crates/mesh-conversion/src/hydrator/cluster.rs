use std::collections::BTreeMap;

use mesh_api::{
    ClusterConfig, Enablement, GatewayConfig, MeshEndpointConfig, MeshExpansionConfig,
    MeshGatewayConfig, MeshNetworkConfig, MultiClusterConfig,
};
use mesh_values::Value;

use crate::error::{Error, Result};
use crate::gate::VersionProfile;
use crate::hydrator::{field, is_multi_cluster, read_port, seq_field, str_field};
use crate::keys;

/// Read the cluster section back from a settings tree.
///
/// The own-network entry is dropped only if projection synthesized it: the
/// `addedLocalNetwork` marker names the network and the entry still equals
/// the synthesized one. Returns `None` when the tree names no cluster and
/// multicluster is off.
pub fn populate_cluster_config(
    values: &Value,
    profile: &VersionProfile,
) -> Result<Option<ClusterConfig>> {
    let name = values
        .get_str(keys::CLUSTER_NAME)?
        .unwrap_or_default()
        .to_string();
    let network = values.get_str(keys::NETWORK)?.unwrap_or_default().to_string();

    let mut multi_cluster = None;
    let mut mesh_expansion = None;
    if is_multi_cluster(values)? {
        if !profile.multi_cluster {
            return Err(Error::UnsupportedFeature {
                feature: "multicluster".to_string(),
                version: profile.version,
            });
        }

        let mut mesh_networks = read_mesh_networks(values)?;
        if values.get_str(keys::ADDED_LOCAL_NETWORK)? == Some(network.as_str()) {
            let domain = values
                .get_str(keys::CLUSTER_DOMAIN)?
                .filter(|domain| !domain.is_empty())
                .unwrap_or(&profile.default_cluster_domain);
            if mesh_networks.get(&network) == Some(&profile.local_network(&name, domain)) {
                tracing::trace!(network = %network, "Dropping synthesized local mesh network");
                mesh_networks.remove(&network);
            }
        }
        multi_cluster = Some(MultiClusterConfig { mesh_networks });

        let ilb_enabled = keys::gateway_path(&profile.ilb_gateway, "enabled");
        if values.get_bool(&ilb_enabled)? == Some(true) {
            mesh_expansion = Some(MeshExpansionConfig {
                ilb_gateway: Some(GatewayConfig {
                    enabled: Enablement::Enabled,
                }),
            });
        }
    }

    if name.is_empty() && network.is_empty() && multi_cluster.is_none() {
        return Ok(None);
    }
    Ok(Some(ClusterConfig {
        name,
        network,
        multi_cluster,
        mesh_expansion,
    }))
}

fn read_mesh_networks(values: &Value) -> Result<BTreeMap<String, MeshNetworkConfig>> {
    let Some(entries) = values.get_map(keys::MESH_NETWORKS)? else {
        return Ok(BTreeMap::new());
    };
    entries
        .iter()
        .map(|(name, entry)| -> Result<(String, MeshNetworkConfig)> {
            let path = format!("{}.{name}", keys::MESH_NETWORKS);
            Ok((name.clone(), read_network(entry, &path)?))
        })
        .collect()
}

fn read_network(entry: &Value, path: &str) -> Result<MeshNetworkConfig> {
    let endpoints = seq_field(entry, path, "endpoints")?;
    if endpoints.is_empty() {
        return Err(Error::invalid(
            format!("{path}.endpoints"),
            "at least one endpoint is required",
        ));
    }
    let endpoints = endpoints
        .iter()
        .enumerate()
        .map(|(index, endpoint)| -> Result<MeshEndpointConfig> {
            let path = format!("{path}.endpoints[{index}]");
            match str_field(endpoint, &path, "fromRegistry")? {
                Some(registry) if !registry.is_empty() => Ok(MeshEndpointConfig {
                    from_registry: registry.to_string(),
                }),
                _ => Err(Error::invalid(
                    format!("{path}.fromRegistry"),
                    "must not be empty",
                )),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let gateways = seq_field(entry, path, "gateways")?
        .iter()
        .enumerate()
        .map(|(index, gateway)| -> Result<MeshGatewayConfig> {
            let path = format!("{path}.gateways[{index}]");
            let service = match str_field(gateway, &path, "service")? {
                Some(service) if !service.is_empty() => service.to_string(),
                _ => {
                    return Err(Error::invalid(
                        format!("{path}.service"),
                        "must not be empty",
                    ));
                }
            };
            let port = read_port(field(gateway, &path, "port")?, &format!("{path}.port"))?;
            Ok(MeshGatewayConfig { service, port })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(MeshNetworkConfig {
        endpoints,
        gateways,
    })
}
