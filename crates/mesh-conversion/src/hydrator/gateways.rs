use mesh_api::{
    ClusterIngressGatewayConfig, EgressGatewayConfig, Enablement, GatewayServiceConfig,
    GatewaysConfig, ServicePort,
};
use mesh_values::{Kind, Mapping, Value};

use crate::error::Result;
use crate::gate::VersionProfile;
use crate::hydrator::{field, is_multi_cluster, read_port, str_field};
use crate::keys::{self, overrides};

/// Read the gateways section back from a settings tree.
///
/// Under multicluster the gateways forced on by projection are restored from
/// `gatewaysOverrides`: a missing key means the user enabled the gateway,
/// `null` means unset. Everything else is read directly.
pub fn populate_gateway_config(
    values: &Value,
    profile: &VersionProfile,
) -> Result<Option<GatewaysConfig>> {
    let egress_path = keys::gateway_path(&profile.egress_gateway, "enabled");
    let ingress_path = keys::gateway_path(&profile.ingress_gateway, "enabled");
    let mut view = network_view(values, profile)?;

    let enabled;
    let egress_enabled;
    let ingress_enabled;
    let k8s_ingress_enabled;
    if is_multi_cluster(values)? {
        let recorded = values.get_map(keys::GATEWAYS_OVERRIDES)?;
        enabled = restore(recorded, overrides::ENABLED)?;
        egress_enabled = restore(recorded, overrides::EGRESS_ENABLED)?;
        if values.get_bool(keys::USE_ILB)?.unwrap_or(false) {
            ingress_enabled = read_flag(values, &ingress_path)?;
            k8s_ingress_enabled = read_flag(values, keys::K8S_INGRESS_ENABLED)?;
        } else {
            ingress_enabled = restore(recorded, overrides::INGRESS_ENABLED)?;
            k8s_ingress_enabled = restore(recorded, overrides::K8S_INGRESS_ENABLED)?;
        }
        if added_external(recorded)? {
            if let Some(index) = view
                .iter()
                .rposition(|entry| *entry == profile.external_network_view)
            {
                view.remove(index);
            }
        }
    } else {
        enabled = read_flag(values, keys::GATEWAYS_ENABLED)?;
        egress_enabled = read_flag(values, &egress_path)?;
        ingress_enabled = read_flag(values, &ingress_path)?;
        k8s_ingress_enabled = read_flag(values, keys::K8S_INGRESS_ENABLED)?;
    }
    let ports = ingress_ports(values, profile)?;

    let cluster_egress = (egress_enabled.is_set() || !view.is_empty()).then(|| {
        EgressGatewayConfig {
            enabled: egress_enabled,
            requested_network_view: view,
        }
    });
    let cluster_ingress = (ingress_enabled.is_set()
        || k8s_ingress_enabled.is_set()
        || !ports.is_empty())
    .then(|| ClusterIngressGatewayConfig {
        enabled: ingress_enabled,
        service: GatewayServiceConfig { ports },
        ingress_enabled: k8s_ingress_enabled,
    });

    if enabled.is_unset() && cluster_egress.is_none() && cluster_ingress.is_none() {
        return Ok(None);
    }
    Ok(Some(GatewaysConfig {
        enabled,
        cluster_egress,
        cluster_ingress,
    }))
}

fn read_flag(values: &Value, path: &str) -> Result<Enablement> {
    Ok(values.get_bool(path)?.into())
}

fn restore(recorded: Option<&Mapping>, key: &str) -> Result<Enablement> {
    match recorded.and_then(|recorded| recorded.get(key)) {
        None => Ok(Enablement::Enabled),
        Some(Value::Null) => Ok(Enablement::Unset),
        Some(Value::Bool(enabled)) => Ok((*enabled).into()),
        Some(other) => Err(mesh_values::Error::mismatch(
            format!("{}.{key}", keys::GATEWAYS_OVERRIDES),
            Kind::Bool,
            other.kind(),
        )
        .into()),
    }
}

fn added_external(recorded: Option<&Mapping>) -> Result<bool> {
    match recorded.and_then(|recorded| recorded.get(overrides::ADDED_EXTERNAL)) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(added)) => Ok(*added),
        Some(other) => Err(mesh_values::Error::mismatch(
            format!("{}.{}", keys::GATEWAYS_OVERRIDES, overrides::ADDED_EXTERNAL),
            Kind::Bool,
            other.kind(),
        )
        .into()),
    }
}

fn network_view(values: &Value, profile: &VersionProfile) -> Result<Vec<String>> {
    let path = keys::gateway_path(&profile.egress_gateway, keys::REQUESTED_NETWORK_VIEW_ENV);
    Ok(values
        .get_str(&path)?
        .map(|joined| {
            joined
                .split(',')
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default())
}

fn ingress_ports(values: &Value, profile: &VersionProfile) -> Result<Vec<ServicePort>> {
    let path = keys::gateway_path(&profile.ingress_gateway, "ports");
    let Some(ports) = values.get_seq(&path)? else {
        return Ok(Vec::new());
    };
    ports
        .iter()
        .enumerate()
        .map(|(index, port)| -> Result<ServicePort> {
            let path = format!("{path}[{index}]");
            let name = str_field(port, &path, "name")?.unwrap_or_default().to_string();
            let number = read_port(field(port, &path, "port")?, &format!("{path}.port"))?;
            let target_port = field(port, &path, "targetPort")?
                .map(|target| read_port(Some(target), &format!("{path}.targetPort")))
                .transpose()?;
            Ok(ServicePort {
                name,
                port: number,
                target_port,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_api::Version;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn hydrate(value: serde_json::Value) -> Option<GatewaysConfig> {
        let values = Value::try_from(value).unwrap();
        populate_gateway_config(&values, &VersionProfile::new(Version::V2_0)).unwrap()
    }

    #[test]
    fn test_nothing_configured() {
        assert_eq!(hydrate(json!({"gateways": {"istio-egressgateway": {"name": "x"}}})), None);
    }

    #[test]
    fn test_direct_reads_without_multicluster() {
        let gateways = hydrate(json!({
            "global": {"k8sIngress": {"enabled": false}},
            "gateways": {
                "enabled": true,
                "istio-egressgateway": {"env": {"ISTIO_META_REQUESTED_NETWORK_VIEW": "a,b"}}
            }
        }))
        .unwrap();
        assert_eq!(
            gateways,
            GatewaysConfig {
                enabled: Enablement::Enabled,
                cluster_egress: Some(EgressGatewayConfig {
                    enabled: Enablement::Unset,
                    requested_network_view: vec!["a".into(), "b".into()],
                }),
                cluster_ingress: Some(ClusterIngressGatewayConfig {
                    ingress_enabled: Enablement::Disabled,
                    ..Default::default()
                }),
            }
        );
    }

    #[test]
    fn test_forced_values_restored_from_overrides() {
        let gateways = hydrate(json!({
            "global": {
                "multiCluster": {
                    "enabled": true,
                    "gatewaysOverrides": {
                        "enabled": null,
                        "egressEnabled": false,
                        "ingressEnabled": null,
                        "k8sIngressEnabled": null,
                        "addedExternal": true
                    }
                },
                "k8sIngress": {"enabled": true}
            },
            "gateways": {
                "enabled": true,
                "istio-egressgateway": {
                    "enabled": true,
                    "env": {"ISTIO_META_REQUESTED_NETWORK_VIEW": "external"}
                },
                "istio-ingressgateway": {"enabled": true}
            }
        }))
        .unwrap();
        assert_eq!(
            gateways,
            GatewaysConfig {
                cluster_egress: Some(EgressGatewayConfig {
                    enabled: Enablement::Disabled,
                    requested_network_view: vec![],
                }),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_missing_override_means_enabled() {
        let gateways = hydrate(json!({
            "global": {"multiCluster": {"enabled": true}},
            "gateways": {"istio-egressgateway": {
                "env": {"ISTIO_META_REQUESTED_NETWORK_VIEW": "external"}
            }}
        }))
        .unwrap();
        assert_eq!(gateways.enabled, Enablement::Enabled);
        let egress = gateways.cluster_egress.unwrap();
        assert_eq!(egress.enabled, Enablement::Enabled);
        assert_eq!(egress.requested_network_view, vec!["external".to_string()]);
        let ingress = gateways.cluster_ingress.unwrap();
        assert_eq!(ingress.enabled, Enablement::Enabled);
        assert_eq!(ingress.ingress_enabled, Enablement::Enabled);
    }

    #[test]
    fn test_ilb_reads_ingress_directly() {
        let gateways = hydrate(json!({
            "global": {
                "meshExpansion": {"useILB": true},
                "multiCluster": {
                    "enabled": true,
                    "gatewaysOverrides": {"enabled": null, "egressEnabled": null, "addedExternal": true}
                }
            },
            "gateways": {"istio-ingressgateway": {"enabled": false}}
        }))
        .unwrap();
        assert_eq!(
            gateways,
            GatewaysConfig {
                cluster_ingress: Some(ClusterIngressGatewayConfig {
                    enabled: Enablement::Disabled,
                    ..Default::default()
                }),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_ports() {
        let gateways = hydrate(json!({"gateways": {"istio-ingressgateway": {"ports": [
            {"name": "https", "port": 443, "targetPort": 8443},
            {"port": "80"}
        ]}}}))
        .unwrap();
        assert_eq!(
            gateways.cluster_ingress.unwrap().service.ports,
            vec![
                ServicePort {
                    name: "https".into(),
                    port: 443,
                    target_port: Some(8443),
                },
                ServicePort {
                    name: String::new(),
                    port: 80,
                    target_port: None,
                },
            ]
        );
    }

    #[test]
    fn test_malformed_override() {
        let values = Value::try_from(json!({"global": {"multiCluster": {
            "enabled": true,
            "gatewaysOverrides": {"egressEnabled": "no"}
        }}}))
        .unwrap();
        let err = populate_gateway_config(&values, &VersionProfile::new(Version::V2_0)).unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"Type mismatch at 'global.multiCluster.gatewaysOverrides.egressEnabled': expected bool, found string"
        );
    }
}
