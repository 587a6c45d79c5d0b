use mesh_api::{
    ClusterIngressGatewayConfig, ControlPlaneSpec, EgressGatewayConfig, Enablement, ServicePort,
};
use mesh_values::{Mapping, Value};

use crate::error::{Error, Result};
use crate::gate::VersionProfile;
use crate::keys::{self, overrides};
use crate::projector::uses_ilb;

/// Write the gateway settings of `spec`.
///
/// Multicluster needs the gateways enabled, so they are forced on and the
/// user's own settings are recorded in `gatewaysOverrides` by
/// [`populate_cluster_values`](crate::projector::populate_cluster_values).
/// Without multicluster only values the user set explicitly are written.
pub fn populate_gateway_values(
    spec: &ControlPlaneSpec,
    profile: &VersionProfile,
    values: &mut Value,
) -> Result<()> {
    let gateways = spec.gateways.as_ref();
    let egress = gateways.and_then(|gateways| gateways.cluster_egress.as_ref());
    let ingress = gateways.and_then(|gateways| gateways.cluster_ingress.as_ref());

    let egress_enabled = keys::gateway_path(&profile.egress_gateway, "enabled");
    let ingress_enabled = keys::gateway_path(&profile.ingress_gateway, "enabled");
    let mut view = network_view(egress)?;

    if spec.is_multi_cluster() {
        values.set(keys::GATEWAYS_ENABLED, true)?;
        values.set(&egress_enabled, true)?;
        if !view.contains(&profile.external_network_view) {
            view.push(profile.external_network_view.clone());
        }
        if uses_ilb(spec) {
            set_flag(values, &ingress_enabled, ingress_flag(ingress))?;
            set_flag(values, keys::K8S_INGRESS_ENABLED, k8s_ingress_flag(ingress))?;
        } else {
            values.set(&ingress_enabled, true)?;
            values.set(keys::K8S_INGRESS_ENABLED, true)?;
        }
    } else {
        let enabled = gateways.map(|gateways| gateways.enabled).unwrap_or_default();
        set_flag(values, keys::GATEWAYS_ENABLED, enabled)?;
        set_flag(values, &egress_enabled, egress_flag(egress))?;
        set_flag(values, &ingress_enabled, ingress_flag(ingress))?;
        set_flag(values, keys::K8S_INGRESS_ENABLED, k8s_ingress_flag(ingress))?;
    }

    if !view.is_empty() {
        values.set(
            &keys::gateway_path(&profile.egress_gateway, keys::REQUESTED_NETWORK_VIEW_ENV),
            view.join(","),
        )?;
    }

    let ports = ingress
        .map(|ingress| ingress.service.ports.as_slice())
        .unwrap_or_default();
    if !ports.is_empty() {
        let ports = ports
            .iter()
            .enumerate()
            .map(|(index, port)| port_value(index, port))
            .collect::<Result<Vec<_>>>()?;
        values.set(
            &keys::gateway_path(&profile.ingress_gateway, "ports"),
            Value::Seq(ports),
        )?;
    }
    if ingress.is_some_and(|ingress| ingress.service.ports.iter().any(ServicePort::is_https)) {
        values.set(keys::K8S_INGRESS_HTTPS, true)?;
    }
    Ok(())
}

/// The `gatewaysOverrides` entries for a multicluster spec.
///
/// Each gateway multicluster forces on gets an entry recording the user's
/// setting: `null` when unset, `false` when disabled. An explicitly enabled
/// gateway needs no entry. Ingress entries are left out when the ILB gateway
/// carries east-west traffic.
pub(crate) fn multicluster_overrides(spec: &ControlPlaneSpec, profile: &VersionProfile) -> Mapping {
    let gateways = spec.gateways.as_ref();
    let egress = gateways.and_then(|gateways| gateways.cluster_egress.as_ref());
    let ingress = gateways.and_then(|gateways| gateways.cluster_ingress.as_ref());

    let mut recorded = Mapping::new();
    record(
        &mut recorded,
        overrides::ENABLED,
        gateways.map(|gateways| gateways.enabled).unwrap_or_default(),
    );
    record(&mut recorded, overrides::EGRESS_ENABLED, egress_flag(egress));
    if !uses_ilb(spec) {
        record(&mut recorded, overrides::INGRESS_ENABLED, ingress_flag(ingress));
        record(
            &mut recorded,
            overrides::K8S_INGRESS_ENABLED,
            k8s_ingress_flag(ingress),
        );
    }

    let has_external = egress.is_some_and(|egress| {
        egress
            .requested_network_view
            .contains(&profile.external_network_view)
    });
    if !has_external {
        recorded.insert(overrides::ADDED_EXTERNAL.to_string(), Value::Bool(true));
    }
    recorded
}

fn record(recorded: &mut Mapping, key: &str, flag: Enablement) {
    match flag {
        Enablement::Enabled => {}
        Enablement::Unset => {
            recorded.insert(key.to_string(), Value::Null);
        }
        Enablement::Disabled => {
            recorded.insert(key.to_string(), Value::Bool(false));
        }
    }
}

fn set_flag(values: &mut Value, path: &str, flag: Enablement) -> Result<()> {
    if let Some(enabled) = flag.as_option() {
        values.set(path, enabled)?;
    }
    Ok(())
}

fn egress_flag(egress: Option<&EgressGatewayConfig>) -> Enablement {
    egress.map(|egress| egress.enabled).unwrap_or_default()
}

fn ingress_flag(ingress: Option<&ClusterIngressGatewayConfig>) -> Enablement {
    ingress.map(|ingress| ingress.enabled).unwrap_or_default()
}

fn k8s_ingress_flag(ingress: Option<&ClusterIngressGatewayConfig>) -> Enablement {
    ingress
        .map(|ingress| ingress.ingress_enabled)
        .unwrap_or_default()
}

/// The egress network view, checked so it survives the comma-joined encoding
fn network_view(egress: Option<&EgressGatewayConfig>) -> Result<Vec<String>> {
    let view = egress
        .map(|egress| egress.requested_network_view.clone())
        .unwrap_or_default();
    for (index, entry) in view.iter().enumerate() {
        if entry.is_empty() || entry.contains(',') {
            return Err(Error::invalid(
                format!("gateways.clusterEgress.requestedNetworkView[{index}]"),
                "network names must be non-empty and must not contain ','",
            ));
        }
    }
    Ok(view)
}

fn port_value(index: usize, port: &ServicePort) -> Result<Value> {
    let path = format!("gateways.clusterIngress.service.ports[{index}]");
    if !(1..=65535).contains(&port.port) {
        return Err(Error::invalid(
            format!("{path}.port"),
            format!("{} is not a valid port", port.port),
        ));
    }
    if let Some(target) = port.target_port.filter(|target| !(1..=65535).contains(target)) {
        return Err(Error::invalid(
            format!("{path}.targetPort"),
            format!("{target} is not a valid port"),
        ));
    }

    let mut entry = Mapping::new();
    if !port.name.is_empty() {
        entry.insert("name".to_string(), Value::from(&port.name));
    }
    entry.insert("port".to_string(), Value::from(port.port));
    if let Some(target) = port.target_port {
        entry.insert("targetPort".to_string(), Value::from(target));
    }
    Ok(Value::Map(entry))
}
