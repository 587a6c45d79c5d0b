//! Deserialization of user-authored control plane documents

use mesh_api::{
    ClusterConfig, ControlPlaneSpec, Enablement, MeshEndpointConfig, MeshGatewayConfig,
    MeshNetworkConfig, Version,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

const MULTICLUSTER_DOC: &str = r#"
version: v2.0
cluster:
  name: my-cluster
  network: my-network
  multiCluster:
    meshNetworks:
      my-network:
        endpoints:
          - fromRegistry: my-cluster
        gateways:
          - service: istio-ingressgateway.my-ns.svc.cluster.local
            port: 9443
proxy:
  networking:
    clusterDomain: example.com
    dns:
      searchSuffixes: [custom, global]
gateways:
  clusterEgress:
    enabled: true
    requestedNetworkView: [external]
  clusterIngress:
    enabled: null
    ingressEnabled: false
    service:
      ports:
        - name: https
          port: 443
          targetPort: 8443
"#;

#[test]
fn parses_full_document() {
    let spec: ControlPlaneSpec = serde_yaml::from_str(MULTICLUSTER_DOC).unwrap();
    assert_eq!(spec.version.parse::<Version>().unwrap(), Version::V2_0);

    let cluster = spec.cluster.as_ref().unwrap();
    let networks = &cluster.multi_cluster.as_ref().unwrap().mesh_networks;
    assert_eq!(
        networks["my-network"],
        MeshNetworkConfig {
            endpoints: vec![MeshEndpointConfig {
                from_registry: "my-cluster".into(),
            }],
            gateways: vec![MeshGatewayConfig {
                service: "istio-ingressgateway.my-ns.svc.cluster.local".into(),
                port: 9443,
            }],
        }
    );
    assert_eq!(spec.cluster_domain(), Some("example.com"));
    assert_eq!(spec.search_suffixes(), ["custom", "global"]);

    let gateways = spec.gateways.as_ref().unwrap();
    let egress = gateways.cluster_egress.as_ref().unwrap();
    assert_eq!(egress.enabled, Enablement::Enabled);
    assert_eq!(egress.requested_network_view, vec!["external".to_string()]);

    let ingress = gateways.cluster_ingress.as_ref().unwrap();
    assert_eq!(ingress.enabled, Enablement::Unset);
    assert_eq!(ingress.ingress_enabled, Enablement::Disabled);
    assert_eq!(ingress.service.ports[0].target_port, Some(8443));
}

#[test]
fn serialization_round_trips() {
    let spec: ControlPlaneSpec = serde_yaml::from_str(MULTICLUSTER_DOC).unwrap();
    let rendered = serde_yaml::to_string(&spec).unwrap();
    let reparsed: ControlPlaneSpec = serde_yaml::from_str(&rendered).unwrap();
    assert_eq!(reparsed, spec);
}

#[rstest]
#[case::absent("version: v2.0\ncluster: {}\n", false)]
#[case::empty_section("version: v2.0\ncluster:\n  multiCluster: {}\n", true)]
fn empty_multicluster_section_still_enables(#[case] doc: &str, #[case] expected: bool) {
    let spec: ControlPlaneSpec = serde_yaml::from_str(doc).unwrap();
    assert_eq!(spec.is_multi_cluster(), expected);
}

#[test]
fn unset_flags_are_not_serialized() {
    let spec = ControlPlaneSpec {
        version: "v1.1".into(),
        cluster: Some(ClusterConfig {
            name: "c".into(),
            ..Default::default()
        }),
        ..Default::default()
    };
    assert_eq!(
        serde_json::to_value(&spec).unwrap(),
        serde_json::json!({"version": "v1.1", "cluster": {"name": "c"}})
    );
}

#[test]
fn explicit_null_flag_is_unset_not_disabled() {
    let spec: ControlPlaneSpec =
        serde_yaml::from_str("gateways:\n  enabled: ~\n  clusterEgress:\n    enabled: false\n")
            .unwrap();
    let gateways = spec.gateways.unwrap();
    assert_eq!(gateways.enabled, Enablement::Unset);
    assert_eq!(
        gateways.cluster_egress.unwrap().enabled,
        Enablement::Disabled
    );
}
