//! Round-trip tests: hydrating `merge(baseline, project(spec))` gives back
//! the canonical form of the spec, for every supported version.

use mesh_api::{
    ClusterConfig, ClusterIngressGatewayConfig, ControlPlaneSpec, EgressGatewayConfig,
    Enablement, GatewayConfig, GatewayServiceConfig, GatewaysConfig, MeshEndpointConfig,
    MeshExpansionConfig, MeshGatewayConfig, MeshNetworkConfig, MultiClusterConfig, ProxyConfig,
    ServicePort, Version,
};
use mesh_conversion::{Converter, Error, StaticBaselines, VersionGate, canonicalize};
use mesh_test_utils::fixtures::NAMESPACE_SUFFIX;
use mesh_test_utils::{cluster_cases, logging};
use mesh_values::Value;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// ==========================================================================
// Fixture specs
// ==========================================================================

#[test]
fn test_fixture_specs_round_trip_on_every_version() {
    logging::init();
    let converter = Converter::builtin();

    for case in cluster_cases() {
        for version in Version::ALL {
            let mut spec = case.spec.clone();
            spec.version = version.to_string();
            let profile = converter.gate().profile(version).unwrap();
            if spec.is_multi_cluster() && !profile.multi_cluster {
                continue;
            }

            let hydrated = converter
                .verify_round_trip(&spec)
                .unwrap_or_else(|err| panic!("{} on {version}: {err}", case.name));
            assert_eq!(hydrated, canonicalize(&spec, profile), "{} on {version}", case.name);
            assert_eq!(hydrated.cluster, spec.cluster, "{} on {version}", case.name);
        }
    }
}

#[test]
fn test_multicluster_fixtures_rejected_on_v1_0() {
    let converter = Converter::builtin();
    for case in cluster_cases()
        .into_iter()
        .filter(|case| case.spec.is_multi_cluster())
    {
        let mut spec = case.spec;
        spec.version = Version::V1_0.to_string();
        assert!(
            matches!(
                converter.round_trip(&spec),
                Err(Error::UnsupportedFeature {
                    version: Version::V1_0,
                    ..
                })
            ),
            "{} should be rejected on v1.0",
            case.name
        );
    }
}

#[test]
fn test_empty_gateways_canonicalize_to_absent() {
    let converter = Converter::builtin();
    let mut spec = mesh_test_utils::cluster_case("multicluster.gateways.egress.unconfigured.v2.0").spec;
    assert!(spec.gateways.is_some());

    let hydrated = converter.verify_round_trip(&spec).unwrap();
    assert_eq!(hydrated.gateways, None);
    spec.gateways = None;
    assert_eq!(hydrated, spec);
}

#[test]
fn test_mismatch_report_names_the_differing_paths() {
    let mut baseline = Value::map();
    baseline.set("global.network", "baseline-network").unwrap();
    let converter = Converter::new(
        VersionGate::with_builtins(),
        StaticBaselines::new().with(Version::V2_0, baseline),
    );

    let err = converter
        .verify_round_trip(&ControlPlaneSpec::new("v2.0"))
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"
    Round trip mismatch for control plane v2.0:
    + cluster: {"network":"baseline-network"}
    "#);
}

// ==========================================================================
// Generated specs
// ==========================================================================

fn arb_enablement() -> impl Strategy<Value = Enablement> {
    prop_oneof![
        Just(Enablement::Unset),
        Just(Enablement::Enabled),
        Just(Enablement::Disabled),
    ]
}

fn arb_port() -> impl Strategy<Value = i64> {
    1i64..=65535
}

fn arb_mesh_network() -> impl Strategy<Value = MeshNetworkConfig> {
    (
        prop::collection::vec("[a-z]{1,6}", 1..3),
        prop::collection::vec(("[a-z][a-z.-]{0,12}", arb_port()), 0..3),
    )
        .prop_map(|(registries, gateways)| MeshNetworkConfig {
            endpoints: registries
                .into_iter()
                .map(|from_registry| MeshEndpointConfig { from_registry })
                .collect(),
            gateways: gateways
                .into_iter()
                .map(|(service, port)| MeshGatewayConfig { service, port })
                .collect(),
        })
}

fn arb_cluster(multi_cluster_allowed: bool) -> impl Strategy<Value = Option<ClusterConfig>> {
    let multi_cluster = prop::option::of(
        prop::collection::btree_map("[a-z]{1,6}(-net)?", arb_mesh_network(), 0..3)
            .prop_map(|mesh_networks| MultiClusterConfig { mesh_networks }),
    );
    let mesh_expansion = prop::option::of(
        prop::option::of(arb_enablement().prop_map(|enabled| GatewayConfig { enabled }))
            .prop_map(|ilb_gateway| MeshExpansionConfig { ilb_gateway }),
    );
    prop::option::of(
        ("[a-z]{0,6}", "[a-z]{0,6}(-net)?", multi_cluster, mesh_expansion).prop_map(
            move |(name, network, multi_cluster, mesh_expansion)| {
                let multi_cluster = multi_cluster
                    .filter(|_| multi_cluster_allowed && !name.is_empty() && !network.is_empty());
                ClusterConfig {
                    name,
                    network,
                    multi_cluster,
                    mesh_expansion,
                }
            },
        ),
    )
}

fn arb_proxy() -> impl Strategy<Value = Option<ProxyConfig>> {
    let domain = prop_oneof![
        Just(String::new()),
        Just("cluster.local".to_string()),
        "[a-z]{1,6}\\.(com|local)",
    ];
    let suffix = prop_oneof![
        Just("global".to_string()),
        Just(NAMESPACE_SUFFIX.to_string()),
        "[a-z]{1,6}(\\.svc)?",
    ];
    prop::option::of((domain, prop::collection::vec(suffix, 0..4)).prop_map(
        |(cluster_domain, search_suffixes)| {
            let mut proxy = ProxyConfig::default();
            proxy.networking.cluster_domain = cluster_domain;
            proxy.networking.dns.search_suffixes = search_suffixes;
            proxy
        },
    ))
}

fn arb_service_port() -> impl Strategy<Value = ServicePort> {
    (
        prop_oneof![Just(String::new()), Just("http".to_string()), Just("https".to_string())],
        arb_port(),
        prop::option::of(arb_port()),
    )
        .prop_map(|(name, port, target_port)| ServicePort {
            name,
            port,
            target_port,
        })
}

fn arb_gateways() -> impl Strategy<Value = Option<GatewaysConfig>> {
    let view_entry = prop_oneof![Just("external".to_string()), "[a-z]{1,6}(-net)?"];
    let egress = prop::option::of(
        (arb_enablement(), prop::collection::vec(view_entry, 0..3)).prop_map(
            |(enabled, requested_network_view)| EgressGatewayConfig {
                enabled,
                requested_network_view,
            },
        ),
    );
    let ingress = prop::option::of(
        (
            arb_enablement(),
            arb_enablement(),
            prop::collection::vec(arb_service_port(), 0..3),
        )
            .prop_map(|(enabled, ingress_enabled, ports)| ClusterIngressGatewayConfig {
                enabled,
                service: GatewayServiceConfig { ports },
                ingress_enabled,
            }),
    );
    prop::option::of((arb_enablement(), egress, ingress).prop_map(
        |(enabled, cluster_egress, cluster_ingress)| GatewaysConfig {
            enabled,
            cluster_egress,
            cluster_ingress,
        },
    ))
}

fn arb_spec() -> impl Strategy<Value = ControlPlaneSpec> {
    prop_oneof![
        Just(Version::V1_0),
        Just(Version::V1_1),
        Just(Version::V2_0)
    ]
    .prop_flat_map(|version| {
        (
            arb_cluster(version != Version::V1_0),
            arb_proxy(),
            arb_gateways(),
        )
            .prop_map(move |(cluster, proxy, gateways)| ControlPlaneSpec {
                version: version.to_string(),
                cluster,
                proxy,
                gateways,
            })
    })
}

proptest! {
    #[test]
    fn generated_specs_round_trip(spec in arb_spec()) {
        let converter = Converter::builtin();
        let profile = converter.profile_for(&spec).unwrap();
        let hydrated = converter.round_trip(&spec).unwrap();
        prop_assert_eq!(hydrated, canonicalize(&spec, profile));
    }

    #[test]
    fn canonical_form_is_a_fixed_point(spec in arb_spec()) {
        let converter = Converter::builtin();
        let profile = converter.profile_for(&spec).unwrap();
        let canonical = canonicalize(&spec, profile);
        prop_assert_eq!(canonicalize(&canonical, profile), canonical.clone());
        prop_assert_eq!(converter.round_trip(&canonical).unwrap(), canonical);
    }

    #[test]
    fn projection_is_deterministic(spec in arb_spec()) {
        let converter = Converter::builtin();
        prop_assert_eq!(converter.project(&spec).unwrap(), converter.project(&spec).unwrap());
    }
}
