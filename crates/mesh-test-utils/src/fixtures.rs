//! Cluster conversion fixtures.
//!
//! Each [`ConversionCase`] pairs a spec with two trees:
//!
//! - `isolated`: exactly what cluster projection writes for the spec
//! - `complete`: the rest of an effective tree (proxy and gateway values as
//!   the templates would see them), merged over `isolated` before hydrating
//!
//! The `complete` trees are deliberately partial; only the `cluster` section
//! hydrated from `merge(isolated, complete)` is meaningful.

use mesh_api::ControlPlaneSpec;
use mesh_values::Value;
use serde_json::json;

/// Namespace-templated search suffix, as the templates expect it
pub const NAMESPACE_SUFFIX: &str = r#"{{ valueOrDefault .DeploymentMeta.Namespace "" }}.global"#;

/// One row of the cluster conversion table
#[derive(Debug, Clone)]
pub struct ConversionCase {
    pub name: &'static str,
    pub spec: ControlPlaneSpec,
    pub isolated: Value,
    pub complete: Value,
}

/// Build a settings tree from a JSON literal.
pub fn tree(value: serde_json::Value) -> Value {
    Value::try_from(value).expect("fixture tree must convert")
}

/// Build a spec from its JSON document form.
pub fn spec(value: serde_json::Value) -> ControlPlaneSpec {
    serde_json::from_value(value).expect("fixture spec must deserialize")
}

/// Look up a case by name.
///
/// # Panics
///
/// Panics when no case has that name.
pub fn cluster_case(name: &str) -> ConversionCase {
    cluster_cases()
        .into_iter()
        .find(|case| case.name == name)
        .unwrap_or_else(|| panic!("no conversion case named '{name}'"))
}

/// Every cluster conversion case
pub fn cluster_cases() -> Vec<ConversionCase> {
    let mut cases = Vec::new();

    for (name, version) in [("nil.v1.0", "v1.0"), ("nil.v1.1", "v1.1"), ("nil.v2.0", "v2.0")] {
        cases.push(ConversionCase {
            name,
            spec: spec(json!({"version": version})),
            isolated: tree(json!({
                "global": {
                    "useMCP": true,
                    "multiCluster": {"enabled": false},
                    "meshExpansion": {"enabled": false, "useILB": false}
                }
            })),
            complete: Value::map(),
        });
    }

    for (name, version) in [("simple.v1.1", "v1.1"), ("simple.v2.0", "v2.0")] {
        cases.push(ConversionCase {
            name,
            spec: spec(json!({
                "version": version,
                "cluster": {"name": "my-cluster", "network": "my-network"}
            })),
            isolated: tree(json!({
                "global": {
                    "multiCluster": {"clusterName": "my-cluster", "enabled": false},
                    "meshExpansion": {"enabled": false, "useILB": false},
                    "network": "my-network",
                    "useMCP": true
                }
            })),
            complete: Value::map(),
        });
    }

    for (name, version) in [
        ("multicluster.simple.v1.1", "v1.1"),
        ("multicluster.simple.v2.0", "v2.0"),
    ] {
        cases.push(ConversionCase {
            name,
            spec: multicluster_spec(version, json!({})),
            isolated: MulticlusterValues::default().build(),
            complete: complete_values(&["global", NAMESPACE_SUFFIX]),
        });
    }

    let mut ilb_complete = complete_values(&["global", NAMESPACE_SUFFIX]);
    ilb_complete.remove("global.k8sIngress");
    ilb_complete.remove("gateways.istio-ingressgateway");
    cases.push(ConversionCase {
        name: "multicluster.ilb.v2.0",
        spec: spec(json!({
            "version": "v2.0",
            "cluster": {
                "name": "my-cluster",
                "network": "my-network",
                "multiCluster": {},
                "meshExpansion": {"ilbGateway": {"enabled": true}}
            }
        })),
        isolated: MulticlusterValues {
            overrides: json!({"addedExternal": true, "egressEnabled": null, "enabled": null}),
            use_ilb: true,
            ..Default::default()
        }
        .build(),
        complete: ilb_complete,
    });

    let own_network = json!({
        "endpoints": [{"fromRegistry": "my-cluster"}],
        "gateways": [{"service": "istio-ingressgateway.my-ns.svc.cluster.local", "port": 9443}]
    });
    cases.push(ConversionCase {
        name: "multicluster.meshNetwork.override.v2.0",
        spec: multicluster_spec("v2.0", json!({"my-network": own_network})),
        isolated: MulticlusterValues {
            added_local_network: false,
            mesh_networks: json!({"my-network": own_network}),
            ..Default::default()
        }
        .build(),
        complete: complete_values(&["global", NAMESPACE_SUFFIX]),
    });

    let other_network = json!({
        "endpoints": [{"fromRegistry": "other-cluster"}],
        "gateways": [{"service": "istio-ingressgateway.other-ns.svc.cluster.local", "port": 443}]
    });
    cases.push(ConversionCase {
        name: "multicluster.meshNetwork.additional.v2.0",
        spec: multicluster_spec("v2.0", json!({"other-network": other_network})),
        isolated: MulticlusterValues {
            mesh_networks: json!({
                "my-network": local_network("cluster.local"),
                "other-network": other_network
            }),
            ..Default::default()
        }
        .build(),
        complete: complete_values(&["global", NAMESPACE_SUFFIX]),
    });

    let mut domain_spec = multicluster_spec("v2.0", json!({}));
    domain_spec.proxy = Some(proxy_spec("example.com", &[]));
    let mut domain_complete = complete_values(&["global", NAMESPACE_SUFFIX]);
    domain_complete
        .set("global.proxy.clusterDomain", "example.com")
        .expect("fixture path");
    cases.push(ConversionCase {
        name: "multicluster.clusterDomain.override.v2.0",
        spec: domain_spec,
        isolated: MulticlusterValues {
            mesh_networks: json!({"my-network": local_network("example.com")}),
            ..Default::default()
        }
        .build(),
        complete: domain_complete,
    });

    let suffix_cases: [(&'static str, &[&str], &[&'static str], &[&str]); 5] = [
        (
            "multicluster.searchSuffix.global.v2.0",
            &["global"],
            &[NAMESPACE_SUFFIX],
            &["global", NAMESPACE_SUFFIX],
        ),
        (
            "multicluster.searchSuffix.namespace.v2.0",
            &[NAMESPACE_SUFFIX],
            &["global"],
            &["global", NAMESPACE_SUFFIX],
        ),
        (
            "multicluster.searchSuffix.all.v2.0",
            &["global", NAMESPACE_SUFFIX],
            &[],
            &["global", NAMESPACE_SUFFIX],
        ),
        (
            "multicluster.searchSuffix.custom.v2.0",
            &["custom"],
            &[NAMESPACE_SUFFIX, "global"],
            &["global", NAMESPACE_SUFFIX, "custom"],
        ),
        (
            "multicluster.searchSuffix.custom.insert.v2.0",
            &["custom", "global"],
            &[NAMESPACE_SUFFIX],
            &["custom", "global", NAMESPACE_SUFFIX],
        ),
    ];
    for (name, configured, added, pod_dns) in suffix_cases {
        let mut case_spec = multicluster_spec("v2.0", json!({}));
        case_spec.proxy = Some(proxy_spec("", configured));
        cases.push(ConversionCase {
            name,
            spec: case_spec,
            isolated: MulticlusterValues {
                added_search_suffixes: added.to_vec(),
                ..Default::default()
            }
            .build(),
            complete: complete_values(pod_dns),
        });
    }

    let mut unconfigured = multicluster_spec("v2.0", json!({}));
    unconfigured.gateways = Some(Default::default());
    cases.push(ConversionCase {
        name: "multicluster.gateways.egress.unconfigured.v2.0",
        spec: unconfigured,
        isolated: MulticlusterValues::default().build(),
        complete: complete_values(&["global", NAMESPACE_SUFFIX]),
    });

    cases.push(ConversionCase {
        name: "multicluster.gateways.egress.enabled.v2.0",
        spec: multicluster_gateways_spec(json!({"clusterEgress": {"enabled": true}})),
        isolated: MulticlusterValues {
            overrides: json!({
                "addedExternal": true,
                "enabled": null,
                "ingressEnabled": null,
                "k8sIngressEnabled": null
            }),
            ..Default::default()
        }
        .build(),
        complete: complete_values(&["global", NAMESPACE_SUFFIX]),
    });

    cases.push(ConversionCase {
        name: "multicluster.gateways.egress.configured.v2.0",
        spec: multicluster_gateways_spec(json!({
            "clusterEgress": {"enabled": true, "requestedNetworkView": ["external"]}
        })),
        isolated: MulticlusterValues {
            overrides: json!({"enabled": null, "ingressEnabled": null, "k8sIngressEnabled": null}),
            ..Default::default()
        }
        .build(),
        complete: complete_values(&["global", NAMESPACE_SUFFIX]),
    });

    cases.push(ConversionCase {
        name: "multicluster.ingress.http.v2.0",
        spec: multicluster_spec("v2.0", json!({})),
        isolated: MulticlusterValues::default().build(),
        complete: complete_values(&["global", NAMESPACE_SUFFIX]),
    });

    let mut https_complete = complete_values(&["global", NAMESPACE_SUFFIX]);
    https_complete
        .set("global.k8sIngress.enableHttps", true)
        .expect("fixture path");
    https_complete
        .set(
            "gateways.istio-ingressgateway.ports",
            tree(json!([{"name": "https", "port": 443, "targetPort": 8443}])),
        )
        .expect("fixture path");
    cases.push(ConversionCase {
        name: "multicluster.ingress.https.v2.0",
        spec: multicluster_gateways_spec(json!({
            "clusterIngress": {
                "enabled": true,
                "service": {"ports": [{"name": "https", "port": 443, "targetPort": 8443}]},
                "ingressEnabled": true
            }
        })),
        isolated: MulticlusterValues {
            overrides: json!({"addedExternal": true, "egressEnabled": null, "enabled": null}),
            ..Default::default()
        }
        .build(),
        complete: https_complete,
    });

    cases
}

/// The synthesized own-network entry for `my-cluster`
pub fn local_network(domain: &str) -> serde_json::Value {
    json!({
        "endpoints": [{"fromRegistry": "my-cluster"}],
        "gateways": [{"port": 443, "service": format!("istio-ingressgateway..svc.{domain}")}]
    })
}

fn multicluster_spec(version: &str, mesh_networks: serde_json::Value) -> ControlPlaneSpec {
    spec(json!({
        "version": version,
        "cluster": {
            "name": "my-cluster",
            "network": "my-network",
            "multiCluster": {"meshNetworks": mesh_networks}
        }
    }))
}

fn multicluster_gateways_spec(gateways: serde_json::Value) -> ControlPlaneSpec {
    let mut case_spec = multicluster_spec("v2.0", json!({}));
    case_spec.gateways = Some(serde_json::from_value(gateways).expect("fixture gateways"));
    case_spec
}

fn proxy_spec(cluster_domain: &str, search_suffixes: &[&str]) -> mesh_api::ProxyConfig {
    serde_json::from_value(json!({
        "networking": {
            "clusterDomain": cluster_domain,
            "dns": {"searchSuffixes": search_suffixes}
        }
    }))
    .expect("fixture proxy")
}

/// Cluster values of a multicluster `my-cluster` on `my-network`
struct MulticlusterValues {
    added_local_network: bool,
    added_search_suffixes: Vec<&'static str>,
    overrides: serde_json::Value,
    mesh_networks: serde_json::Value,
    use_ilb: bool,
}

impl Default for MulticlusterValues {
    fn default() -> Self {
        Self {
            added_local_network: true,
            added_search_suffixes: vec![NAMESPACE_SUFFIX, "global"],
            overrides: json!({
                "addedExternal": true,
                "egressEnabled": null,
                "enabled": null,
                "ingressEnabled": null,
                "k8sIngressEnabled": null
            }),
            mesh_networks: json!({"my-network": local_network("cluster.local")}),
            use_ilb: false,
        }
    }
}

impl MulticlusterValues {
    fn build(self) -> Value {
        let mut values = tree(json!({
            "global": {
                "multiCluster": {
                    "clusterName": "my-cluster",
                    "enabled": true,
                    "gatewaysOverrides": self.overrides
                },
                "meshExpansion": {"enabled": true, "useILB": self.use_ilb},
                "meshNetworks": self.mesh_networks,
                "network": "my-network",
                "useMCP": true
            },
            "gateways": {"istio-ilbgateway": {"enabled": self.use_ilb}}
        }));
        if self.added_local_network {
            values
                .set("global.multiCluster.addedLocalNetwork", "my-network")
                .expect("fixture path");
        }
        if !self.added_search_suffixes.is_empty() {
            values
                .set(
                    "global.multiCluster.addedSearchSuffixes",
                    Value::seq(self.added_search_suffixes),
                )
                .expect("fixture path");
        }
        values
    }
}

/// Gateway and proxy values of a multicluster mesh with every gateway forced on
fn complete_values(pod_dns: &[&str]) -> Value {
    tree(json!({
        "global": {
            "podDNSSearchNamespaces": pod_dns,
            "k8sIngress": {"enabled": true, "enableHttps": false, "gatewayName": "ingressgateway"}
        },
        "gateways": {
            "enabled": true,
            "istio-egressgateway": {
                "enabled": true,
                "env": {"ISTIO_META_REQUESTED_NETWORK_VIEW": "external"},
                "name": "istio-egressgateway"
            },
            "istio-ingressgateway": {"enabled": true, "name": "istio-ingressgateway"}
        }
    }))
}
