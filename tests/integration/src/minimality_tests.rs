//! The projected delta never repeats a value its baseline already supplies.

use mesh_api::Version;
use mesh_conversion::{BaselineProvider, BuiltinBaselines, Converter};
use mesh_test_utils::{cluster_cases, spec};
use mesh_values::Value;
use serde_json::json;

/// Paths of delta leaves whose value equals the baseline leaf at the same path
fn redundant_leaves(delta: &Value, baseline: Option<&Value>, path: &str, found: &mut Vec<String>) {
    match delta {
        Value::Map(entries) if !entries.is_empty() => {
            for (key, value) in entries {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                let base = baseline
                    .and_then(Value::as_map)
                    .and_then(|base| base.get(key));
                redundant_leaves(value, base, &child, found);
            }
        }
        leaf => {
            if baseline == Some(leaf) {
                found.push(path.to_string());
            }
        }
    }
}

#[test]
fn test_builtin_deltas_are_minimal() {
    let converter = Converter::builtin();
    for case in cluster_cases() {
        for version in Version::ALL {
            let mut spec = case.spec.clone();
            spec.version = version.to_string();
            let Ok(delta) = converter.project(&spec) else {
                continue;
            };
            let baseline = BuiltinBaselines.baseline(version).unwrap();

            let mut found = Vec::new();
            redundant_leaves(&delta, Some(&baseline), "", &mut found);
            assert!(
                found.is_empty(),
                "{} on {version} repeats baseline values at {found:?}",
                case.name
            );
        }
    }
}

#[test]
fn test_default_cluster_domain_left_to_baseline() {
    let converter = Converter::builtin();
    let spec = spec(json!({
        "version": "v2.0",
        "proxy": {"networking": {"clusterDomain": "cluster.local"}},
        "gateways": {"clusterIngress": {"service": {"ports": [{"name": "http", "port": 80}]}}}
    }));

    let delta = converter.project(&spec).unwrap();
    assert!(!delta.contains("global.proxy.clusterDomain").unwrap());
    // no https port, so enableHttps keeps its baseline value
    assert!(!delta.contains("global.k8sIngress.enableHttps").unwrap());
    assert!(delta.contains("gateways.istio-ingressgateway.ports").unwrap());
}

#[test]
fn test_redundant_leaves_detects_repeats() {
    let baseline = mesh_test_utils::tree(json!({"a": {"b": 1, "c": [1, 2]}, "d": true}));
    let delta = mesh_test_utils::tree(json!({"a": {"b": 1, "c": [2, 1]}, "d": false, "e": 1}));
    let mut found = Vec::new();
    redundant_leaves(&delta, Some(&baseline), "", &mut found);
    assert_eq!(found, vec!["a.b".to_string()]);
}
