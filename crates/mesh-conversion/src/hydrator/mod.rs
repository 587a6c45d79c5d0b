//! Reverse hydration: effective settings tree back to a typed spec
//!
//! The markers written during projection (`addedLocalNetwork`,
//! `addedSearchSuffixes`, `gatewaysOverrides`) tell injected defaults apart
//! from user input, so hydrating `merge(baseline, project(spec))` gives back
//! the canonical form of `spec`.

mod cluster;
mod gateways;
mod proxy;

pub use cluster::populate_cluster_config;
pub use gateways::populate_gateway_config;
pub use proxy::populate_proxy_config;

use mesh_api::ControlPlaneSpec;
use mesh_values::{Kind, Value};

use crate::error::{Error, Result};
use crate::gate::VersionProfile;
use crate::keys;

/// Hydrate a typed spec from an effective settings tree.
pub fn hydrate(values: &Value, profile: &VersionProfile) -> Result<ControlPlaneSpec> {
    tracing::debug!(version = %profile.version, "Hydrating control plane spec");
    let mut spec = ControlPlaneSpec::new(profile.version.to_string());
    spec.cluster = populate_cluster_config(values, profile)?;
    spec.proxy = populate_proxy_config(values, profile)?;
    spec.gateways = populate_gateway_config(values, profile)?;
    Ok(spec)
}

pub(crate) fn is_multi_cluster(values: &Value) -> Result<bool> {
    Ok(values
        .get_bool(keys::MULTI_CLUSTER_ENABLED)?
        .unwrap_or(false))
}

/// Non-null child `key` of the map node at `path`
pub(crate) fn field<'a>(node: &'a Value, path: &str, key: &str) -> Result<Option<&'a Value>> {
    let map = node
        .as_map()
        .ok_or_else(|| mesh_values::Error::mismatch(path, Kind::Map, node.kind()))?;
    Ok(map.get(key).filter(|value| !value.is_null()))
}

/// Sequence child of a map node; absent reads as empty
pub(crate) fn seq_field<'a>(node: &'a Value, path: &str, key: &str) -> Result<&'a [Value]> {
    match field(node, path, key)? {
        None => Ok(&[][..]),
        Some(value) => value.as_seq().ok_or_else(|| {
            mesh_values::Error::mismatch(format!("{path}.{key}"), Kind::Seq, value.kind()).into()
        }),
    }
}

pub(crate) fn str_field<'a>(node: &'a Value, path: &str, key: &str) -> Result<Option<&'a str>> {
    match field(node, path, key)? {
        None => Ok(None),
        Some(value) => value.as_str().map(Some).ok_or_else(|| {
            mesh_values::Error::mismatch(format!("{path}.{key}"), Kind::String, value.kind())
                .into()
        }),
    }
}

/// A port number, written either as an integer or a string of digits
pub(crate) fn read_port(value: Option<&Value>, path: &str) -> Result<i64> {
    let port = match value {
        Some(Value::Int(port)) => *port,
        Some(Value::String(text)) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => {
            text.parse::<i64>()
                .map_err(|_| Error::invalid(path, format!("'{text}' is not a port number")))?
        }
        Some(Value::String(text)) => {
            return Err(Error::invalid(path, format!("'{text}' is not a port number")));
        }
        Some(other) => {
            return Err(mesh_values::Error::mismatch(path, Kind::Int, other.kind()).into());
        }
        None => return Err(Error::invalid(path, "port is required")),
    };
    if !(1..=65535).contains(&port) {
        return Err(Error::invalid(path, format!("{port} is not a valid port")));
    }
    Ok(port)
}
