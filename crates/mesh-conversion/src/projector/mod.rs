//! Forward projection: typed spec to settings delta
//!
//! Each `populate_*` function writes the keys of one spec section into a
//! settings tree. [`project`] runs all of them against a fresh tree, so a
//! failure never leaves a partial result behind.

mod cluster;
mod gateways;
mod proxy;

pub use cluster::populate_cluster_values;
pub use gateways::populate_gateway_values;
pub use proxy::populate_proxy_values;

use mesh_api::ControlPlaneSpec;
use mesh_values::Value;

use crate::error::Result;
use crate::gate::VersionProfile;

/// Project `spec` into a raw settings delta.
///
/// The delta is not pruned against a baseline; use
/// [`Converter::project`](crate::Converter::project) for the minimal form.
pub fn project(spec: &ControlPlaneSpec, profile: &VersionProfile) -> Result<Value> {
    tracing::debug!(version = %profile.version, "Projecting control plane spec");
    let mut values = Value::map();
    populate_cluster_values(spec, profile, &mut values)?;
    populate_proxy_values(spec, profile, &mut values)?;
    populate_gateway_values(spec, profile, &mut values)?;
    Ok(values)
}

/// Default DNS search suffixes a multicluster mesh needs that the user has
/// not already listed, in default order.
pub(crate) fn added_search_suffixes(
    spec: &ControlPlaneSpec,
    profile: &VersionProfile,
) -> Vec<String> {
    if !spec.is_multi_cluster() {
        return Vec::new();
    }
    let configured = spec.search_suffixes();
    profile
        .default_search_suffixes()
        .into_iter()
        .filter(|suffix| !configured.iter().any(|existing| existing.as_str() == *suffix))
        .map(str::to_string)
        .collect()
}

/// Whether multicluster routes east-west traffic through the ILB gateway
pub(crate) fn uses_ilb(spec: &ControlPlaneSpec) -> bool {
    spec.cluster.as_ref().is_some_and(|cluster| {
        cluster.multi_cluster.is_some()
            && cluster
                .mesh_expansion
                .as_ref()
                .is_some_and(|expansion| expansion.uses_ilb())
    })
}
