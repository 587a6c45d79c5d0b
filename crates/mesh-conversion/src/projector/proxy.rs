use mesh_api::ControlPlaneSpec;
use mesh_values::Value;

use crate::error::Result;
use crate::gate::VersionProfile;
use crate::keys;
use crate::projector::added_search_suffixes;

/// Write the proxy networking settings of `spec`.
///
/// The DNS search list the templates consume is the user's list followed by
/// whichever multicluster defaults it lacks.
pub fn populate_proxy_values(
    spec: &ControlPlaneSpec,
    profile: &VersionProfile,
    values: &mut Value,
) -> Result<()> {
    if let Some(domain) = spec.cluster_domain() {
        values.set(keys::CLUSTER_DOMAIN, domain)?;
    }

    let mut suffixes = spec.search_suffixes().to_vec();
    suffixes.extend(added_search_suffixes(spec, profile));
    if !suffixes.is_empty() {
        values.set(keys::POD_DNS_SEARCH_NAMESPACES, Value::seq(suffixes))?;
    }
    Ok(())
}
