use mesh_api::{ProxyConfig, ProxyDnsConfig, ProxyNetworkingConfig};
use mesh_values::Value;

use crate::error::Result;
use crate::gate::VersionProfile;
use crate::hydrator::is_multi_cluster;
use crate::keys;

/// Read the proxy networking section back from a settings tree.
///
/// The default cluster domain reads as unset. Under multicluster the
/// suffixes listed in `addedSearchSuffixes` are removed from the DNS search
/// list, one occurrence each, leaving the user's list in its original order.
pub fn populate_proxy_config(
    values: &Value,
    profile: &VersionProfile,
) -> Result<Option<ProxyConfig>> {
    let cluster_domain = values
        .get_str(keys::CLUSTER_DOMAIN)?
        .filter(|domain| *domain != profile.default_cluster_domain)
        .unwrap_or_default()
        .to_string();

    let mut search_suffixes = values
        .get_string_list(keys::POD_DNS_SEARCH_NAMESPACES)?
        .unwrap_or_default();
    if is_multi_cluster(values)? {
        let added = values
            .get_string_list(keys::ADDED_SEARCH_SUFFIXES)?
            .unwrap_or_default();
        for suffix in added {
            if let Some(index) = search_suffixes.iter().rposition(|existing| *existing == suffix) {
                search_suffixes.remove(index);
            }
        }
    }

    if cluster_domain.is_empty() && search_suffixes.is_empty() {
        return Ok(None);
    }
    Ok(Some(ProxyConfig {
        networking: ProxyNetworkingConfig {
            cluster_domain,
            dns: ProxyDnsConfig { search_suffixes },
        },
    }))
}
