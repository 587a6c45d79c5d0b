//! Version gate
//!
//! Maps each supported [`Version`] to the [`VersionProfile`] holding the
//! defaulting constants and feature switches the conversion applies for it.

use std::collections::BTreeMap;

use mesh_api::{MeshEndpointConfig, MeshGatewayConfig, MeshNetworkConfig, Version};

use crate::error::Result;

/// Namespace-templated DNS search suffix added for multicluster meshes
pub const NAMESPACE_SEARCH_SUFFIX: &str = r#"{{ valueOrDefault .DeploymentMeta.Namespace "" }}.global"#;

/// Per-version conversion constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionProfile {
    pub version: Version,
    /// Whether `cluster.multiCluster` may be used
    pub multi_cluster: bool,
    pub default_cluster_domain: String,
    pub namespace_search_suffix: String,
    pub global_search_suffix: String,
    pub ingress_gateway: String,
    pub egress_gateway: String,
    pub ilb_gateway: String,
    /// Port of the synthesized own-network gateway
    pub mesh_gateway_port: i64,
    /// Network view entry that lets the egress gateway reach external networks
    pub external_network_view: String,
}

impl VersionProfile {
    /// Profile with the standard constants and multicluster support.
    pub fn new(version: Version) -> Self {
        Self {
            version,
            multi_cluster: true,
            default_cluster_domain: "cluster.local".to_string(),
            namespace_search_suffix: NAMESPACE_SEARCH_SUFFIX.to_string(),
            global_search_suffix: "global".to_string(),
            ingress_gateway: "istio-ingressgateway".to_string(),
            egress_gateway: "istio-egressgateway".to_string(),
            ilb_gateway: "istio-ilbgateway".to_string(),
            mesh_gateway_port: 443,
            external_network_view: "external".to_string(),
        }
    }

    /// Disable multicluster support for this profile.
    pub fn without_multi_cluster(mut self) -> Self {
        self.multi_cluster = false;
        self
    }

    /// Use `domain` as the cluster domain a tree implies when it sets none.
    pub fn with_default_cluster_domain(mut self, domain: impl Into<String>) -> Self {
        self.default_cluster_domain = domain.into();
        self
    }

    /// Implicit DNS search suffixes of a multicluster mesh, in order
    pub fn default_search_suffixes(&self) -> [&str; 2] {
        [
            self.namespace_search_suffix.as_str(),
            self.global_search_suffix.as_str(),
        ]
    }

    /// Service address of the local ingress gateway.
    ///
    /// The namespace segment is left empty; it is filled in when the
    /// templates render.
    pub fn local_gateway_service(&self, cluster_domain: &str) -> String {
        format!("{}..svc.{}", self.ingress_gateway, cluster_domain)
    }

    /// The mesh network entry synthesized for the cluster's own network
    pub fn local_network(&self, cluster_name: &str, cluster_domain: &str) -> MeshNetworkConfig {
        MeshNetworkConfig {
            endpoints: vec![MeshEndpointConfig {
                from_registry: cluster_name.to_string(),
            }],
            gateways: vec![MeshGatewayConfig {
                service: self.local_gateway_service(cluster_domain),
                port: self.mesh_gateway_port,
            }],
        }
    }
}

/// Registry of version profiles.
///
/// # Example
///
/// ```
/// use mesh_api::Version;
/// use mesh_conversion::VersionGate;
///
/// let gate = VersionGate::with_builtins();
/// assert!(!gate.resolve("v1.0").unwrap().multi_cluster);
/// assert!(gate.profile(Version::V2_0).unwrap().multi_cluster);
/// assert!(gate.resolve("v9.9").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct VersionGate {
    profiles: BTreeMap<Version, VersionProfile>,
}

impl VersionGate {
    /// Create an empty gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gate with every supported version registered.
    ///
    /// Multicluster is available from `v1.1` onwards.
    pub fn with_builtins() -> Self {
        let mut gate = Self::new();
        gate.register(VersionProfile::new(Version::V1_0).without_multi_cluster());
        gate.register(VersionProfile::new(Version::V1_1));
        gate.register(VersionProfile::new(Version::V2_0));
        gate
    }

    /// Register a profile, replacing any profile for the same version.
    pub fn register(&mut self, profile: VersionProfile) {
        self.profiles.insert(profile.version, profile);
    }

    /// Look up the profile for a version.
    pub fn profile(&self, version: Version) -> Result<&VersionProfile> {
        self.profiles.get(&version).ok_or_else(|| {
            mesh_api::Error::UnsupportedVersion {
                version: version.to_string(),
            }
            .into()
        })
    }

    /// Parse a version string and look up its profile.
    pub fn resolve(&self, version: &str) -> Result<&VersionProfile> {
        let parsed: Version = version.parse()?;
        self.profile(parsed)
    }

    /// Registered versions, oldest first
    pub fn versions(&self) -> impl Iterator<Item = Version> + '_ {
        self.profiles.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_builtins_cover_every_version() {
        let gate = VersionGate::with_builtins();
        assert_eq!(gate.versions().collect::<Vec<_>>(), Version::ALL.to_vec());
    }

    #[test]
    fn test_multicluster_gated_by_version() {
        let gate = VersionGate::with_builtins();
        assert!(!gate.profile(Version::V1_0).unwrap().multi_cluster);
        assert!(gate.profile(Version::V1_1).unwrap().multi_cluster);
        assert!(gate.profile(Version::V2_0).unwrap().multi_cluster);
    }

    #[test]
    fn test_unregistered_version_is_unsupported() {
        let mut gate = VersionGate::new();
        gate.register(VersionProfile::new(Version::V2_0));
        let err = gate.profile(Version::V1_1).unwrap_err();
        assert!(matches!(
            err,
            Error::Api(mesh_api::Error::UnsupportedVersion { ref version }) if version == "v1.1"
        ));
    }

    #[test]
    fn test_register_leaves_other_versions_alone() {
        let mut gate = VersionGate::with_builtins();
        let before = gate.profile(Version::V1_1).unwrap().clone();

        let mut custom = VersionProfile::new(Version::V2_0);
        custom.mesh_gateway_port = 15443;
        gate.register(custom);

        assert_eq!(gate.profile(Version::V2_0).unwrap().mesh_gateway_port, 15443);
        assert_eq!(gate.profile(Version::V1_1).unwrap(), &before);
    }

    #[test]
    fn test_local_network_uses_cluster_domain() {
        let profile = VersionProfile::new(Version::V2_0);
        let network = profile.local_network("my-cluster", "example.com");
        assert_eq!(network.endpoints[0].from_registry, "my-cluster");
        assert_eq!(
            network.gateways[0].service,
            "istio-ingressgateway..svc.example.com"
        );
        assert_eq!(network.gateways[0].port, 443);
    }

    #[test]
    fn test_default_cluster_domain_override() {
        let profile = VersionProfile::new(Version::V2_0).with_default_cluster_domain("corp.local");
        assert_eq!(profile.default_cluster_domain, "corp.local");
        assert_eq!(
            profile.local_network("c", &profile.default_cluster_domain).gateways[0].service,
            "istio-ingressgateway..svc.corp.local"
        );
    }

    #[test]
    fn test_default_search_suffix_order() {
        let profile = VersionProfile::new(Version::V1_1);
        assert_eq!(
            profile.default_search_suffixes(),
            [
                "{{ valueOrDefault .DeploymentMeta.Namespace \"\" }}.global",
                "global"
            ]
        );
    }
}
