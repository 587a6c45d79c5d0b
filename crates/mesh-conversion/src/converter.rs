//! Conversion facade bundling the version gate and a baseline provider

use mesh_api::{ControlPlaneSpec, Version};
use mesh_values::{Value, diff, merge, prune};

use crate::baseline::{BaselineProvider, BuiltinBaselines};
use crate::canonical::canonicalize;
use crate::error::{Error, Result};
use crate::gate::{VersionGate, VersionProfile};
use crate::{hydrator, keys, projector};

/// Converts control plane specs to settings trees and back.
///
/// Holds no state between calls; every operation is a pure function of its
/// inputs, the registered profiles and the baselines.
///
/// # Example
///
/// ```
/// use mesh_api::{ClusterConfig, ControlPlaneSpec};
/// use mesh_conversion::Converter;
///
/// let converter = Converter::builtin();
/// let mut spec = ControlPlaneSpec::new("v2.0");
/// spec.cluster = Some(ClusterConfig {
///     name: "east".into(),
///     network: "net-east".into(),
///     ..Default::default()
/// });
///
/// let delta = converter.project(&spec).unwrap();
/// assert_eq!(delta.get_str("global.network").unwrap(), Some("net-east"));
/// assert_eq!(converter.round_trip(&spec).unwrap(), spec);
/// ```
#[derive(Debug, Clone)]
pub struct Converter<B = BuiltinBaselines> {
    gate: VersionGate,
    baselines: B,
}

impl Converter<BuiltinBaselines> {
    /// Converter over every built-in version and baseline.
    pub fn builtin() -> Self {
        Self::new(VersionGate::with_builtins(), BuiltinBaselines)
    }
}

impl Default for Converter<BuiltinBaselines> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<B: BaselineProvider> Converter<B> {
    pub fn new(gate: VersionGate, baselines: B) -> Self {
        Self { gate, baselines }
    }

    pub fn gate(&self) -> &VersionGate {
        &self.gate
    }

    pub fn baselines(&self) -> &B {
        &self.baselines
    }

    /// The profile governing `spec`, selected by its version string.
    pub fn profile_for(&self, spec: &ControlPlaneSpec) -> Result<&VersionProfile> {
        self.gate.resolve(&spec.version)
    }

    /// The profile of `version` as seen through its baseline.
    ///
    /// A baseline that sets `global.proxy.clusterDomain` defines the default
    /// cluster domain; otherwise the registered profile's default applies.
    pub fn effective_profile(&self, version: Version) -> Result<VersionProfile> {
        Ok(self.profile_and_baseline(version)?.0)
    }

    fn profile_and_baseline(&self, version: Version) -> Result<(VersionProfile, Value)> {
        let mut profile = self.gate.profile(version)?.clone();
        let baseline = self.baselines.baseline(version)?;
        if let Some(domain) = baseline
            .get_str(keys::CLUSTER_DOMAIN)?
            .filter(|domain| !domain.is_empty())
        {
            tracing::trace!(version = %version, domain = %domain, "Baseline sets cluster domain");
            profile = profile.with_default_cluster_domain(domain);
        }
        Ok((profile, baseline))
    }

    /// Project `spec` into the minimal delta over its version's baseline.
    ///
    /// Leaves the baseline already supplies with the same value are left out.
    pub fn project(&self, spec: &ControlPlaneSpec) -> Result<Value> {
        let version = self.profile_for(spec)?.version;
        let (profile, baseline) = self.profile_and_baseline(version)?;
        let raw = projector::project(spec, &profile)?;
        let delta = prune(&raw, &baseline);
        tracing::debug!(version = %profile.version, "Projected minimal delta");
        Ok(delta)
    }

    /// Overlay `delta` on the baseline of `version`.
    pub fn materialize(&self, version: Version, delta: &Value) -> Result<Value> {
        self.gate.profile(version)?;
        let baseline = self.baselines.baseline(version)?;
        Ok(merge(&baseline, delta))
    }

    /// Hydrate a spec from an effective settings tree of `version`.
    pub fn hydrate(&self, version: Version, effective: &Value) -> Result<ControlPlaneSpec> {
        let profile = self.effective_profile(version)?;
        hydrator::hydrate(effective, &profile)
    }

    /// Project `spec`, materialize the delta and hydrate the result.
    pub fn round_trip(&self, spec: &ControlPlaneSpec) -> Result<ControlPlaneSpec> {
        let version = self.profile_for(spec)?.version;
        let delta = self.project(spec)?;
        let effective = self.materialize(version, &delta)?;
        self.hydrate(version, &effective)
    }

    /// Run [`Converter::round_trip`] and check the result against the
    /// canonical form of `spec`.
    ///
    /// On mismatch the error carries a path-by-path diff of the two specs.
    pub fn verify_round_trip(&self, spec: &ControlPlaneSpec) -> Result<ControlPlaneSpec> {
        let profile = self.effective_profile(self.profile_for(spec)?.version)?;
        let expected = canonicalize(spec, &profile);
        let actual = self.round_trip(spec)?;
        if actual == expected {
            return Ok(actual);
        }

        let changes = diff(&spec_tree(&expected)?, &spec_tree(&actual)?);
        tracing::debug!(version = %profile.version, changes = changes.len(), "Round trip mismatch");
        Err(Error::RoundTripMismatch {
            version: profile.version,
            diff: changes.to_string(),
        })
    }
}

fn spec_tree(spec: &ControlPlaneSpec) -> Result<Value> {
    let json = serde_json::to_value(spec).map_err(mesh_values::Error::from)?;
    Ok(Value::try_from(json)?)
}
