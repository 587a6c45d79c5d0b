//! Default baseline providers
//!
//! A baseline is the settings tree describing a control plane with no
//! optional features turned on. The effective tree handed to the templates is
//! `merge(baseline, delta)`.

use std::collections::BTreeMap;

use mesh_api::Version;
use mesh_values::Value;

use crate::error::{Error, Result};

/// Source of per-version baseline trees
pub trait BaselineProvider {
    /// A fresh copy of the baseline for `version`.
    fn baseline(&self, version: Version) -> Result<Value>;
}

impl<P: BaselineProvider + ?Sized> BaselineProvider for &P {
    fn baseline(&self, version: Version) -> Result<Value> {
        (**self).baseline(version)
    }
}

/// Baselines compiled into the crate from `baselines/*.yaml`
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinBaselines;

impl BuiltinBaselines {
    fn source(version: Version) -> &'static str {
        match version {
            Version::V1_0 => include_str!("../baselines/v1.0.yaml"),
            Version::V1_1 => include_str!("../baselines/v1.1.yaml"),
            Version::V2_0 => include_str!("../baselines/v2.0.yaml"),
        }
    }
}

impl BaselineProvider for BuiltinBaselines {
    fn baseline(&self, version: Version) -> Result<Value> {
        Ok(Value::from_yaml_str(Self::source(version))?)
    }
}

/// Baselines held in memory
///
/// # Example
///
/// ```
/// use mesh_api::Version;
/// use mesh_conversion::{BaselineProvider, StaticBaselines};
/// use mesh_values::Value;
///
/// let mut baseline = Value::map();
/// baseline.set("global.proxy.clusterDomain", "cluster.local").unwrap();
///
/// let baselines = StaticBaselines::new().with(Version::V2_0, baseline.clone());
/// assert_eq!(baselines.baseline(Version::V2_0).unwrap(), baseline);
/// assert!(baselines.baseline(Version::V1_1).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticBaselines {
    baselines: BTreeMap<Version, Value>,
}

impl StaticBaselines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`StaticBaselines::insert`]
    pub fn with(mut self, version: Version, baseline: Value) -> Self {
        self.insert(version, baseline);
        self
    }

    pub fn insert(&mut self, version: Version, baseline: Value) {
        self.baselines.insert(version, baseline);
    }

    pub fn versions(&self) -> impl Iterator<Item = Version> + '_ {
        self.baselines.keys().copied()
    }
}

impl BaselineProvider for StaticBaselines {
    fn baseline(&self, version: Version) -> Result<Value> {
        self.baselines
            .get(&version)
            .cloned()
            .ok_or(Error::BaselineNotFound { version })
    }
}

impl From<BTreeMap<Version, Value>> for StaticBaselines {
    fn from(baselines: BTreeMap<Version, Value>) -> Self {
        Self { baselines }
    }
}
