//! Conversion between typed control plane specs and settings trees
//!
//! This crate turns a [`ControlPlaneSpec`](mesh_api::ControlPlaneSpec) into
//! the settings delta the deployment templates consume, and reads an
//! effective settings tree back into a spec:
//!
//! - **Version gate**: per-version profiles of defaulting constants and
//!   feature switches ([`VersionGate`], [`VersionProfile`])
//! - **Baselines**: the settings of a control plane with no optional features
//!   ([`BaselineProvider`], [`BuiltinBaselines`], [`BaselineCatalog`])
//! - **Projection**: spec to settings delta ([`projector`])
//! - **Hydration**: effective settings tree to spec ([`hydrator`])
//! - **Canonical form**: the representative hydration returns ([`canonicalize`])
//!
//! # Architecture
//!
//! ```text
//!   ControlPlaneSpec --project--> delta --merge(baseline, _)--> effective
//!          ^                                                      |
//!          +------------------------hydrate------------------------+
//! ```
//!
//! # Example
//!
//! ```
//! use mesh_api::{ClusterConfig, ControlPlaneSpec, MultiClusterConfig};
//! use mesh_conversion::Converter;
//!
//! let converter = Converter::builtin();
//! let mut spec = ControlPlaneSpec::new("v2.0");
//! spec.cluster = Some(ClusterConfig {
//!     name: "my-cluster".into(),
//!     network: "my-network".into(),
//!     multi_cluster: Some(MultiClusterConfig::default()),
//!     mesh_expansion: None,
//! });
//!
//! let delta = converter.project(&spec).unwrap();
//! assert_eq!(delta.get_bool("global.multiCluster.enabled").unwrap(), Some(true));
//! assert_eq!(
//!     delta.get_str("global.multiCluster.addedLocalNetwork").unwrap(),
//!     Some("my-network")
//! );
//!
//! let effective = converter.materialize(mesh_api::Version::V2_0, &delta).unwrap();
//! assert_eq!(converter.hydrate(mesh_api::Version::V2_0, &effective).unwrap(), spec);
//! ```

pub mod baseline;
pub mod canonical;
pub mod catalog;
pub mod converter;
pub mod error;
pub mod gate;
pub mod hydrator;
pub mod keys;
pub mod projector;

pub use baseline::{BaselineProvider, BuiltinBaselines, StaticBaselines};
pub use canonical::canonicalize;
pub use catalog::{BaselineCatalog, CATALOG_FILE};
pub use converter::Converter;
pub use error::{Error, Result};
pub use gate::{NAMESPACE_SEARCH_SUFFIX, VersionGate, VersionProfile};
pub use hydrator::hydrate;
pub use projector::project;
