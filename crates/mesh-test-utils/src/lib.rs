//! Shared test utilities for the mesh conversion workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: the cluster conversion case table and tree builders
//! - [`logging`]: `tracing` output for test runs

pub mod fixtures;
pub mod logging;

pub use fixtures::{ConversionCase, cluster_case, cluster_cases, spec, tree};
