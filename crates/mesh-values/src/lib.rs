//! Untyped settings tree for mesh configuration values
//!
//! The settings tree is the interchange document between the typed control
//! plane configuration and the templating layer that renders deployment
//! artifacts. It is a closed tagged union ([`Value`]) of maps, sequences and
//! scalars.
//!
//! - **Paths**: dotted accessors (`global.multiCluster.enabled`) that fail on
//!   kind mismatch instead of coercing
//! - **Merge**: recursive override-wins deep merge ([`merge`], [`merge_into`])
//! - **Prune**: removal of leaves already supplied by a baseline ([`prune`])
//! - **Diff**: per-path structural differences for diagnostics ([`diff`])
//! - **Codecs**: YAML and JSON via serde
//!
//! # Example
//!
//! ```
//! use mesh_values::{Value, merge};
//!
//! let base = Value::from_yaml_str("global:\n  useMCP: false\n  network: a\n").unwrap();
//! let delta = Value::from_yaml_str("global:\n  useMCP: true\n").unwrap();
//!
//! let merged = merge(&base, &delta);
//! assert_eq!(merged.get_bool("global.useMCP").unwrap(), Some(true));
//! assert_eq!(merged.get_str("global.network").unwrap(), Some("a"));
//! ```

pub mod diff;
pub mod error;
pub mod format;
pub mod merge;
pub mod path;
pub mod value;

pub use diff::{Change, TreeDiff, diff};
pub use error::{Error, Result};
pub use merge::{merge, merge_into, prune};
pub use path::parse_path;
pub use value::{Kind, Mapping, Value};
