//! On-disk baseline catalog
//!
//! A catalog directory holds a `baselines.toml` manifest mapping version
//! strings to YAML documents relative to the directory:
//!
//! ```toml
//! [baselines]
//! "v1.1" = "v1.1.yaml"
//! "v2.0" = "profiles/v2.0.yaml"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use mesh_api::Version;
use mesh_values::{Kind, Value};
use serde::Deserialize;

use crate::baseline::BaselineProvider;
use crate::error::{Error, Result};

/// File name of the catalog manifest
pub const CATALOG_FILE: &str = "baselines.toml";

#[derive(Debug, Default, Deserialize)]
struct CatalogManifest {
    #[serde(default)]
    baselines: BTreeMap<String, PathBuf>,
}

/// Baselines loaded from a catalog directory
#[derive(Debug, Clone)]
pub struct BaselineCatalog {
    root: PathBuf,
    baselines: BTreeMap<Version, Value>,
}

impl BaselineCatalog {
    /// Load every baseline listed in `<dir>/baselines.toml`.
    ///
    /// All listed documents are read and validated up front, so a catalog
    /// that loads successfully never fails later except for versions it
    /// does not list.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let root = dir.as_ref().to_path_buf();
        let manifest_path = root.join(CATALOG_FILE);
        if !manifest_path.is_file() {
            return Err(Error::ConfigNotFound {
                path: manifest_path,
            });
        }

        tracing::debug!(?manifest_path, "Loading baseline catalog");
        let content = fs::read_to_string(&manifest_path)?;
        let manifest: CatalogManifest = toml::from_str(&content)?;

        let mut baselines = BTreeMap::new();
        for (key, file) in manifest.baselines {
            let version: Version = key.parse()?;
            let path = root.join(&file);
            tracing::debug!(%version, ?path, "Loading baseline");
            let baseline = Value::from_yaml_str(&fs::read_to_string(&path)?)?;
            if baseline.as_map().is_none() {
                return Err(mesh_values::Error::mismatch(
                    path.display().to_string(),
                    Kind::Map,
                    baseline.kind(),
                )
                .into());
            }
            baselines.insert(version, baseline);
        }

        Ok(Self { root, baselines })
    }

    /// Directory the catalog was loaded from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Versions listed in the manifest, oldest first
    pub fn versions(&self) -> impl Iterator<Item = Version> + '_ {
        self.baselines.keys().copied()
    }

    pub fn contains(&self, version: Version) -> bool {
        self.baselines.contains_key(&version)
    }
}

impl BaselineProvider for BaselineCatalog {
    fn baseline(&self, version: Version) -> Result<Value> {
        self.baselines
            .get(&version)
            .cloned()
            .ok_or(Error::BaselineNotFound { version })
    }
}
