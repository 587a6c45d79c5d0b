//! Dotted-path access into a settings tree
//!
//! Paths are dot-separated map keys: `global.multiCluster.enabled`. Only map
//! nodes can be traversed; a scalar or sequence in the middle of a path is a
//! [`Error::TypeMismatch`]. Keys that themselves contain dots (network names,
//! for instance) must be read through their parent map.
//!
//! Typed getters treat an explicit `null` the same as an absent key and
//! return `Ok(None)`. Use [`Value::get`] when the null marker matters.
//!
//! # Examples
//!
//! ```
//! use mesh_values::Value;
//!
//! let mut values = Value::map();
//! values.set("global.multiCluster.enabled", true).unwrap();
//! values.set("global.network", "my-network").unwrap();
//!
//! assert_eq!(values.get_bool("global.multiCluster.enabled").unwrap(), Some(true));
//! assert_eq!(values.get_str("global.missing").unwrap(), None);
//! assert!(values.get_int("global.network").is_err());
//! ```

use crate::error::{Error, Result};
use crate::value::{Kind, Mapping, Value};

/// Split a dotted path into its keys, ignoring empty segments.
///
/// ```
/// use mesh_values::parse_path;
///
/// assert_eq!(parse_path("global.meshExpansion.useILB"), vec!["global", "meshExpansion", "useILB"]);
/// assert_eq!(parse_path(".a..b."), vec!["a", "b"]);
/// ```
pub fn parse_path(path: &str) -> Vec<&str> {
    path.split('.').filter(|segment| !segment.is_empty()).collect()
}

impl Value {
    /// Look up the node at `path`.
    ///
    /// Returns `Ok(None)` when any key along the path is missing, and an error
    /// when an intermediate node is not a map.
    pub fn get(&self, path: &str) -> Result<Option<&Value>> {
        let segments = parse_path(path);
        if segments.is_empty() {
            return Ok(Some(self));
        }

        let mut current = self;
        for (depth, key) in segments.iter().enumerate() {
            let map = match current {
                Value::Map(map) => map,
                other => {
                    return Err(Error::mismatch(
                        segments[..depth].join("."),
                        Kind::Map,
                        other.kind(),
                    ));
                }
            };
            match map.get(*key) {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// True if a node (including an explicit null) exists at `path`
    pub fn contains(&self, path: &str) -> Result<bool> {
        Ok(self.get(path)?.is_some())
    }

    fn get_typed<'a, T>(
        &'a self,
        path: &str,
        expected: Kind,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>> {
        match self.get(path)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => extract(value)
                .map(Some)
                .ok_or_else(|| Error::mismatch(path, expected, value.kind())),
        }
    }

    pub fn get_bool(&self, path: &str) -> Result<Option<bool>> {
        self.get_typed(path, Kind::Bool, Value::as_bool)
    }

    pub fn get_int(&self, path: &str) -> Result<Option<i64>> {
        self.get_typed(path, Kind::Int, Value::as_int)
    }

    pub fn get_str(&self, path: &str) -> Result<Option<&str>> {
        self.get_typed(path, Kind::String, Value::as_str)
    }

    pub fn get_seq(&self, path: &str) -> Result<Option<&[Value]>> {
        self.get_typed(path, Kind::Seq, Value::as_seq)
    }

    pub fn get_map(&self, path: &str) -> Result<Option<&Mapping>> {
        self.get_typed(path, Kind::Map, Value::as_map)
    }

    /// Read a sequence of strings, preserving order.
    pub fn get_string_list(&self, path: &str) -> Result<Option<Vec<String>>> {
        let Some(items) = self.get_seq(path)? else {
            return Ok(None);
        };
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| Error::mismatch(format!("{path}[{index}]"), Kind::String, item.kind()))
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    /// Set the node at `path`, creating intermediate maps as needed.
    ///
    /// A null root or null intermediate node is replaced by a map. Any other
    /// non-map node along the way is an error and leaves the tree unchanged.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        let segments = parse_path(path);
        let Some((last, parents)) = segments.split_last() else {
            return Err(Error::InvalidPath {
                path: path.to_string(),
                reason: "path has no keys".to_string(),
            });
        };

        let mut current = self;
        for (depth, key) in parents.iter().enumerate() {
            let map = as_map_or_init(current, &segments[..depth])?;
            current = map.entry((*key).to_string()).or_insert(Value::Null);
        }
        let map = as_map_or_init(current, parents)?;
        map.insert((*last).to_string(), value.into());
        Ok(())
    }

    /// Remove the node at `path`, returning it if it existed.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let segments = parse_path(path);
        let (last, parents) = segments.split_last()?;

        let mut current = self;
        for key in parents {
            current = current.as_map_mut()?.get_mut(*key)?;
        }
        current.as_map_mut()?.remove(*last)
    }
}

fn as_map_or_init<'a>(value: &'a mut Value, at: &[&str]) -> Result<&'a mut Mapping> {
    if value.is_null() {
        *value = Value::map();
    }
    let kind = value.kind();
    value
        .as_map_mut()
        .ok_or_else(|| Error::mismatch(at.join("."), Kind::Map, kind))
}
