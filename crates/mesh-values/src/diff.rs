//! Structural diff between two settings trees
//!
//! Used to explain why two trees are not equal: test failures, and the
//! round-trip verification in the conversion engine. Maps are compared key by
//! key; sequences are compared whole because their order is significant.

use std::fmt;

use crate::value::Value;

/// Maximum recursion depth before a subtree is reported as one modification
const MAX_DIFF_DEPTH: usize = 64;

/// A single difference between an old and a new tree
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// Path present only in the new tree
    Added { path: String, value: Value },
    /// Path present only in the old tree
    Removed { path: String, value: Value },
    /// Path present in both with different values
    Modified { path: String, old: Value, new: Value },
}

impl Change {
    pub fn path(&self) -> &str {
        match self {
            Change::Added { path, .. }
            | Change::Removed { path, .. }
            | Change::Modified { path, .. } => path,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Added { path, value } => write!(f, "+ {path}: {value}"),
            Change::Removed { path, value } => write!(f, "- {path}: {value}"),
            Change::Modified { path, old, new } => write!(f, "~ {path}: {old} -> {new}"),
        }
    }
}

/// All differences between two trees, in path order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeDiff {
    pub changes: Vec<Change>,
}

impl TreeDiff {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }
}

impl fmt::Display for TreeDiff {
    /// One change per line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, change) in self.changes.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{change}")?;
        }
        Ok(())
    }
}

/// Compute the differences going from `old` to `new`.
///
/// ```
/// use mesh_values::{Value, diff};
///
/// let old = Value::from_yaml_str("a: 1\nb: [x, y]\n").unwrap();
/// let new = Value::from_yaml_str("a: 1\nb: [y, x]\nc: true\n").unwrap();
///
/// let changes = diff(&old, &new);
/// assert_eq!(changes.len(), 2);
/// assert_eq!(changes.to_string(), "~ b: [\"x\",\"y\"] -> [\"y\",\"x\"]\n+ c: true");
/// ```
pub fn diff(old: &Value, new: &Value) -> TreeDiff {
    let mut changes = Vec::new();
    diff_with_depth(old, new, "", &mut changes, 0);
    TreeDiff { changes }
}

fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn diff_with_depth(old: &Value, new: &Value, path: &str, changes: &mut Vec<Change>, depth: usize) {
    match (old, new) {
        (Value::Map(old_map), Value::Map(new_map)) if depth < MAX_DIFF_DEPTH => {
            // BTreeMap iteration keeps the report sorted by key
            for (key, old_value) in old_map {
                let path = child_path(path, key);
                match new_map.get(key) {
                    Some(new_value) => diff_with_depth(old_value, new_value, &path, changes, depth + 1),
                    None => changes.push(Change::Removed {
                        path,
                        value: old_value.clone(),
                    }),
                }
            }
            for (key, new_value) in new_map {
                if !old_map.contains_key(key) {
                    changes.push(Change::Added {
                        path: child_path(path, key),
                        value: new_value.clone(),
                    });
                }
            }
        }
        (old, new) if old != new => changes.push(Change::Modified {
            path: path.to_string(),
            old: old.clone(),
            new: new.clone(),
        }),
        _ => {}
    }
}
