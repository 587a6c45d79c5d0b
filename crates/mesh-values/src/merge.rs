//! Deep merge and baseline pruning for settings trees
//!
//! Merging is override-wins: when both sides hold a map at the same key the
//! maps are merged recursively, otherwise the overlay node replaces the base
//! node wholesale. Sequences are never merged element-wise and an explicit
//! `null` in the overlay replaces the base value (null markers carry meaning
//! downstream). This is the only merge policy.

use crate::value::Value;

/// Merge `overlay` on top of `base`, returning a new tree.
///
/// Neither input is modified.
///
/// ```
/// use mesh_values::{Value, merge};
///
/// let base = Value::from_yaml_str("a: 1\nlist: [x, y]\nnested: {keep: true}\n").unwrap();
/// let overlay = Value::from_yaml_str("list: [z]\nnested: {added: 2}\n").unwrap();
///
/// let merged = merge(&base, &overlay);
/// assert_eq!(merged.get_int("a").unwrap(), Some(1));
/// assert_eq!(merged.get_string_list("list").unwrap(), Some(vec!["z".to_string()]));
/// assert_eq!(merged.get_bool("nested.keep").unwrap(), Some(true));
/// assert_eq!(merged.get_int("nested.added").unwrap(), Some(2));
/// ```
pub fn merge(base: &Value, overlay: &Value) -> Value {
    let mut merged = base.clone();
    merge_into(&mut merged, overlay);
    merged
}

/// Merge `overlay` into `base` in place.
pub fn merge_into(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Map(base_map), Value::Map(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                if let Some(base_value) = base_map.get_mut(key) {
                    merge_into(base_value, overlay_value);
                } else {
                    base_map.insert(key.clone(), overlay_value.clone());
                }
            }
        }
        (base, overlay) => {
            *base = overlay.clone();
        }
    }
}

/// Remove from `delta` every non-map node that `baseline` already holds with
/// an equal value at the same path.
///
/// Maps emptied by pruning are dropped as well. A map can only become empty
/// when the baseline has a map at that key, so for every pruned result
/// `merge(baseline, prune(delta, baseline)) == merge(baseline, delta)`.
///
/// ```
/// use mesh_values::{Value, prune};
///
/// let baseline = Value::from_yaml_str("global: {proxy: {clusterDomain: cluster.local}}\n").unwrap();
/// let delta = Value::from_yaml_str(
///     "global: {useMCP: true, proxy: {clusterDomain: cluster.local}}\n",
/// ).unwrap();
///
/// let pruned = prune(&delta, &baseline);
/// assert_eq!(pruned, Value::from_yaml_str("global: {useMCP: true}\n").unwrap());
/// ```
pub fn prune(delta: &Value, baseline: &Value) -> Value {
    match (delta, baseline) {
        (Value::Map(delta_map), Value::Map(base_map)) => {
            let mut pruned = delta_map.clone();
            pruned.retain(|key, value| match base_map.get(key) {
                None => true,
                Some(base_value) if value.as_map().is_some() && base_value.as_map().is_some() => {
                    let was_empty = value.is_empty_map();
                    *value = prune(value, base_value);
                    was_empty || !value.is_empty_map()
                }
                Some(base_value) => *value != *base_value,
            });
            Value::Map(pruned)
        }
        (delta, _) => delta.clone(),
    }
}
