//! Shallow merge of partial records into state
//!
//! A state type describes its partial form through [`Merge::Patch`]. Merging
//! never mutates the previous value: it returns a new value in which every
//! field named by the patch is overwritten and every other field is carried
//! over unchanged.
//!
//! Typed structs usually get their impl from `#[derive(Merge)]`. Dynamic
//! records are covered by the impls on [`serde_json::Value`],
//! [`serde_json::Map`], [`HashMap`] and [`BTreeMap`].
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use slice_dispatch_core::Merge;
//!
//! let state = json!({ "inputText": "", "todos": [] });
//! let patch = json!({ "inputText": "milk" });
//! let next = state.merge(patch.as_object().cloned().unwrap()).unwrap();
//!
//! assert_eq!(next, json!({ "inputText": "milk", "todos": [] }));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use serde_json::{Map, Value};

use crate::error::MergeError;

/// A record that can absorb a partial version of itself
pub trait Merge: Sized {
    /// Partial record; [`Default`] is the empty patch
    type Patch: Default;

    /// Return a copy of `self` with the patch's fields overwritten
    fn merge(&self, patch: Self::Patch) -> Result<Self, MergeError>;
}

impl Merge for Map<String, Value> {
    type Patch = Map<String, Value>;

    fn merge(&self, patch: Self::Patch) -> Result<Self, MergeError> {
        let mut next = self.clone();
        next.extend(patch);
        Ok(next)
    }
}

impl Merge for Value {
    type Patch = Map<String, Value>;

    fn merge(&self, patch: Self::Patch) -> Result<Self, MergeError> {
        match self {
            Value::Object(fields) => Ok(Value::Object(fields.merge(patch)?)),
            other => Err(MergeError::NotAnObject {
                found: json_type_name(other),
            }),
        }
    }
}

impl<K, V> Merge for HashMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    type Patch = HashMap<K, V>;

    fn merge(&self, patch: Self::Patch) -> Result<Self, MergeError> {
        let mut next = self.clone();
        next.extend(patch);
        Ok(next)
    }
}

impl<K, V> Merge for BTreeMap<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    type Patch = BTreeMap<K, V>;

    fn merge(&self, patch: Self::Patch) -> Result<Self, MergeError> {
        let mut next = self.clone();
        next.extend(patch);
        Ok(next)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_value_merge_overwrites_and_retains() {
        let state = json!({ "a": 1, "b": { "nested": true } });
        let next = state.merge(fields(json!({ "a": 2 }))).unwrap();

        assert_eq!(next, json!({ "a": 2, "b": { "nested": true } }));
        // previous value untouched
        assert_eq!(state["a"], 1);
    }

    #[test]
    fn test_value_merge_is_shallow() {
        let state = json!({ "b": { "x": 1, "y": 2 } });
        let next = state.merge(fields(json!({ "b": { "x": 9 } }))).unwrap();

        assert_eq!(next, json!({ "b": { "x": 9 } }));
    }

    #[test]
    fn test_value_merge_adds_new_fields() {
        let state = json!({});
        let next = state.merge(fields(json!({ "todos": [] }))).unwrap();
        assert_eq!(next, json!({ "todos": [] }));
    }

    #[test]
    fn test_value_merge_empty_patch() {
        let state = json!({ "a": 1 });
        let next = state.merge(Map::new()).unwrap();
        assert_eq!(next, state);
    }

    #[test]
    fn test_value_merge_rejects_non_object() {
        let err = json!([1, 2]).merge(Map::new()).unwrap_err();
        assert_eq!(err, MergeError::NotAnObject { found: "array" });

        let err = Value::Null.merge(Map::new()).unwrap_err();
        assert_eq!(err, MergeError::NotAnObject { found: "null" });
    }

    #[test]
    fn test_hash_map_merge() {
        let state: HashMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
        let patch: HashMap<&str, i32> = [("b", 20), ("c", 30)].into_iter().collect();
        let next = state.merge(patch).unwrap();

        assert_eq!(next.len(), 3);
        assert_eq!(next["a"], 1);
        assert_eq!(next["b"], 20);
        assert_eq!(next["c"], 30);
    }

    #[test]
    fn test_btree_map_merge() {
        let state: BTreeMap<String, String> = [("name".to_string(), "old".to_string())]
            .into_iter()
            .collect();
        let mut patch = BTreeMap::new();
        patch.insert("name".to_string(), "new".to_string());

        let next = state.merge(patch).unwrap();
        assert_eq!(next["name"], "new");
        assert_eq!(state["name"], "old");
    }
}
