//! Deep merge of validated values.
//!
//! Intersections validate the same input against every branch and combine
//! the sanitized outputs with this merge.
//!
//! # Merge Semantics
//!
//! - **Objects**: merge entries key-wise, recursing when both sides hold an object
//! - **Anything else** (arrays, primitives, mixed kinds): the later value wins

use serde_json::Value;

/// Trait for deep merging values.
pub trait Merge: Sized {
    /// Merge `other` into `self`, with `other` taking precedence.
    fn merge(self, other: Self) -> Self;

    /// Merge multiple overlays in sequence.
    ///
    /// Later overlays take precedence over earlier ones.
    fn merge_all<I>(self, overlays: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        overlays.into_iter().fold(self, |acc, overlay| acc.merge(overlay))
    }
}

impl Merge for Value {
    fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Value::Object(mut base), Value::Object(overlay)) => {
                for (key, overlay_value) in overlay {
                    let merged = match base.remove(&key) {
                        Some(base_value) => base_value.merge(overlay_value),
                        None => overlay_value,
                    };
                    base.insert(key, merged);
                }
                Value::Object(base)
            }
            (_, overlay) => overlay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_disjoint_objects_union_keys() {
        let merged = json!({"a": "xxx"}).merge(json!({"b": 1}));
        assert_eq!(merged, json!({"a": "xxx", "b": 1}));
    }

    #[test]
    fn test_nested_merge() {
        let base = json!({"meta": {"name": "base", "count": 1}});
        let overlay = json!({"meta": {"count": 2}});
        assert_eq!(
            base.merge(overlay),
            json!({"meta": {"name": "base", "count": 2}})
        );
    }

    #[test]
    fn test_later_value_wins_for_non_objects() {
        assert_eq!(json!([1, 2]).merge(json!([3])), json!([3]));
        assert_eq!(json!({"a": 1}).merge(json!("s")), json!("s"));
        assert_eq!(json!({"a": 1}).merge(json!({"a": 2})), json!({"a": 2}));
    }

    #[test]
    fn test_merge_all_in_order() {
        let merged = json!({"a": 1}).merge_all(vec![json!({"b": 2}), json!({"a": 3})]);
        assert_eq!(merged, json!({"a": 3, "b": 2}));
    }
}
