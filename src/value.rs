//! Supplement to the JSON value model (component A).
//!
//! The schema AST and the documents it validates are both represented as
//! `serde_json::Value`, the teacher's own established idiom (see `src/keywords/*.rs`,
//! which already reads/writes keywords as object entries on `Value`). `Value` already
//! gives us tagged variants, typed accessors (`as_str`, `as_object`, ...) and structural
//! `PartialEq`, so this module only adds the handful of operations spec.md calls for
//! that `serde_json::Value` does not already provide on its own.

use serde_json::Value;
use unicode_segmentation::UnicodeSegmentation;

/// Structural equality between two JSON values.
///
/// This is exactly `serde_json::Value`'s own `PartialEq`: `Integer` and `Float` are
/// distinct tags even when numerically equal (`json!(1) != json!(1.0)`), arrays compare
/// positionally, objects compare by matching key sets plus per-key equality. Exposed as
/// a named function so call sites can use the spec's vocabulary instead of a bare `==`.
#[must_use]
pub fn deep_equals(a: &Value, b: &Value) -> bool {
    a == b
}

/// Deep copy of a schema, sharing no identity with the original.
///
/// `Value::clone` already has these semantics -- `Map`/`Vec` clones always copy their
/// contents -- which is exactly the serialize-then-parse round trip spec.md §4.3
/// describes as `Clone`. Kept as a named function so reduction rules that need a
/// scratch mutable copy read as deliberately invoking the spec's `Clone` operation
/// rather than an incidental `.clone()`.
#[must_use]
pub(crate) fn clone_schema(schema: &Value) -> Value {
    schema.clone()
}

/// Length of `s` in Unicode extended grapheme clusters ("text elements").
///
/// `minLength`/`maxLength` are specified against this unit, not UTF-16 code units and
/// not bytes -- a single emoji with combining modifiers counts once.
#[must_use]
pub(crate) fn text_element_len(s: &str) -> usize {
    s.graphemes(true).count()
}

#[cfg(test)]
mod tests {
    use super::{clone_schema, deep_equals, text_element_len};
    use serde_json::json;
    use test_case::test_case;

    #[test_case(&json!(1), &json!(1) => true)]
    #[test_case(&json!(1), &json!(1.0) => false; "integer and float tags are distinct")]
    #[test_case(&json!({"a": 1, "b": 2}), &json!({"b": 2, "a": 1}) => true; "object key order does not matter")]
    #[test_case(&json!([1, 2]), &json!([2, 1]) => false; "array order does matter")]
    #[test_case(&json!(null), &json!(null) => true)]
    fn test_deep_equals(a: &serde_json::Value, b: &serde_json::Value) -> bool {
        deep_equals(a, b)
    }

    #[test]
    fn test_deep_equals_is_reflexive_symmetric_transitive() {
        let a = json!({"type": "string", "allOf": [{"const": 1}]});
        let b = a.clone();
        let c = b.clone();
        assert!(deep_equals(&a, &a));
        assert_eq!(deep_equals(&a, &b), deep_equals(&b, &a));
        assert!(deep_equals(&a, &b) && deep_equals(&b, &c) && deep_equals(&a, &c));
    }

    #[test]
    fn test_clone_schema_has_no_shared_identity() {
        let original = json!({"properties": {"p": {"type": "string"}}});
        let mut cloned = clone_schema(&original);
        assert_eq!(cloned, original);
        // Mutating the clone must never be observable through `original`.
        if let Some(object) = cloned.as_object_mut() {
            object.clear();
        }
        assert_ne!(cloned, original);
    }

    #[test_case("" => 0)]
    #[test_case("abc" => 3)]
    #[test_case("café" => 4)]
    #[test_case("a\u{0301}bc" => 3; "combining accent counts as one grapheme")]
    fn test_text_element_len(s: &str) -> usize {
        text_element_len(s)
    }
}
