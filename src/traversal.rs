//! Generic schema traversal/transformation framework (component C).
//!
//! This trait is the substrate the minimizer (`crate::minimize::Minimizer`) is built on:
//! its rule-application pass is entirely the `visit_node` hook, and descending into every
//! schema-valued field -- sub-schemas, arrays of sub-schemas, the `dependencies` mixed
//! shape -- is this module's `visit`, not a hand-rolled walk of its own. Every hook
//! defaults to identity/recurse, matching spec.md §4.2's design note; a transformation
//! only needs to override `visit_node`.

use crate::constants::{KEYWORDS_WITH_DIRECT_SUBSCHEMAS, KEYWORDS_WITH_SUBSCHEMAS};
use serde_json::Value;

/// A transformation over a schema AST that rebuilds a (possibly rewritten) copy.
///
/// `visit` walks every populated schema-valued field of `schema`, recursing into each
/// sub-schema first, then hands the rebuilt node to `visit_node`. Implementors that only
/// need to change how a single node is rewritten (not how the tree is walked) only need
/// to override `visit_node`.
pub(crate) trait SchemaVisitor {
    /// Transform a single node after its children have already been visited.
    /// Identity by default.
    fn visit_node(&mut self, schema: Value) -> Value {
        schema
    }

    /// Recurse through every schema-valued field of `schema`, then call `visit_node` on
    /// the rebuilt result. Scalar fields (`type`, `minimum`, `pattern`, ...) are left
    /// untouched since they carry no sub-schemas.
    fn visit(&mut self, mut schema: Value) -> Value {
        if let Value::Object(ref mut schema_object) = schema {
            let keywords_present: Vec<String> = schema_object
                .keys()
                .filter(|key| KEYWORDS_WITH_SUBSCHEMAS.contains(key.as_str()))
                .cloned()
                .collect();
            for keyword in keywords_present {
                let value = schema_object
                    .remove(&keyword)
                    .expect("keyword was just read from this same map");
                let visited = self.visit_field(&keyword, value);
                let _ = schema_object.insert(keyword, visited);
            }
        }
        self.visit_node(schema)
    }

    /// Recurse into a single keyword's value, dispatching on its shape: a direct
    /// sub-schema, a name→sub-schema map, an array of sub-schemas, or (for
    /// `dependencies`) a mix of the two depending on each entry's own shape.
    fn visit_field(&mut self, keyword: &str, value: Value) -> Value {
        match value {
            Value::Object(object) if keyword == "dependencies" => Value::Object(
                object
                    .into_iter()
                    .map(|(name, dependency)| {
                        let visited = match dependency {
                            // a list of required property names, not a sub-schema
                            Value::Array(_) => dependency,
                            other => self.visit(other),
                        };
                        (name, visited)
                    })
                    .collect(),
            ),
            Value::Object(object) if KEYWORDS_WITH_DIRECT_SUBSCHEMAS.contains(keyword) => {
                self.visit(Value::Object(object))
            }
            Value::Object(object) => Value::Object(
                object
                    .into_iter()
                    .map(|(name, subschema)| (name, self.visit(subschema)))
                    .collect(),
            ),
            Value::Array(array) => {
                Value::Array(array.into_iter().map(|item| self.visit(item)).collect())
            }
            other => other,
        }
    }
}

/// The identity traversal: descends into every sub-schema and rebuilds a structurally
/// deep-equal copy without changing anything. Documents/exercises the default wiring
/// independently from `Minimizer` (`crate::minimize`), the production, non-identity
/// visitor built on this trait.
#[derive(Default)]
pub(crate) struct IdentityVisitor;

impl SchemaVisitor for IdentityVisitor {}

#[cfg(test)]
mod tests {
    use super::{IdentityVisitor, SchemaVisitor};
    use serde_json::json;

    #[test]
    fn test_identity_visitor_yields_deep_equal_copy() {
        let schema = json!({
            "title": "T",
            "properties": {"p": {"type": "string"}},
            "allOf": [{"const": 1}],
            "dependencies": {"a": ["b"], "c": {"type": "object"}},
            "additionalProperties": false,
        });
        assert_eq!(IdentityVisitor.visit(schema.clone()), schema);
    }

    #[test]
    fn test_identity_visitor_leaves_scalar_fields_untouched() {
        let schema = json!({"type": "integer", "minimum": 1, "pattern": "^a"});
        assert_eq!(IdentityVisitor.visit(schema.clone()), schema);
    }

    struct RenameTitle;
    impl SchemaVisitor for RenameTitle {
        fn visit_node(&mut self, mut schema: serde_json::Value) -> serde_json::Value {
            if let Some(object) = schema.as_object_mut() {
                if let Some(title) = object.remove("title") {
                    let _ = object.insert("title".to_string(), json!(format!("*{}*", title.as_str().unwrap_or_default())));
                }
            }
            schema
        }
    }

    #[test]
    fn test_custom_visitor_rewrites_nested_nodes() {
        let schema = json!({"title": "root", "properties": {"p": {"title": "leaf"}}});
        let expected = json!({"title": "*root*", "properties": {"p": {"title": "*leaf*"}}});
        assert_eq!(RenameTitle.visit(schema), expected);
    }
}
