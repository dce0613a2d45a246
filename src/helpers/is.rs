use serde_json::Value;

/// Checks if the input schema is a `false` schema
#[inline]
pub(crate) fn false_schema(schema: &Value) -> bool {
    match schema {
        Value::Bool(false) => true,
        _ => false,
    }
}

/// Checks if the input schema is a `true` schema
#[inline]
pub(crate) fn true_schema(schema: &Value) -> bool {
    match schema {
        Value::Bool(true) => true,
        Value::Object(obj) if obj.is_empty() => true,
        _ => false,
    }
}

/// Checks if `schema` is a JSON object whose only populated field is `field`
///
/// Used by the `allOf`/`oneOf` promotion rules: a schema such as
/// `{"allOf": [...]}` has its "only populated field" be `allOf`.
#[inline]
pub(crate) fn only_populated_field(schema: &Value, field: &str) -> bool {
    match schema {
        Value::Object(obj) => obj.len() == 1 && obj.contains_key(field),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{false_schema, only_populated_field, true_schema};
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!({}) => false)]
    #[test_case(&json!({"type": "string"}) => false)]
    #[test_case(&json!(false) => true)]
    #[test_case(&json!(true) => false)]
    fn test_false_schema(schema: &Value) -> bool {
        false_schema(schema)
    }

    #[test_case(&json!({}) => true)]
    #[test_case(&json!({"type": "string"}) => false)]
    #[test_case(&json!(false) => false)]
    #[test_case(&json!(true) => true)]
    fn test_true_schema(schema: &Value) -> bool {
        true_schema(schema)
    }

    #[test_case(&json!({"allOf": []}), "allOf" => true)]
    #[test_case(&json!({"allOf": [], "type": "string"}), "allOf" => false)]
    #[test_case(&json!({}), "allOf" => false)]
    #[test_case(&json!(true), "allOf" => false)]
    fn test_only_populated_field(schema: &Value, field: &str) -> bool {
        only_populated_field(schema, field)
    }
}
