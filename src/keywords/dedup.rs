use jsonschema_equivalent_rule_processor_logger::log_processing;
use serde_json::Value;

/// Remove duplicate entries (under structural equality) from the array found at
/// `schema[keyword]`, preserving the order of first occurrence.
fn deduplicate_array_keyword(schema: &mut Value, keyword: &str) -> bool {
    let schema_object = if let Some(value) = schema.as_object_mut() {
        value
    } else {
        return false;
    };
    if let Some(Value::Array(items)) = schema_object.get_mut(keyword) {
        let original_len = items.len();
        let mut seen: Vec<Value> = Vec::with_capacity(items.len());
        items.retain(|item| {
            if seen.contains(item) {
                false
            } else {
                seen.push(item.clone());
                true
            }
        });
        items.len() != original_len
    } else {
        false
    }
}

/// Removes duplicate members of `allOf`, preserving first-occurrence order
#[log_processing(cfg(feature = "logging"))]
pub(crate) fn remove_duplicate_all_of(schema: &mut Value) -> bool {
    deduplicate_array_keyword(schema, "allOf")
}

/// Removes duplicate members of `anyOf`, preserving first-occurrence order
#[log_processing(cfg(feature = "logging"))]
pub(crate) fn remove_duplicate_any_of(schema: &mut Value) -> bool {
    deduplicate_array_keyword(schema, "anyOf")
}

/// Removes duplicate members of `oneOf`, preserving first-occurrence order
#[log_processing(cfg(feature = "logging"))]
pub(crate) fn remove_duplicate_one_of(schema: &mut Value) -> bool {
    deduplicate_array_keyword(schema, "oneOf")
}

/// Removes duplicate members of `enum`, preserving first-occurrence order
#[log_processing(cfg(feature = "logging"))]
pub(crate) fn remove_duplicate_enum(schema: &mut Value) -> bool {
    deduplicate_array_keyword(schema, "enum")
}

#[cfg(test)]
mod tests {
    use super::{
        remove_duplicate_all_of, remove_duplicate_any_of, remove_duplicate_enum,
        remove_duplicate_one_of,
    };
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(json!({"allOf": [{"type": "string"}, {"type": "string"}]}) => json!({"allOf": [{"type": "string"}]}))]
    #[test_case(json!({"allOf": [{"type": "string"}, {"type": "integer"}]}) => json!({"allOf": [{"type": "string"}, {"type": "integer"}]}))]
    #[test_case(json!({"allOf": [1, 1.0]}) => json!({"allOf": [1, 1.0]}); "integer and float tags are distinct")]
    fn test_remove_duplicate_all_of(mut schema: Value) -> Value {
        crate::init_logger();
        let _ = remove_duplicate_all_of(&mut schema);
        schema
    }

    #[test_case(json!({"anyOf": [{"type": "string"}, {"type": "string"}]}) => json!({"anyOf": [{"type": "string"}]}))]
    fn test_remove_duplicate_any_of(mut schema: Value) -> Value {
        crate::init_logger();
        let _ = remove_duplicate_any_of(&mut schema);
        schema
    }

    #[test_case(json!({"oneOf": [{"type": "string"}, {"type": "string"}]}) => json!({"oneOf": [{"type": "string"}]}))]
    fn test_remove_duplicate_one_of(mut schema: Value) -> Value {
        crate::init_logger();
        let _ = remove_duplicate_one_of(&mut schema);
        schema
    }

    #[test_case(json!({"enum": [1, 2, 2, 3]}) => json!({"enum": [1, 2, 3]}))]
    #[test_case(json!({"enum": ["a", "a", "b"]}) => json!({"enum": ["a", "b"]}))]
    fn test_remove_duplicate_enum(mut schema: Value) -> Value {
        crate::init_logger();
        let _ = remove_duplicate_enum(&mut schema);
        schema
    }
}
