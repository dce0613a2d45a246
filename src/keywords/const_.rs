use crate::{
    helpers::{replace, types::PrimitiveTypesBitMap},
    primitive_type::PrimitiveType,
};
use jsonschema_equivalent_rule_processor_logger::log_processing;
use serde_json::Value;

/// Simplify a schema containing `const` keywords.
/// The simplifications include:
/// * removing types that are not in sync with the type of the `const` value
/// * if no types are left after previous removal, then the `schema` is a `false` schema
#[log_processing(cfg(feature = "logging"))]
pub(crate) fn simple_const_cleanup(schema: &mut Value) -> bool {
    let schema_object = if let Some(value) = schema.as_object_mut() {
        value
    } else {
        return false;
    };

    if let Some(const_value) = schema_object.get("const") {
        let schema_primitive_types =
            PrimitiveTypesBitMap::from_schema_value(schema_object.get("type"));
        if schema_primitive_types.is_empty() {
            // As we don't have `type` keyword defined we cannot really do simplifications
            return false;
        }

        let const_primitive_type = PrimitiveType::from_serde_value(const_value);
        if schema_primitive_types.contains(const_primitive_type) {
            replace::type_with(
                schema_object,
                PrimitiveTypesBitMap::from_primitive_type(const_primitive_type),
            )
        } else if const_primitive_type == PrimitiveType::Number
            && schema_primitive_types.contains(PrimitiveType::Integer)
        {
            // This additional case is needed because `PrimitiveType::from_serde_value` does not report `PrimitiveType::Integer`. Check the method doc for more info
            replace::type_with(
                schema_object,
                PrimitiveTypesBitMap::from_primitive_type(PrimitiveType::Integer),
            )
        } else {
            replace::with_false_schema(schema)
        }
    } else {
        false
    }
}

/// Removes the `enum` keyword when `const` is also present, `enum` has more than one
/// member and `const`'s value is among them — `const` alone is already the tighter
/// restriction, so keeping both is redundant.
#[log_processing(cfg(feature = "logging"))]
pub(crate) fn remove_enum_if_const(schema: &mut Value) -> bool {
    let schema_object = if let Some(value) = schema.as_object_mut() {
        value
    } else {
        return false;
    };

    let should_remove = match (schema_object.get("const"), schema_object.get("enum")) {
        (Some(const_value), Some(Value::Array(enum_values))) => {
            enum_values.len() > 1 && enum_values.contains(const_value)
        }
        _ => false,
    };

    if should_remove {
        let _ = schema_object.remove("enum");
    }
    should_remove
}

#[cfg(test)]
mod tests {
    use super::{remove_enum_if_const, simple_const_cleanup};
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(json!({}) => json!({}))]
    #[test_case(json!({"const": []}) => json!({"const": [], "type": "array"}))]
    #[test_case(json!({"const": 1}) => json!({"const": 1, "type": "number"}))]
    #[test_case(json!({"const": true, "type": "boolean"}) => json!({"const": true, "type": "boolean"}))]
    #[test_case(json!({"const": "string", "type": "boolean"}) => json!(false))]
    #[test_case(json!({"const": "some-text", "type": ["boolean", "string"]}) => json!({"const": "some-text", "type": "string"}))]
    #[test_case(json!({"const": 1, "type": "integer"}) => json!({"const": 1, "type": "integer"}))]
    #[test_case(json!({"const": 1, "type": "number"}) => json!({"const": 1, "type": "number"}))]
    #[test_case(json!({"const": 1, "type": ["array", "integer"]}) => json!({"const": 1, "type": "integer"}))]
    #[test_case(json!({"const": 1, "type": ["array", "number"]}) => json!({"const": 1, "type": "number"}))]
    fn test_simple_const_cleanup(mut schema: Value) -> Value {
        crate::init_logger();
        let _ = simple_const_cleanup(&mut schema);
        schema
    }

    #[test_case(json!({"const": 1, "enum": [1, 2]}) => json!({"const": 1}))]
    #[test_case(json!({"const": 1, "enum": [1]}) => json!({"const": 1, "enum": [1]}); "single member enum is left untouched")]
    #[test_case(json!({"const": 1, "enum": [2, 3]}) => json!({"const": 1, "enum": [2, 3]}); "const not in enum is left untouched")]
    #[test_case(json!({"enum": [1, 2]}) => json!({"enum": [1, 2]}); "no const present")]
    fn test_remove_enum_if_const(mut schema: Value) -> Value {
        crate::init_logger();
        let _ = remove_enum_if_const(&mut schema);
        schema
    }
}
