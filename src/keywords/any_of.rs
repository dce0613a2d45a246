use crate::helpers::{types::get_primitive_types, is, replace};
use jsonschema_equivalent_rule_processor_logger::log_processing;
use serde_json::Value;

/// Simplify `anyOf` keyword by removing it if the union of the listed schemas are equivalent to a `true` schema
/// or replacing the whole schema with a `false` schema if the union of the listed schemas are equivalent to a
/// `false` schema.
#[log_processing(cfg(feature = "logging"))]
pub(crate) fn simplify_any_of(schema: &mut Value) -> bool {
    let schema_object = if let Some(value) = schema.as_object_mut() {
        value
    } else {
        return false;
    };

    let schema_primitive_types = get_primitive_types(schema_object.get("type"));
    if let Some(Value::Array(items)) = schema_object.get_mut("anyOf") {
        let indexes_to_remove: Vec<_> = items
            .iter()
            .enumerate()
            .filter_map(|(index, subschema)| {
                if is::false_schema(subschema) {
                    Some(index)
                } else if schema_primitive_types.intersection(&get_primitive_types(subschema.get("type"))).next().is_some() {
                    None
                } else {
                    // index has to be removed as the any_of item has incompatible type with schema, so it will never be valid
                    Some(index)
                }
            })
            .collect();

        for index_to_remove in indexes_to_remove.iter().rev() {
            let _ = items.remove(*index_to_remove);
        }

        if items.is_empty() {
            if !indexes_to_remove.is_empty() {
                // `anyOf` was initially composed only by false schemas, so it's is a false schema
                return replace::with_false_schema(schema);
            }
        } else if items.iter().any(is::true_schema) {
            // if there is a `true` schema in `anyOf` than `anyOf` is not adding schema restrictions
            // so the overall schema is equivalent to the schema without `anyOf`
            let _ = schema_object.remove("anyOf");
            return true;
        }
    }
    false
}
