use crate::helpers::is;
use jsonschema_equivalent_rule_processor_logger::log_processing;
use serde_json::Value;

/// If any member of `oneOf` is a `true` schema then every value validates against that
/// member, which means the whole `oneOf` can never reject a document on its own -- it is
/// dropped entirely rather than simplified to a single member, mirroring how `anyOf`/`allOf`
/// are cleared once an empty-schema member makes them redundant.
#[log_processing(cfg(feature = "logging"))]
pub(crate) fn remove_one_of_if_empty_schema_allowed(schema: &mut Value) -> bool {
    let schema_object = if let Some(value) = schema.as_object_mut() {
        value
    } else {
        return false;
    };

    let should_remove = match schema_object.get("oneOf") {
        Some(Value::Array(items)) => items.iter().any(is::true_schema),
        _ => false,
    };

    if should_remove {
        let _ = schema_object.remove("oneOf");
    }
    should_remove
}
