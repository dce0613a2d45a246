use crate::helpers::types::PrimitiveTypesBitMap;

use serde_json::{map::Entry, Map, Value};

use std::mem::replace;

/// Replace the `schema` with `false`.
/// The method returns true if a schema modification occurred. // FIXME
///
/// The objective of the method is to limit as much as possible the exposure
/// to more memory involved memory-related APIs.
/// Using `std::mem::replace` ensures that the value stored in `schema` is dropped
/// once leaving the scope of the method
#[inline]
pub(crate) fn with_false_schema(schema: &mut Value) -> bool {
    if schema == &Value::Bool(false) {
        false
    } else {
        let _ = replace(schema, Value::Bool(false));
        true
    }
}

/// Replace the `schema` with `true`.
/// The method returns true if a schema modification occurred. // FIXME
///
/// The objective of the method is to limit as much as possible the exposure
/// to more memory involved memory-related APIs.
/// Using `std::mem::replace` ensures that the value stored in `schema` is dropped
/// once leaving the scope of the method
#[inline]
pub(crate) fn with_true_schema(schema: &mut Value) -> bool {
    if schema == &Value::Bool(true) {
        false
    } else {
        let _ = replace(schema, Value::Bool(true));
        true
    }
}

/// Replace/Define the `type` keyword into the `schema`
/// The method returns true if a schema modification occurred.
///
/// The method is intended to simplify `type` keyword editing (the most commonly
/// performed) operation without duplicating a lot of logic
#[inline]
pub(crate) fn type_with(
    schema_object: &mut Map<String, Value>,
    primitive_types: PrimitiveTypesBitMap,
) -> bool {
    match schema_object.entry("type") {
        Entry::Vacant(entry) => {
            if let Some(json_primitive_types) = primitive_types.to_schema_value() {
                let _ = entry.insert(json_primitive_types);
                true
            } else {
                false
            }
        }
        Entry::Occupied(mut entry) => {
            if let Some(json_primitive_types) = primitive_types.to_schema_value() {
                let previous_value = entry.insert(json_primitive_types.clone());
                previous_value != json_primitive_types
            } else {
                let _ = entry.remove();
                true
            }
        }
    }
}
