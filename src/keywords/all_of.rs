use crate::helpers::intersect::{intersection_schema, IntersectStatus};
use crate::helpers::{is, replace, types::PrimitiveTypesBitMap};
use jsonschema_equivalent_rule_processor_logger::log_processing;
use serde_json::Value;

/// Simplify `allOf` keyword by removing it if the union of the listed schemas are equivalent to a `true` schema
/// or replacing the whole schema with a `false` schema if the union of the listed schemas are equivalent to a
/// `false` schema.
#[log_processing(cfg(feature = "logging"))]
pub(crate) fn simplify_all_of(schema: &mut Value) -> bool {
    let schema_object = if let Some(value) = schema.as_object_mut() {
        value
    } else {
        return false;
    };
    let schema_primitive_types = PrimitiveTypesBitMap::from_schema_value(schema_object.get("type"));
    if let Some(Value::Array(items)) = schema_object.get_mut("allOf") {
        let mut updated_schema = false;

        let indexes_to_remove: Vec<_> = items
            .iter()
            .enumerate()
            .filter_map(|(index, subschema)| {
                if is::true_schema(subschema) {
                    Some(index)
                } else {
                    None
                }
            })
            .collect();

        for index_to_remove in indexes_to_remove.iter().rev() {
            let _ = items.remove(*index_to_remove);
        }

        if items.is_empty() {
            if !indexes_to_remove.is_empty() {
                // `allOf` was initially not empty, but we removed some schemas
                let _ = schema_object.remove("allOf");
                return true;
            }
        } else if items.iter().any(is::false_schema) {
            // if there is a `false` schema in `allOf` than is impossible to have any value that would be valid
            // so the overall schema is a `false` schema
            return replace::with_false_schema(schema);
        } else {
            let all_of_primitive_types: Vec<_> = items
                .iter()
                .map(|all_of_schema| {
                    PrimitiveTypesBitMap::from_schema_value(all_of_schema.get("type"))
                })
                .collect();

            let mut defined_types_in_all_of = false;
            let mut common_all_of_primitive_types = schema_primitive_types;

            for primitive_types in &all_of_primitive_types {
                common_all_of_primitive_types = common_all_of_primitive_types & *primitive_types;

                if common_all_of_primitive_types.is_empty() {
                    return replace::with_false_schema(schema);
                }

                if !primitive_types.is_empty() {
                    defined_types_in_all_of = true;
                }
            }

            if !defined_types_in_all_of {
                // Do nothing as no types were defined
            } else if common_all_of_primitive_types.is_empty() {
                // We have types defined, but no types are in common
                // So no value can ever be considered valid, hence a `false` schema as result
                return replace::with_false_schema(schema);
            } else {
                // Update all the types in the `allOf` schemas to contain only the common items
                // This is need to allow next stages (ie. `type` optimisation to remove not needed keyworkds)
                for (all_of_item, all_of_primitive_types) in
                    items.iter_mut().zip(all_of_primitive_types)
                {
                    if all_of_primitive_types != common_all_of_primitive_types {
                        if let Value::Object(all_of_item_schema) = all_of_item {
                            updated_schema |= replace::type_with(
                                all_of_item_schema,
                                common_all_of_primitive_types,
                            )
                        }
                    }
                }
            }
        }
        updated_schema
    } else {
        false
    }
}

/// Flatten all the possible keywords of the `allOf` schemas into the main schema.
///
/// The flattening process does remove the common keywords from the `allOf` schemas
#[log_processing(cfg(feature = "logging"))]
pub(crate) fn flatten_all_of(schema: &mut Value) -> bool {
    let schema_object = if let Some(value) = schema.as_object_mut() {
        value
    } else {
        return false;
    };

    // The clone is not nice but I found no way around the borrow checker that allows to
    // hold a mutable and immutable  reference to the same object.
    // Using `unsafe` might be an approach, but for now I'm focusing on the functionality
    // rather than performance
    let mut schema_clone = Value::Object(schema_object.clone());
    let mut schema_mut_ref = &mut schema_clone;

    if let Some(Value::Array(all_of_items)) = schema_object.get_mut("allOf") {
        let mut updated_schema = false;
        let mut all_of_indexes_to_remove = Vec::<usize>::new();

        for (index, all_of_item) in all_of_items.iter().enumerate() {
            if is::only_populated_field(all_of_item, "allOf") {
                // A member that is itself just a nested `allOf` wrapper is left for
                // `promote_only_all_of_in_all_of` to splice in place -- folding it in here
                // would merge its `allOf` array with the parent's own `allOf` keyword
                // (the very array this item lives in), which is not a real intersection.
                continue;
            }
            // TODO: intersection_schema should provide info around modifications happened to schema
            match intersection_schema(schema_mut_ref, all_of_item) {
                IntersectStatus::Complete {
                    schema,
                    updated_schema: updated_schema_by_intersection,
                } => {
                    updated_schema |= updated_schema_by_intersection;
                    all_of_indexes_to_remove.push(index);
                    schema_mut_ref = schema;
                }
                IntersectStatus::Partial {
                    schema,
                    updated_schema: updated_schema_by_intersection,
                } => {
                    updated_schema |= updated_schema_by_intersection;
                    schema_mut_ref = schema;
                }
            };
        }

        let updated_schema = if all_of_indexes_to_remove.len() == all_of_items.len() {
            let _ = std::mem::replace(schema, schema_clone);
            if let Value::Object(schema_object) = schema {
                let _ = schema_object.remove("allOf");
            }
            return true;
        } else if all_of_indexes_to_remove.is_empty() {
            updated_schema
        } else {
            for index_to_remove in all_of_indexes_to_remove.iter().rev() {
                let _ = all_of_items.remove(*index_to_remove);
            }
            true
        };
        if updated_schema {
            let _ = std::mem::replace(schema, schema_clone);
        }
        updated_schema
    } else {
        false
    }
}

/// Promotes the contents of an `allOf` member whose only populated field is itself an
/// `allOf` into the parent `allOf` -- `{"allOf": [{"allOf": [A, B]}]}` becomes
/// `{"allOf": [A, B]}`, saving a level of nesting that `flatten_all_of` would otherwise
/// never collapse (it merges keywords, not bare `allOf` wrappers).
#[log_processing(cfg(feature = "logging"))]
pub(crate) fn promote_only_all_of_in_all_of(schema: &mut Value) -> bool {
    let schema_object = if let Some(value) = schema.as_object_mut() {
        value
    } else {
        return false;
    };

    if let Some(Value::Array(items)) = schema_object.get_mut("allOf") {
        let mut updated_schema = false;
        let mut index = 0;
        while index < items.len() {
            let nested_all_of = if is::only_populated_field(&items[index], "allOf") {
                items[index]
                    .as_object_mut()
                    .and_then(|obj| obj.remove("allOf"))
                    .and_then(|value| {
                        if let Value::Array(nested) = value {
                            Some(nested)
                        } else {
                            None
                        }
                    })
            } else {
                None
            };

            if let Some(nested_items) = nested_all_of {
                let _ = items.remove(index);
                let nested_len = nested_items.len();
                for (offset, nested_item) in nested_items.into_iter().enumerate() {
                    items.insert(index + offset, nested_item);
                }
                index += nested_len;
                updated_schema = true;
            } else {
                index += 1;
            }
        }
        updated_schema
    } else {
        false
    }
}

/// If the parent schema has an empty `oneOf`, a single `allOf` member, and that member's
/// only populated field is `oneOf`, lift the member's `oneOf` up into the parent and drop
/// `allOf` -- `{"oneOf": [], "allOf": [{"oneOf": [A, B]}]}` becomes `{"oneOf": [A, B]}`.
#[log_processing(cfg(feature = "logging"))]
pub(crate) fn promote_all_of_with_one_of_to_one_of_if_one_of_is_empty(schema: &mut Value) -> bool {
    let schema_object = if let Some(value) = schema.as_object_mut() {
        value
    } else {
        return false;
    };

    let one_of_is_empty = matches!(schema_object.get("oneOf"), Some(Value::Array(items)) if items.is_empty());
    if !one_of_is_empty {
        return false;
    }

    let can_promote = match schema_object.get("allOf") {
        Some(Value::Array(items)) => {
            items.len() == 1 && is::only_populated_field(&items[0], "oneOf")
        }
        _ => false,
    };
    if !can_promote {
        return false;
    }

    if let Some(Value::Array(mut items)) = schema_object.remove("allOf") {
        if let Some(Value::Object(mut member)) = items.pop() {
            if let Some(one_of) = member.remove("oneOf") {
                let _ = schema_object.insert("oneOf".to_string(), one_of);
                return true;
            }
        }
    }
    false
}

/// When the parent schema's `type` is set, drop `allOf` members whose only populated
/// field is a `type` identical to the parent's -- such a member adds no restriction.
#[log_processing(cfg(feature = "logging"))]
pub(crate) fn remove_type_only_all_of_if_parent_is_same(schema: &mut Value) -> bool {
    let schema_object = if let Some(value) = schema.as_object_mut() {
        value
    } else {
        return false;
    };

    let parent_type = schema_object.get("type").cloned();
    let parent_type = if let Some(parent_type) = parent_type {
        parent_type
    } else {
        return false;
    };

    if let Some(Value::Array(items)) = schema_object.get_mut("allOf") {
        let original_len = items.len();
        items.retain(|item| {
            !(is::only_populated_field(item, "type") && item.get("type") == Some(&parent_type))
        });
        let updated_schema = items.len() != original_len;
        if updated_schema && items.is_empty() {
            let _ = schema_object.remove("allOf");
        }
        updated_schema
    } else {
        false
    }
}
