use crate::helpers::{
    common_values_and_deduplicate, join_and_deduplicate, replace, types::PrimitiveTypesBitMap,
};
use serde_json::{map::Entry, Map, Value};
use std::ops::Deref;
use std::ops::DerefMut;

#[allow(dead_code)]
#[derive(Debug)]
pub(crate) enum IntersectStatus<'s> {
    /// The updated `schema` fully includes the JSON Schema limitations imposed by `other_schema`
    Complete {
        schema: &'s mut Value,
        updated_schema: bool,
    },
    /// The updated `schema` partially includes the JSON Schema limitations imposed by `other_schema`
    /// This means that `other_schema` cannot be removed without altering the JSON Schema itself
    Partial {
        schema: &'s mut Value,
        updated_schema: bool,
    },
}

impl Deref for IntersectStatus<'_> {
    type Target = Value;
    fn deref(&self) -> &Self::Target {
        match self {
            Self::Complete { schema, .. } | Self::Partial { schema, .. } => schema,
        }
    }
}

impl DerefMut for IntersectStatus<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Self::Complete { schema, .. } | Self::Partial { schema, .. } => schema,
        }
    }
}

impl IntersectStatus<'_> {
    fn is_schema_updated(&self) -> bool {
        match self {
            Self::Complete { updated_schema, .. } | Self::Partial { updated_schema, .. } => {
                *updated_schema
            }
        }
    }
}

static DEFFERRED_KEYWORDS: &[&str] = &[
    "additionalItems",
    "additionalProperties",
    "items",
    "patternProperties",
    "properties",
];

/// Handle the intersection of schemas focusing only on `items` and `additionalItems` keywords
fn handle_items_related_keywords(
    _schema_object: &mut Map<String, Value>,
    _other_schema: &Map<String, Value>,
) -> bool {
    false
}

/// Handle the intersection of schemas focusing only on `properties`, `additionalProperties` and `patternProperties` keywords
fn handle_properties_related_keywords(
    _schema_object: &mut Map<String, Value>,
    _other_schema: &Map<String, Value>,
) -> bool {
    false
}

/// Intesection of `schema` with `other_schema`.
/// The method is currently not covering all the possible cases, but the one that are covered are _hopefully_ correct and tested.
///
/// WARNINGs:
///     * The operation is done in-place within `schema`, so if you need `schema` to be left untouched ensure to pass a clone ;)
///     * The method might not be able to merge in `schema` all the restrictions imposed by `other_schema`.
///       This might happen because the logic has not been fully implemented yet as well as it is just not possible (`oneOf` for example cannot be merged).
///       For this reason you should check if the result is `IntersectStatus::Complete` or `IntersectStatus::Partial`.
#[allow(dead_code)]
// The method body is very long, but I do argue that it is very simple to follow and creating helper methods would make understanding even harder
#[allow(clippy::too_many_lines)]
pub(crate) fn intersection_schema<'s>(
    schema: &'s mut Value,
    other_schema: &Value,
) -> IntersectStatus<'s> {
    let other_schema_object = match other_schema {
        Value::Object(map) => map,
        Value::Bool(false) => {
            // if `other_schema` is a `false` schema then regrdless of `schema` all the values will be invalid. So the resulting schema is a `false` schema
            let _ = replace::with_false_schema(schema);
            return IntersectStatus::Complete {
                schema,
                updated_schema: true,
            };
        }
        _ => {
            // if `other_schema` is a `true` schema then only `schema` will contribute to validation constraints
            // otherwise `other_schema` is not really a schema, so nothing to be intersected
            return IntersectStatus::Complete {
                schema,
                updated_schema: false,
            };
        }
    };
    let schema_object = match schema {
        Value::Object(map) => map,
        Value::Bool(true) => {
            // if `self` is a `true` schema then only `other_schema` will contribute to validation constraints
            let _ = std::mem::replace(schema, other_schema.clone());
            return IntersectStatus::Complete {
                schema,
                updated_schema: true,
            };
        }
        _ => {
            // if `self` is a `false` schema then regrdless of `other` all the values will be invalid
            // otherwise `schema` is not really a schema, so nothing to be intersected
            return IntersectStatus::Complete {
                schema,
                updated_schema: false,
            };
        }
    };

    let mut is_complete_intersection = true;
    let mut updated_schema = false;

    for (key, other_value) in other_schema_object {
        if DEFFERRED_KEYWORDS.contains(&key.as_str()) {
            // `handle_items_related_keywords`/`handle_properties_related_keywords` are the
            // only code that may fold these in, and both are stubs today -- so a sibling
            // defining one of them is never actually merged here. Leaving
            // `is_complete_intersection` at its default would misreport this as a Complete
            // intersection and let `flatten_all_of` drop the sibling as if it had been
            // absorbed, silently discarding its constraint.
            is_complete_intersection = false;
            continue;
        }
        match schema_object.entry(key) {
            Entry::Vacant(entry) => {
                if matches!(
                    entry.key().as_str(),
                    "allOf"
                        | "required"
                        | "contains"
                        | "propertyNames"
                        | "enum"
                        | "exclusiveMaximum"
                        | "maxItems"
                        | "maxLength"
                        | "maxProperties"
                        | "maximum"
                        | "exclusiveMinimum"
                        | "minItems"
                        | "minLength"
                        | "minProperties"
                        | "minimum"
                        | "type"
                        | "uniqueItems"
                ) {
                    // These are the keywords for which the `Entry::Occupied` arm below knows
                    // how to merge two sibling values together (array join, numeric bound,
                    // type-set intersection, ...), so importing a single sibling's value now
                    // is just seeding that merge for whichever later sibling defines it too.
                    let _ = entry.insert(other_value.clone());
                    updated_schema = true;
                } else {
                    // Every other keyword (`const`, `format`, annotations like `title`, ...)
                    // has no such merge: importing it from a single sibling would make it
                    // (incorrectly) binding on every other, unrelated sibling folded in
                    // afterwards -- e.g. folding `{"const": "F"}` in first would make a
                    // later `{"const": "B"}` sibling look like a conflict with it, when the
                    // two are just independent, equally-unmergeable members.
                    is_complete_intersection = false;
                }
            }
            Entry::Occupied(mut entry) => {
                let schema_value = entry.get_mut();
                if schema_value != other_value {
                    // Schema had the key, so we need to decide how to "merge" `schema_value` with `other_value`
                    // NOTE: We might decide to not merge in certain keys!
                    match key.as_ref() {
                        "allOf" | "required" => {
                            if let (Value::Array(schema_items), Value::Array(other_items)) =
                                (schema_value, other_value)
                            {
                                updated_schema |= join_and_deduplicate(schema_items, other_items);
                            }
                        }
                        "const" | "contentEncoding" | "contentMediaType" | "format" => {
                            if schema_value != other_value {
                                let _ = replace::with_false_schema(schema);
                                return IntersectStatus::Complete {
                                    schema,
                                    updated_schema: true,
                                };
                            }
                        }
                        "contains" | "propertyNames" => {
                            updated_schema |=
                                intersection_schema(schema_value, other_value).is_schema_updated();
                        }
                        "enum" => {
                            if let (Value::Array(schema_items), Value::Array(other_items)) =
                                (schema_value, other_value)
                            {
                                updated_schema |=
                                    common_values_and_deduplicate(schema_items, other_items);
                                if schema_items.is_empty() {
                                    let _ = replace::with_false_schema(schema);
                                    return IntersectStatus::Complete {
                                        schema,
                                        updated_schema: true,
                                    };
                                }
                            };
                        }
                        "exclusiveMaximum" | "maxItems" | "maxLength" | "maxProperties"
                        | "maximum" => {
                            if other_value.as_f64() < schema_value.as_f64() {
                                let _ = entry.insert(other_value.clone());
                                updated_schema |= true;
                            }
                        }
                        "exclusiveMinimum" | "minItems" | "minLength" | "minProperties"
                        | "minimum" => {
                            if other_value.as_f64() > schema_value.as_f64() {
                                let _ = entry.insert(other_value.clone());
                                updated_schema |= true;
                            }
                        }
                        "type" => {
                            let schema_primitive_types =
                                PrimitiveTypesBitMap::from_schema_value(schema_object.get("type"));
                            let other_primitive_types = PrimitiveTypesBitMap::from_schema_value(
                                other_schema_object.get("type"),
                            );

                            let final_primiive_types =
                                schema_primitive_types & other_primitive_types;
                            if schema_primitive_types != final_primiive_types {
                                updated_schema = true;
                                if !replace::type_with(schema_object, final_primiive_types)
                                    || schema_object.get("type") == None
                                {
                                    let _ = replace::with_false_schema(schema);
                                    return IntersectStatus::Complete {
                                        schema,
                                        updated_schema: true,
                                    };
                                }
                            }
                        }
                        "uniqueItems" => {
                            if &Value::Bool(true) == other_value {
                                let old_value = entry.insert(Value::Bool(true));
                                updated_schema |= old_value != Value::Bool(true);
                            }
                        }

                        "additionalItems"
                        | "additionalProperties"
                        | "items"
                        | "patternProperties"
                        | "properties " => {
                            // Deferred to `handle_items_related_keywords` or `handle_properties_related_keywords`
                        }

                        // Keywords for which we have not tried to implement the intersection logic
                        "anyOf" | "dependencies" | "else" | "if" | "multipleOf" | "not"
                        | "oneOf" | "pattern" | "then" => {
                            is_complete_intersection = false;
                        }

                        // TODO: Propose implementation for properties
                        //  properties could eventually be "merged" but depends on the presence/absence of additionalProperties/patternProperties
                        //  * if no additionalProperties/patternProperties are defined (or is true schema) then just merge properties
                        //  * if additionalProperties are defined and the intersection of the schemas is not a `false` schema and no patternProperties are defined
                        _ => {
                            log::debug!("Unrecognized keyword: {}", key);
                            is_complete_intersection = false;
                        }
                    }
                }
            }
        };
    }

    updated_schema |= handle_items_related_keywords(schema_object, other_schema_object);
    updated_schema |= handle_properties_related_keywords(schema_object, other_schema_object);

    if is_complete_intersection {
        IntersectStatus::Complete {
            schema,
            updated_schema,
        }
    } else {
        IntersectStatus::Partial {
            schema,
            updated_schema,
        }
    }
}
