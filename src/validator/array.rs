//! Array keyword predicates: `items`, `additionalItems`, `minItems`, `maxItems`,
//! `uniqueItems`, `contains` -- spec.md §4.6.1.

use super::{all, indexed_pointer, push_pointer_segment, CompileContext, Predicate};
use crate::{error::CompileError, value::deep_equals};
use serde_json::{Map, Value};
use std::rc::Rc;

pub(super) fn compile(
    ctx: &CompileContext,
    pointer: &str,
    schema_object: &Map<String, Value>,
) -> Result<Predicate, CompileError> {
    let mut predicates = Vec::new();

    if let Some(items_value) = schema_object.get("items") {
        predicates.push(compile_items(
            ctx,
            pointer,
            items_value,
            schema_object.get("additionalItems"),
        )?);
    }
    if let Some(min_items) = schema_object.get("minItems").and_then(Value::as_u64) {
        predicates.push(compile_min_items(min_items));
    }
    if let Some(max_items) = schema_object.get("maxItems").and_then(Value::as_u64) {
        predicates.push(compile_max_items(max_items));
    }
    if schema_object.get("uniqueItems").and_then(Value::as_bool) == Some(true) {
        predicates.push(compile_unique_items());
    }
    if let Some(contains_schema) = schema_object.get("contains") {
        predicates.push(compile_contains(ctx, pointer, contains_schema)?);
    }

    Ok(all(predicates))
}

/// How elements past the end of a positional `items` array are treated.
enum AdditionalItemsPolicy {
    Unconstrained,
    Forbidden,
    Schema(Predicate),
}

fn compile_additional_items_policy(
    ctx: &CompileContext,
    pointer: &str,
    additional_items: Option<&Value>,
) -> Result<AdditionalItemsPolicy, CompileError> {
    match additional_items {
        None | Some(Value::Bool(true)) => Ok(AdditionalItemsPolicy::Unconstrained),
        Some(Value::Bool(false)) => Ok(AdditionalItemsPolicy::Forbidden),
        Some(schema) => Ok(AdditionalItemsPolicy::Schema(ctx.compile_schema(
            &push_pointer_segment(pointer, "additionalItems"),
            schema,
        )?)),
    }
}

fn compile_items(
    ctx: &CompileContext,
    pointer: &str,
    items_value: &Value,
    additional_items: Option<&Value>,
) -> Result<Predicate, CompileError> {
    match items_value {
        Value::Array(positional) => {
            let item_predicates: Vec<Predicate> = positional
                .iter()
                .enumerate()
                .map(|(index, item_schema)| {
                    ctx.compile_schema(&indexed_pointer(pointer, "items", index), item_schema)
                })
                .collect::<Result<_, _>>()?;
            let policy = compile_additional_items_policy(ctx, pointer, additional_items)?;
            Ok(Rc::new(move |value: &Value| match value.as_array() {
                Some(elements) => elements.iter().enumerate().all(|(index, element)| {
                    if let Some(item_predicate) = item_predicates.get(index) {
                        item_predicate(element)
                    } else {
                        match &policy {
                            AdditionalItemsPolicy::Unconstrained => true,
                            AdditionalItemsPolicy::Forbidden => false,
                            AdditionalItemsPolicy::Schema(predicate) => predicate(element),
                        }
                    }
                }),
                None => true,
            }))
        }
        single_schema => {
            let predicate = ctx.compile_schema(&push_pointer_segment(pointer, "items"), single_schema)?;
            Ok(Rc::new(move |value: &Value| match value.as_array() {
                Some(elements) => elements.iter().all(|element| predicate(element)),
                None => true,
            }))
        }
    }
}

fn compile_min_items(min_items: u64) -> Predicate {
    Rc::new(move |value: &Value| match value.as_array() {
        Some(elements) => elements.len() as u64 >= min_items,
        None => true,
    })
}

fn compile_max_items(max_items: u64) -> Predicate {
    Rc::new(move |value: &Value| match value.as_array() {
        Some(elements) => elements.len() as u64 <= max_items,
        None => true,
    })
}

fn compile_unique_items() -> Predicate {
    Rc::new(move |value: &Value| match value.as_array() {
        Some(elements) => {
            for (i, a) in elements.iter().enumerate() {
                for b in &elements[i + 1..] {
                    if deep_equals(a, b) {
                        return false;
                    }
                }
            }
            true
        }
        None => true,
    })
}

fn compile_contains(
    ctx: &CompileContext,
    pointer: &str,
    contains_schema: &Value,
) -> Result<Predicate, CompileError> {
    let predicate = ctx.compile_schema(&push_pointer_segment(pointer, "contains"), contains_schema)?;
    Ok(Rc::new(move |value: &Value| match value.as_array() {
        Some(elements) => elements.iter().any(|element| predicate(element)),
        None => true,
    }))
}

#[cfg(test)]
mod tests {
    use crate::validator::compile;
    use serde_json::json;
    use test_case::test_case;

    // Seed scenario, spec.md §8.
    #[test_case(json!({"uniqueItems": true}), json!([1, 2, 1]) => false)]
    #[test_case(json!({"uniqueItems": true}), json!([1, 2, 3]) => true)]
    #[test_case(json!({"items": {"type": "integer"}}), json!([1, 2, 3]) => true)]
    #[test_case(json!({"items": {"type": "integer"}}), json!([1, "two", 3]) => false)]
    #[test_case(json!({"items": [{"type": "integer"}], "additionalItems": false}), json!([1]) => true)]
    #[test_case(json!({"items": [{"type": "integer"}], "additionalItems": false}), json!([1, "extra"]) => false)]
    #[test_case(json!({"items": [{"type": "integer"}], "additionalItems": {"type": "string"}}), json!([1, "extra"]) => true)]
    #[test_case(json!({"items": [{"type": "integer"}], "additionalItems": {"type": "string"}}), json!([1, 2]) => false)]
    #[test_case(json!({"items": [{"type": "integer"}]}), json!([1, "unconstrained trailing"]) => true)]
    #[test_case(json!({"minItems": 2}), json!([1]) => false)]
    #[test_case(json!({"maxItems": 1}), json!([1, 2]) => false)]
    #[test_case(json!({"contains": {"const": 2}}), json!([1, 2, 3]) => true)]
    #[test_case(json!({"contains": {"const": 9}}), json!([1, 2, 3]) => false)]
    #[test_case(json!({"minItems": 1}), json!("not an array") => true; "vacuously true for non-array instance")]
    fn test_array_keywords(schema: serde_json::Value, instance: serde_json::Value) -> bool {
        compile(&schema)
            .expect("schema compiles")
            .is_valid(&instance)
    }
}
