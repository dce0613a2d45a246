//! Object keyword predicates: `properties`, `patternProperties`, `additionalProperties`,
//! `propertyNames`, `required`, `minProperties`, `maxProperties`, `dependencies` --
//! spec.md §4.6.1.

use super::{all, push_pointer_segment, CompileContext, Predicate};
use crate::error::{CompileError, SchemaConstructionError};
use serde_json::{Map, Value};
use std::rc::Rc;

pub(super) fn compile(
    ctx: &CompileContext,
    pointer: &str,
    schema_object: &Map<String, Value>,
) -> Result<Predicate, CompileError> {
    let mut predicates = vec![compile_properties_block(ctx, pointer, schema_object)?];

    if let Some(property_names_schema) = schema_object.get("propertyNames") {
        predicates.push(compile_property_names(ctx, pointer, property_names_schema)?);
    }
    if let Some(Value::Array(required)) = schema_object.get("required") {
        predicates.push(compile_required(required));
    }
    if let Some(min_properties) = schema_object.get("minProperties").and_then(Value::as_u64) {
        predicates.push(compile_min_properties(min_properties));
    }
    if let Some(max_properties) = schema_object.get("maxProperties").and_then(Value::as_u64) {
        predicates.push(compile_max_properties(max_properties));
    }
    if let Some(Value::Object(dependencies)) = schema_object.get("dependencies") {
        predicates.push(compile_dependencies(ctx, pointer, dependencies)?);
    }

    Ok(all(predicates))
}

/// Leftover-element policy for keys matched by neither `properties` nor
/// `patternProperties`.
enum AdditionalPropertiesPolicy {
    Unconstrained,
    Forbidden,
    Schema(Predicate),
}

fn compile_additional_properties_policy(
    ctx: &CompileContext,
    pointer: &str,
    additional_properties: Option<&Value>,
) -> Result<AdditionalPropertiesPolicy, CompileError> {
    match additional_properties {
        None | Some(Value::Bool(true)) => Ok(AdditionalPropertiesPolicy::Unconstrained),
        Some(Value::Bool(false)) => Ok(AdditionalPropertiesPolicy::Forbidden),
        Some(schema) => Ok(AdditionalPropertiesPolicy::Schema(ctx.compile_schema(
            &push_pointer_segment(pointer, "additionalProperties"),
            schema,
        )?)),
    }
}

/// `properties`, `patternProperties` and `additionalProperties` are compiled together
/// because `additionalProperties` needs to know which keys the other two already
/// claimed before it can decide which keys are "leftover".
fn compile_properties_block(
    ctx: &CompileContext,
    pointer: &str,
    schema_object: &Map<String, Value>,
) -> Result<Predicate, CompileError> {
    let properties: Vec<(String, Predicate)> = match schema_object.get("properties") {
        Some(Value::Object(properties)) => properties
            .iter()
            .map(|(name, subschema)| {
                let child_pointer = push_pointer_segment(&push_pointer_segment(pointer, "properties"), name);
                Ok((name.clone(), ctx.compile_schema(&child_pointer, subschema)?))
            })
            .collect::<Result<_, CompileError>>()?,
        _ => Vec::new(),
    };

    let pattern_properties: Vec<(regex::Regex, Predicate)> = match schema_object.get("patternProperties") {
        Some(Value::Object(pattern_properties)) => pattern_properties
            .iter()
            .map(|(pattern, subschema)| {
                let regex = regex::Regex::new(pattern).map_err(|source| SchemaConstructionError::InvalidPattern {
                    keyword: format!("patternProperties/{pattern}"),
                    source,
                })?;
                let child_pointer =
                    push_pointer_segment(&push_pointer_segment(pointer, "patternProperties"), pattern);
                Ok((regex, ctx.compile_schema(&child_pointer, subschema)?))
            })
            .collect::<Result<_, CompileError>>()?,
        _ => Vec::new(),
    };

    let additional_properties =
        compile_additional_properties_policy(ctx, pointer, schema_object.get("additionalProperties"))?;

    Ok(Rc::new(move |value: &Value| match value.as_object() {
        Some(object) => {
            for (name, predicate) in &properties {
                if let Some(property_value) = object.get(name) {
                    if !predicate(property_value) {
                        return false;
                    }
                }
            }
            for (regex, predicate) in &pattern_properties {
                for (key, property_value) in object {
                    if regex.is_match(key) && !predicate(property_value) {
                        return false;
                    }
                }
            }
            for (key, property_value) in object {
                let claimed = properties.iter().any(|(name, _)| name == key)
                    || pattern_properties.iter().any(|(regex, _)| regex.is_match(key));
                if claimed {
                    continue;
                }
                match &additional_properties {
                    AdditionalPropertiesPolicy::Unconstrained => {}
                    AdditionalPropertiesPolicy::Forbidden => return false,
                    AdditionalPropertiesPolicy::Schema(predicate) => {
                        if !predicate(property_value) {
                            return false;
                        }
                    }
                }
            }
            true
        }
        None => true,
    }))
}

fn compile_property_names(
    ctx: &CompileContext,
    pointer: &str,
    property_names_schema: &Value,
) -> Result<Predicate, CompileError> {
    let predicate = ctx.compile_schema(&push_pointer_segment(pointer, "propertyNames"), property_names_schema)?;
    Ok(Rc::new(move |value: &Value| match value.as_object() {
        Some(object) => object
            .keys()
            .all(|key| predicate(&Value::String(key.clone()))),
        None => true,
    }))
}

fn compile_required(required: &[Value]) -> Predicate {
    let names: Vec<String> = required
        .iter()
        .filter_map(|name| name.as_str().map(str::to_string))
        .collect();
    Rc::new(move |value: &Value| match value.as_object() {
        Some(object) => names.iter().all(|name| object.contains_key(name)),
        None => true,
    })
}

fn compile_min_properties(min_properties: u64) -> Predicate {
    Rc::new(move |value: &Value| match value.as_object() {
        Some(object) => object.len() as u64 >= min_properties,
        None => true,
    })
}

fn compile_max_properties(max_properties: u64) -> Predicate {
    Rc::new(move |value: &Value| match value.as_object() {
        Some(object) => object.len() as u64 <= max_properties,
        None => true,
    })
}

/// A `dependencies` entry is either a list of required sibling property names, or a
/// whole-object schema the instance must additionally satisfy.
enum DependencyKind {
    Names(Vec<String>),
    Schema(Predicate),
}

fn compile_dependencies(
    ctx: &CompileContext,
    pointer: &str,
    dependencies: &Map<String, Value>,
) -> Result<Predicate, CompileError> {
    let compiled: Vec<(String, DependencyKind)> = dependencies
        .iter()
        .map(|(key, dependency)| {
            let kind = match dependency {
                Value::Array(names) => DependencyKind::Names(
                    names
                        .iter()
                        .filter_map(|name| name.as_str().map(str::to_string))
                        .collect(),
                ),
                schema => {
                    let child_pointer = push_pointer_segment(&push_pointer_segment(pointer, "dependencies"), key);
                    DependencyKind::Schema(ctx.compile_schema(&child_pointer, schema)?)
                }
            };
            Ok((key.clone(), kind))
        })
        .collect::<Result<Vec<_>, CompileError>>()?;

    Ok(Rc::new(move |value: &Value| match value.as_object() {
        Some(object) => compiled.iter().all(|(key, kind)| {
            if !object.contains_key(key) {
                return true;
            }
            match kind {
                DependencyKind::Names(names) => names.iter().all(|name| object.contains_key(name)),
                DependencyKind::Schema(predicate) => predicate(value),
            }
        }),
        None => true,
    }))
}
