//! String keyword predicates: `minLength`, `maxLength`, `pattern`, plus dispatch of
//! `format`/`contentEncoding`/`contentMediaType` to the format/content validators in
//! `validator::format` (component G) -- spec.md §4.6.1.

use super::{all, format, CompileContext, Predicate};
use crate::{
    error::{CompileError, SchemaConstructionError},
    value::text_element_len,
};
use serde_json::{Map, Value};
use std::rc::Rc;

pub(super) fn compile(
    _ctx: &CompileContext,
    _pointer: &str,
    schema_object: &Map<String, Value>,
) -> Result<Predicate, CompileError> {
    let mut predicates = Vec::new();

    if let Some(min_length) = schema_object.get("minLength").and_then(Value::as_u64) {
        predicates.push(compile_min_length(min_length));
    }
    if let Some(max_length) = schema_object.get("maxLength").and_then(Value::as_u64) {
        predicates.push(compile_max_length(max_length));
    }
    if let Some(pattern) = schema_object.get("pattern").and_then(Value::as_str) {
        predicates.push(compile_pattern(pattern)?);
    }
    if let Some(format_name) = schema_object.get("format").and_then(Value::as_str) {
        predicates.push(compile_format(format_name));
    }
    if schema_object.contains_key("contentEncoding") || schema_object.contains_key("contentMediaType") {
        predicates.push(compile_content(schema_object));
    }

    Ok(all(predicates))
}

fn compile_min_length(min_length: u64) -> Predicate {
    Rc::new(move |value: &Value| match value.as_str() {
        Some(s) => text_element_len(s) as u64 >= min_length,
        None => true,
    })
}

fn compile_max_length(max_length: u64) -> Predicate {
    Rc::new(move |value: &Value| match value.as_str() {
        Some(s) => text_element_len(s) as u64 <= max_length,
        None => true,
    })
}

fn compile_pattern(pattern: &str) -> Result<Predicate, CompileError> {
    let regex = regex::Regex::new(pattern).map_err(|source| SchemaConstructionError::InvalidPattern {
        keyword: "pattern".to_string(),
        source,
    })?;
    Ok(Rc::new(move |value: &Value| match value.as_str() {
        Some(s) => regex.is_match(s),
        None => true,
    }))
}

fn compile_format(format_name: &str) -> Predicate {
    let format_name = format_name.to_string();
    Rc::new(move |value: &Value| match value.as_str() {
        Some(s) => format::matches(&format_name, s),
        None => true,
    })
}

fn compile_content(schema_object: &Map<String, Value>) -> Predicate {
    let encoding = schema_object
        .get("contentEncoding")
        .and_then(Value::as_str)
        .map(str::to_string);
    let media_type = schema_object
        .get("contentMediaType")
        .and_then(Value::as_str)
        .map(str::to_string);
    Rc::new(move |value: &Value| match value.as_str() {
        Some(s) => format::validate_content(encoding.as_deref(), media_type.as_deref(), s),
        None => true,
    })
}
