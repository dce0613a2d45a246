//! Numeric keyword predicates: `minimum`, `maximum`, `exclusiveMinimum`,
//! `exclusiveMaximum`, `multipleOf` (spec.md §4.6.1).
//!
//! Every predicate here is vacuously true for a non-numeric instance, per spec.md
//! §4.6.1's "applicable type" rule. `exclusiveMinimum`/`exclusiveMaximum` accept either
//! the Draft3/4 boolean form (paired with `minimum`/`maximum`) or the Draft6+ numeric
//! form, matching spec.md §9's draft-dependent numeric semantics note.

use super::{all, Predicate};
use crate::error::CompileError;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::rc::Rc;

pub(super) fn compile(schema_object: &Map<String, Value>) -> Result<Predicate, CompileError> {
    let mut predicates = Vec::new();

    if let Some(predicate) = compile_lower_bound(schema_object) {
        predicates.push(predicate);
    }
    if let Some(predicate) = compile_upper_bound(schema_object) {
        predicates.push(predicate);
    }
    if let Some(multiple_of) = schema_object.get("multipleOf").and_then(Value::as_f64) {
        predicates.push(compile_multiple_of(multiple_of));
    }

    Ok(all(predicates))
}

/// Resolve a bound keyword's effective `(bound, exclusive)` pair, honoring both the
/// Draft3/4 and Draft6+ `exclusive*` shapes. The bound is kept as the original `Value`
/// rather than eagerly widened to `f64`, so the comparison itself can stay exact for
/// integers that don't fit `f64`'s 2^53 exact-integer range.
fn effective_bound(bound_value: Option<&Value>, exclusive_value: Option<&Value>) -> Option<(Value, bool)> {
    match exclusive_value {
        Some(Value::Bool(is_exclusive)) => bound_value.cloned().map(|bound| (bound, *is_exclusive)),
        Some(numeric_exclusive_bound) if numeric_exclusive_bound.is_number() => {
            Some((numeric_exclusive_bound.clone(), true))
        }
        Some(_) => None,
        None => bound_value.cloned().map(|bound| (bound, false)),
    }
}

/// Compare `value` against `bound`, preferring an exact integer comparison (`i64`, then
/// `u64`, for values outside `i64`'s range) over `f64`, which silently loses precision
/// past 2^53. Falls back to `f64` only when either side isn't representable as an exact
/// integer (e.g. `1.5`). `None` means `value` isn't numeric at all.
fn compare_numeric(value: &Value, bound: &Value) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (value.as_i64(), bound.as_i64()) {
        return Some(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (value.as_u64(), bound.as_u64()) {
        return Some(a.cmp(&b));
    }
    value.as_f64().zip(bound.as_f64()).and_then(|(a, b)| a.partial_cmp(&b))
}

fn compile_lower_bound(schema_object: &Map<String, Value>) -> Option<Predicate> {
    let (bound, exclusive) = effective_bound(
        schema_object.get("minimum"),
        schema_object.get("exclusiveMinimum"),
    )?;
    Some(Rc::new(move |value: &Value| match compare_numeric(value, &bound) {
        Some(Ordering::Less) => false,
        Some(Ordering::Equal) => !exclusive,
        Some(Ordering::Greater) => true,
        None => true,
    }))
}

fn compile_upper_bound(schema_object: &Map<String, Value>) -> Option<Predicate> {
    let (bound, exclusive) = effective_bound(
        schema_object.get("maximum"),
        schema_object.get("exclusiveMaximum"),
    )?;
    Some(Rc::new(move |value: &Value| match compare_numeric(value, &bound) {
        Some(Ordering::Greater) => false,
        Some(Ordering::Equal) => !exclusive,
        Some(Ordering::Less) => true,
        None => true,
    }))
}

/// `multipleOf` -- integer inputs use an exact integer remainder to dodge the floating
/// point error a plain `n / multiple_of` division would introduce; anything else falls
/// back to a tolerance-bounded quotient check.
fn compile_multiple_of(multiple_of: f64) -> Predicate {
    Rc::new(move |value: &Value| {
        if multiple_of == 0.0 {
            return true;
        }
        if let (Some(i), Some(divisor)) = (value.as_i64(), exact_i64(multiple_of)) {
            return i % divisor == 0;
        }
        match value.as_f64() {
            Some(n) => {
                let quotient = n / multiple_of;
                (quotient - quotient.round()).abs() < 1e-9
            }
            None => true,
        }
    })
}

fn exact_i64(n: f64) -> Option<i64> {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::compile;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!({"minimum": 1}), json!(1) => true)]
    #[test_case(json!({"minimum": 1}), json!(0) => false)]
    #[test_case(json!({"minimum": 1, "exclusiveMinimum": true}), json!(1) => false; "draft3/4 boolean exclusiveMinimum")]
    #[test_case(json!({"exclusiveMinimum": 1}), json!(1) => false; "draft6+ numeric exclusiveMinimum")]
    #[test_case(json!({"exclusiveMinimum": 1}), json!(2) => true)]
    #[test_case(json!({"maximum": 10}), json!(10) => true)]
    #[test_case(json!({"maximum": 10, "exclusiveMaximum": true}), json!(10) => false; "draft3/4 boolean exclusiveMaximum")]
    #[test_case(json!({"exclusiveMaximum": 10}), json!(10) => false; "draft6+ numeric exclusiveMaximum")]
    #[test_case(json!({"minimum": 1}), json!("not a number") => true; "vacuously true for non-numeric instance")]
    #[test_case(json!({"multipleOf": 2}), json!(4) => true)]
    #[test_case(json!({"multipleOf": 2}), json!(3) => false)]
    #[test_case(json!({"multipleOf": 0.1}), json!(0.3) => true; "floating point multipleOf tolerates rounding error")]
    // 2^53 + 1 is not exactly representable as f64 and would round down to 2^53,
    // making the instance look equal to (rather than below) the bound if compared as f64.
    #[test_case(json!({"minimum": 9_007_199_254_740_993u64}), json!(9_007_199_254_740_992u64) => false; "integer minimum beyond f64 exact range")]
    #[test_case(json!({"maximum": 9_007_199_254_740_992u64}), json!(9_007_199_254_740_993u64) => false; "integer maximum beyond f64 exact range")]
    // Exceeds i64::MAX, exercising the u64 comparison fallback.
    #[test_case(json!({"minimum": 18_446_744_073_709_551_615u64}), json!(18_446_744_073_709_551_614u64) => false; "u64-range minimum")]
    #[test_case(json!({"maximum": 18_446_744_073_709_551_614u64}), json!(18_446_744_073_709_551_615u64) => false; "u64-range maximum")]
    fn test_compile(schema: serde_json::Value, instance: serde_json::Value) -> bool {
        let schema_object = schema.as_object().expect("test schemas are objects");
        let predicate = compile(schema_object).expect("numeric keywords never fail to compile");
        predicate(&instance)
    }
}
