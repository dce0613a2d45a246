//! Compiles a schema document into a [`Validator`] -- a reusable, boxed-closure
//! predicate over `serde_json::Value` instances (spec.md §4.6, §9).
//!
//! `serde_json::Value` has no notion of object identity, so a schema that cycles back on
//! itself can only do so through a `$ref`. [`CompileContext`] resolves same-document
//! `$ref` fragments (`#/...`) and guards against infinite recursion by keying in-progress
//! compilations on the target's normalised JSON Pointer and handing back a placeholder
//! cell that is filled in once the cycle unwinds -- the technique described in spec.md
//! §4.6.3.

mod array;
mod format;
mod number;
mod object;
mod string;

use crate::{
    draft::Draft,
    error::{ArgumentError, CompileError, SchemaConstructionError},
    helpers::types::PrimitiveTypesBitMap,
    primitive_type::PrimitiveType,
    value::deep_equals,
};
use serde_json::{Map, Value};
use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    fmt,
    rc::Rc,
};

pub(crate) type Predicate = Rc<dyn Fn(&Value) -> bool>;

/// A compiled schema. Cheap to clone (the underlying predicate is reference counted) and
/// reusable across any number of [`Validator::is_valid`] calls.
#[derive(Clone)]
pub struct Validator {
    predicate: Predicate,
}

impl Validator {
    /// Whether `instance` satisfies the compiled schema.
    #[must_use]
    pub fn is_valid(&self, instance: &Value) -> bool {
        (self.predicate)(instance)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").finish_non_exhaustive()
    }
}

/// Compile `schema` into a reusable [`Validator`].
///
/// # Errors
/// Returns [`CompileError::Argument`] if `schema` is `null`, or
/// [`CompileError::SchemaConstruction`] if the schema uses a construct this compiler does
/// not support (eg. an unsupported `dependencies` shape, or an invalid regular
/// expression).
pub fn compile(schema: &Value) -> Result<Validator, CompileError> {
    if schema.is_null() {
        return Err(ArgumentError::MissingRequiredArgument {
            argument: "schema".to_string(),
        }
        .into());
    }
    let draft = Draft::detect(schema).unwrap_or_default();
    let context = CompileContext::new(schema, draft);
    let predicate = context.compile_schema("", schema)?;
    Ok(Validator { predicate })
}

/// Shared state threaded through a single top-level [`compile`] call.
pub(crate) struct CompileContext<'a> {
    root: &'a Value,
    draft: Draft,
    /// Predicates already fully compiled, keyed by the normalised JSON Pointer of the
    /// schema node they came from.
    compiled: RefCell<HashMap<String, Predicate>>,
    /// Placeholder cells for schema nodes whose compilation is still in progress --
    /// filled in once the referencing `compile_schema` call returns.
    delayed: RefCell<HashMap<String, Rc<RefCell<Option<Predicate>>>>>,
    /// Pointers currently being compiled, used to detect `$ref` cycles.
    in_progress: RefCell<HashSet<String>>,
}

impl<'a> CompileContext<'a> {
    fn new(root: &'a Value, draft: Draft) -> Self {
        Self {
            root,
            draft,
            compiled: RefCell::new(HashMap::new()),
            delayed: RefCell::new(HashMap::new()),
            in_progress: RefCell::new(HashSet::new()),
        }
    }

    /// Compile the schema node at `pointer` (already resolved, ie. `$ref` has been
    /// followed if `schema` itself is a `$ref` object), memoising by pointer and
    /// returning a placeholder predicate if `pointer` is already being compiled higher
    /// up the call stack.
    pub(crate) fn compile_schema(&self, pointer: &str, schema: &Value) -> Result<Predicate, CompileError> {
        if let Some(predicate) = self.compiled.borrow().get(pointer) {
            return Ok(Rc::clone(predicate));
        }
        if self.in_progress.borrow().contains(pointer) {
            return Ok(self.indirect_through_placeholder(pointer));
        }

        let _ = self.in_progress.borrow_mut().insert(pointer.to_string());
        let predicate = self.compile_node(pointer, schema);
        let _ = self.in_progress.borrow_mut().remove(pointer);

        let predicate = predicate?;
        if let Some(cell) = self.delayed.borrow_mut().remove(pointer) {
            *cell.borrow_mut() = Some(Rc::clone(&predicate));
        }
        let _ = self.compiled.borrow_mut().insert(pointer.to_string(), Rc::clone(&predicate));
        Ok(predicate)
    }

    /// Hand back a predicate that defers to whatever ends up compiled for `pointer`,
    /// for use while `pointer`'s own compilation is still on the call stack.
    fn indirect_through_placeholder(&self, pointer: &str) -> Predicate {
        let cell = Rc::clone(
            self.delayed
                .borrow_mut()
                .entry(pointer.to_string())
                .or_insert_with(|| Rc::new(RefCell::new(None))),
        );
        Rc::new(move |value: &Value| match cell.borrow().as_ref() {
            Some(predicate) => predicate(value),
            // Self-reference evaluated before the referenced node finished compiling
            // (only possible while compiling the very node it points to): accept,
            // the referencing branch's own constraints still apply.
            None => true,
        })
    }

    fn compile_node(&self, pointer: &str, schema: &Value) -> Result<Predicate, CompileError> {
        match schema {
            Value::Bool(allowed) => Ok(constant(*allowed)),
            Value::Object(schema_object) => match schema_object.get("$ref").and_then(Value::as_str) {
                Some(reference) => self.compile_ref(reference),
                None => self.compile_keywords(pointer, schema_object),
            },
            _ => Ok(constant(true)),
        }
    }

    /// Resolve and compile a same-document `$ref`. References to another document are
    /// outside this compiler's scope (spec.md §4.6, Non-goals) and are treated as
    /// vacuously true.
    fn compile_ref(&self, reference: &str) -> Result<Predicate, CompileError> {
        let fragment = match reference.strip_prefix('#') {
            Some(fragment) => fragment,
            None => return Ok(constant(true)),
        };
        match self.root.pointer(fragment) {
            Some(target) => self.compile_schema(fragment, target),
            None => Err(SchemaConstructionError::UnsupportedKeyword {
                keyword: "$ref".to_string(),
                reason: format!("{reference} does not resolve within the document"),
            }
            .into()),
        }
    }

    fn compile_keywords(&self, pointer: &str, schema_object: &Map<String, Value>) -> Result<Predicate, CompileError> {
        let mut predicates = Vec::new();

        predicates.push(compile_type(schema_object, self.draft));

        if let Some(const_value) = schema_object.get("const") {
            predicates.push(compile_const(const_value));
        }
        if let Some(Value::Array(enum_values)) = schema_object.get("enum") {
            predicates.push(compile_enum(enum_values));
        }

        predicates.push(number::compile(schema_object)?);
        predicates.push(string::compile(self, pointer, schema_object)?);
        predicates.push(array::compile(self, pointer, schema_object)?);
        predicates.push(object::compile(self, pointer, schema_object)?);

        if let Some(sub_schemas) = schema_object.get("allOf") {
            predicates.push(self.compile_all_of(pointer, sub_schemas)?);
        }
        if let Some(sub_schemas) = schema_object.get("anyOf") {
            predicates.push(self.compile_any_of(pointer, sub_schemas)?);
        }
        if let Some(sub_schemas) = schema_object.get("oneOf") {
            predicates.push(self.compile_one_of(pointer, sub_schemas)?);
        }
        if let Some(sub_schema) = schema_object.get("not") {
            predicates.push(self.compile_not(pointer, sub_schema)?);
        }
        if schema_object.contains_key("if") {
            predicates.push(self.compile_if_then_else(pointer, schema_object)?);
        }

        Ok(all(predicates))
    }

    fn compile_all_of(&self, pointer: &str, sub_schemas: &Value) -> Result<Predicate, CompileError> {
        let members = sub_schemas.as_array().cloned().unwrap_or_default();
        let predicates: Vec<Predicate> = members
            .iter()
            .enumerate()
            .filter(|(_, member)| !is_true_schema(member))
            .map(|(index, member)| self.compile_schema(&indexed_pointer(pointer, "allOf", index), member))
            .collect::<Result<_, _>>()?;
        Ok(all(predicates))
    }

    fn compile_any_of(&self, pointer: &str, sub_schemas: &Value) -> Result<Predicate, CompileError> {
        let members = sub_schemas.as_array().cloned().unwrap_or_default();
        if members.iter().any(is_true_schema) {
            return Ok(constant(true));
        }
        let predicates: Vec<Predicate> = members
            .iter()
            .enumerate()
            .map(|(index, member)| self.compile_schema(&indexed_pointer(pointer, "anyOf", index), member))
            .collect::<Result<_, _>>()?;
        Ok(any(predicates))
    }

    fn compile_one_of(&self, pointer: &str, sub_schemas: &Value) -> Result<Predicate, CompileError> {
        let members = sub_schemas.as_array().cloned().unwrap_or_default();
        let predicates: Vec<Predicate> = members
            .iter()
            .enumerate()
            .map(|(index, member)| self.compile_schema(&indexed_pointer(pointer, "oneOf", index), member))
            .collect::<Result<_, _>>()?;
        Ok(Rc::new(move |value: &Value| {
            predicates.iter().filter(|predicate| predicate(value)).count() == 1
        }))
    }

    fn compile_not(&self, pointer: &str, sub_schema: &Value) -> Result<Predicate, CompileError> {
        if is_false_schema(sub_schema) {
            return Ok(constant(true));
        }
        if is_true_schema(sub_schema) {
            return Ok(constant(false));
        }
        let predicate = self.compile_schema(&push_pointer_segment(pointer, "not"), sub_schema)?;
        Ok(Rc::new(move |value: &Value| !predicate(value)))
    }

    fn compile_if_then_else(
        &self,
        pointer: &str,
        schema_object: &Map<String, Value>,
    ) -> Result<Predicate, CompileError> {
        let if_predicate = self.compile_schema(
            &push_pointer_segment(pointer, "if"),
            schema_object.get("if").expect("presence already checked"),
        )?;
        let then_predicate = match schema_object.get("then") {
            Some(then_schema) => Some(self.compile_schema(&push_pointer_segment(pointer, "then"), then_schema)?),
            None => None,
        };
        let else_predicate = match schema_object.get("else") {
            Some(else_schema) => Some(self.compile_schema(&push_pointer_segment(pointer, "else"), else_schema)?),
            None => None,
        };
        Ok(Rc::new(move |value: &Value| {
            if if_predicate(value) {
                then_predicate.as_ref().map_or(true, |predicate| predicate(value))
            } else {
                else_predicate.as_ref().map_or(true, |predicate| predicate(value))
            }
        }))
    }
}

fn compile_type(schema_object: &Map<String, Value>, draft: Draft) -> Predicate {
    let allowed = PrimitiveTypesBitMap::from_schema_value(schema_object.get("type"));
    Rc::new(move |value: &Value| instance_matches_type(value, allowed, draft))
}

fn instance_matches_type(value: &Value, allowed: PrimitiveTypesBitMap, draft: Draft) -> bool {
    let actual = match value {
        Value::Null => PrimitiveType::Null,
        Value::Bool(_) => PrimitiveType::Boolean,
        Value::String(_) => PrimitiveType::String,
        Value::Array(_) => PrimitiveType::Array,
        Value::Object(_) => PrimitiveType::Object,
        Value::Number(n) => {
            let is_integer = n.as_i64().is_some()
                || n.as_u64().is_some()
                || n.as_f64().map_or(false, |f| f.fract() == 0.0 && draft.float_with_zero_fraction_is_integer());
            if is_integer {
                return allowed.contains(PrimitiveType::Integer) || allowed.contains(PrimitiveType::Number);
            }
            PrimitiveType::Number
        }
    };
    allowed.contains(actual)
}

fn compile_const(const_value: &Value) -> Predicate {
    let const_value = const_value.clone();
    Rc::new(move |value: &Value| deep_equals(value, &const_value))
}

fn compile_enum(enum_values: &[Value]) -> Predicate {
    let enum_values = enum_values.to_vec();
    Rc::new(move |value: &Value| enum_values.iter().any(|candidate| deep_equals(value, candidate)))
}

fn is_true_schema(schema: &Value) -> bool {
    matches!(schema, Value::Bool(true)) || matches!(schema, Value::Object(object) if object.is_empty())
}

fn is_false_schema(schema: &Value) -> bool {
    matches!(schema, Value::Bool(false))
}

pub(crate) fn constant(allowed: bool) -> Predicate {
    Rc::new(move |_: &Value| allowed)
}

pub(crate) fn all(predicates: Vec<Predicate>) -> Predicate {
    Rc::new(move |value: &Value| predicates.iter().all(|predicate| predicate(value)))
}

pub(crate) fn any(predicates: Vec<Predicate>) -> Predicate {
    Rc::new(move |value: &Value| predicates.iter().any(|predicate| predicate(value)))
}

/// Append a single RFC 6901 segment to a JSON Pointer, escaping `~` and `/`.
pub(crate) fn push_pointer_segment(parent: &str, segment: &str) -> String {
    let escaped = segment.replace('~', "~0").replace('/', "~1");
    format!("{parent}/{escaped}")
}

/// Append a keyword segment followed by an array index to a JSON Pointer.
pub(crate) fn indexed_pointer(parent: &str, keyword: &str, index: usize) -> String {
    format!("{}/{}", push_pointer_segment(parent, keyword), index)
}
