//! Minimizer driver (component E): depth-first traversal composed with fixed-point
//! rule application until a pass produces no change (spec.md §4.5).
//!
//! `Minimizer` is the production `SchemaVisitor` (component C, `crate::traversal`): its
//! `visit_node` hook is the per-node rule application (`keywords::update_schema_no_recursive`,
//! plus the `true`-schema short-circuit), and `SchemaVisitor::visit`'s default descent is
//! what walks every sub-schema before that hook runs on it. This module adds the outer
//! convergence loop spec.md's algorithm calls for: a rule accepted deep in the tree can
//! unlock a further rewrite at an ancestor that a single pass already walked past, so
//! `minimize` reruns the whole traversal until one makes no change at all, which is what
//! guarantees the idempotence property required by spec.md §8
//! (`Minimize(Minimize(s)) == Minimize(s)`).

use crate::{
    helpers::is,
    keywords::update_schema_no_recursive,
    traversal::SchemaVisitor,
    value::clone_schema,
};
use serde_json::Value;

/// The visitor that carries one rule-application pass over the `SchemaVisitor` walk.
///
/// `changed` accumulates whether any node visited so far was rewritten, so a caller can
/// tell whether another pass might make further progress.
#[derive(Default)]
struct Minimizer {
    changed: bool,
}

impl SchemaVisitor for Minimizer {
    fn visit_node(&mut self, mut schema: Value) -> Value {
        if is::true_schema(&schema) {
            if schema != Value::Bool(true) {
                self.changed = true;
            }
            return Value::Bool(true);
        }
        if update_schema_no_recursive(&mut schema) {
            self.changed = true;
        }
        schema
    }
}

/// Run a single traverse-and-rewrite pass over `schema` in place.
/// Returns true if anything changed, so callers can loop to a fixed point.
pub(crate) fn minimize_single_pass(schema: &mut Value) -> bool {
    let taken = std::mem::replace(schema, Value::Null);
    let mut minimizer = Minimizer::default();
    *schema = minimizer.visit(taken);
    minimizer.changed
}

/// Rewrite `schema` into a semantically-equivalent, structurally smaller schema.
///
/// Never mutates `schema`; the input is cloned up front (spec.md §4.3's `Clone`) and the
/// result shares no identity with it.
#[must_use]
pub fn minimize(schema: &Value) -> Value {
    let mut result = clone_schema(schema);
    minimize_ref(&mut result);
    result
}

/// In-place variant of [`minimize`] for callers that already own the schema and would
/// rather avoid the extra clone.
pub fn minimize_ref(schema: &mut Value) -> &mut Value {
    while minimize_single_pass(schema) {}
    schema
}
