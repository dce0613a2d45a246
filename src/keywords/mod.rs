//! The reference of the JSON Schema specifications are available on
//! <https://tools.ietf.org/html/draft-handrews-json-schema-validation-01>
mod additional_items;
mod additional_properties;
mod all_of;
mod any_of;
mod const_;
mod dedup;
mod enum_;
mod if_;
mod items;
mod macro_;
mod one_of;
mod property_names;
mod required;
mod type_;

use serde_json::Value;

/// Order of the methods used to update the schema
///
/// NOTE: The order might be important for the capability/quality of the
/// library so please be mindfull before modifying the order (and if you
/// do so please motivate it in the pull request description)
static UPDATE_SCHEMA_METHODS: &[fn(&mut Value) -> bool] = &[
    // `remove_extraneous_keys_keyword_type` and `remove_keywords_in_must_ignore_groups`
    // is added first as it quickly reduces the amount of keywords to process
    type_::remove_extraneous_keys_keyword_type,
    macro_::ignore_keywords::remove_keywords_in_must_ignore_groups,
    macro_::ignore_keywords::omit_keywords_that_do_not_alter_schema_selectivity,
    // Duplicate removal is cheap and shrinks the arrays every other rule below has to walk
    dedup::remove_duplicate_all_of,
    dedup::remove_duplicate_any_of,
    dedup::remove_duplicate_one_of,
    dedup::remove_duplicate_enum,
    // All others, currently no special ordering is defined
    additional_items::simplify_additional_items,
    additional_properties::remove_empty_additional_properties,
    any_of::simplify_any_of,
    const_::simple_const_cleanup,
    const_::remove_enum_if_const,
    enum_::simple_enum_cleanup,
    if_::simplify_if,
    items::simplify_items,
    macro_::maximum_minimum_related_keywords::update_max_min_related_keywords,
    one_of::remove_one_of_if_empty_schema_allowed,
    property_names::optimise_property_names,
    required::remove_empty_required,
    type_::optimise_keyword_type,
    // Mutli schema handling/merges needs to be done at the end.
    // `promote_only_all_of_in_all_of` runs before `flatten_all_of`/`simplify_all_of` so a
    // nested-`allOf`-only member is spliced into the parent array while it is still a bare
    // wrapper -- once `simplify_all_of` has pushed a common `type` down into it, it no longer
    // looks like a pure wrapper and `flatten_all_of` would instead try to fold its `allOf`
    // keyword into the parent's own, corrupting both.
    all_of::promote_only_all_of_in_all_of,
    all_of::flatten_all_of,
    all_of::simplify_all_of,
    all_of::promote_all_of_with_one_of_to_one_of_if_one_of_is_empty,
    all_of::remove_type_only_all_of_if_parent_is_same,
];

/// Apply every rule in `UPDATE_SCHEMA_METHODS` once, in order, to `schema` itself
/// (without descending into its sub-schemas). Returns true if any rule changed it.
///
/// This is the per-node half of the minimizer; descending into sub-schemas and
/// re-running this to a fixed point is `Minimizer`'s job (see `crate::minimize`), which
/// drives the walk through the shared `SchemaVisitor` traversal (component C).
pub(crate) fn update_schema_no_recursive(schema: &mut Value) -> bool {
    let mut updated_schema = false;
    for method in UPDATE_SCHEMA_METHODS {
        if method(schema) {
            updated_schema = true;
        }
        if &Value::Bool(true) == schema {
            // If the schema is a `true` or `false` schema
            // we know that we cannot optimise it even more
            return true;
        }
    }
    updated_schema
}
