//! Detection of the JSON Schema draft a document targets.
//!
//! The draft only changes one piece of runtime behaviour that this crate cares about:
//! whether a `Float` with a zero fractional part (eg. `1.0`) satisfies `"type": "integer"`.
//! Draft3/Draft4 say no (`integer` and `number` are distinct JSON types); Draft6 onward
//! redefine `integer` as "a number with a zero fractional part", so `1.0` qualifies.

use serde_json::Value;

/// JSON Schema draft recognised from a document's `$schema` keyword.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Draft {
    /// <http://json-schema.org/draft-03/schema#>
    Draft3,
    /// <http://json-schema.org/draft-04/schema#>
    Draft4,
    /// <http://json-schema.org/draft-06/schema#>
    Draft6,
    /// <http://json-schema.org/draft-07/schema#>
    Draft7,
}

impl Default for Draft {
    /// Absent a `$schema` keyword, the most permissive/most recent supported draft is
    /// assumed -- matching how most validators resolve an un-annotated schema.
    fn default() -> Self {
        Self::Draft7
    }
}

impl Draft {
    /// Whether a JSON number with a zero fractional part satisfies `"type": "integer"`.
    #[must_use]
    pub fn float_with_zero_fraction_is_integer(self) -> bool {
        !matches!(self, Self::Draft3 | Self::Draft4)
    }

    /// Detect the draft a schema document targets from its `$schema` keyword.
    /// Returns `None` if the schema carries no recognisable `$schema` value, in which
    /// case callers should fall back to [`Draft::default`].
    #[must_use]
    pub fn detect(schema: &Value) -> Option<Self> {
        let schema_uri = schema.get("$schema")?.as_str()?;
        if schema_uri.contains("draft-03") || schema_uri.contains("draft-3") {
            Some(Self::Draft3)
        } else if schema_uri.contains("draft-04") || schema_uri.contains("draft-4") {
            Some(Self::Draft4)
        } else if schema_uri.contains("draft-06") || schema_uri.contains("draft-6") {
            Some(Self::Draft6)
        } else if schema_uri.contains("draft-07") || schema_uri.contains("draft-7") {
            Some(Self::Draft7)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Draft;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(&json!({"$schema": "http://json-schema.org/draft-03/schema#"}) => Some(Draft::Draft3))]
    #[test_case(&json!({"$schema": "http://json-schema.org/draft-04/schema#"}) => Some(Draft::Draft4))]
    #[test_case(&json!({"$schema": "http://json-schema.org/draft-06/schema#"}) => Some(Draft::Draft6))]
    #[test_case(&json!({"$schema": "http://json-schema.org/draft-07/schema#"}) => Some(Draft::Draft7))]
    #[test_case(&json!({}) => None)]
    #[test_case(&json!({"$schema": "not-a-known-uri"}) => None)]
    fn test_detect(schema: &serde_json::Value) -> Option<Draft> {
        Draft::detect(schema)
    }

    #[test_case(Draft::Draft3 => false)]
    #[test_case(Draft::Draft4 => false)]
    #[test_case(Draft::Draft6 => true)]
    #[test_case(Draft::Draft7 => true)]
    fn test_float_with_zero_fraction_is_integer(draft: Draft) -> bool {
        draft.float_with_zero_fraction_is_integer()
    }
}
