use crate::primitive_type::PrimitiveType;
use serde_json::Value;
use std::collections::BTreeSet;
use std::convert::TryFrom;
use std::ops::{BitAnd, BitOrAssign};

/// Extract a set of primitive types contained by the input `type` keyword. (`maybe_type` should be the result of `schema.get("type")`)
///
/// NOTE: A `BTreeSet` is returned in order to preserve order-predictability while testing
pub(crate) fn get_primitive_types(maybe_type: Option<&Value>) -> BTreeSet<PrimitiveType> {
    if let Some(type_) = maybe_type {
        let mut set = BTreeSet::default();
        match type_ {
            Value::String(type_s) => {
                if let Ok(pt) = PrimitiveType::try_from(type_s.as_str()) {
                    let _ = set.insert(pt);
                    if pt == PrimitiveType::Number {
                        // "integer" is a subtype of "number"
                        // so if number is present then also integer is an included type
                        // NOTE: `to_json_schema_primitive_types` takes care of removing
                        // the redundancy if present
                        let _ = set.insert(PrimitiveType::Integer);
                    }
                }
            }
            Value::Array(types_) => {
                for type_s in types_ {
                    if let Ok(pt) = PrimitiveType::try_from(type_s) {
                        let _ = set.insert(pt);
                    }
                }
            }
            _ => {}
        }
        set
    } else {
        let mut set = BTreeSet::new();
        let _ = set.insert(PrimitiveType::Array);
        let _ = set.insert(PrimitiveType::Boolean);
        let _ = set.insert(PrimitiveType::Integer);
        let _ = set.insert(PrimitiveType::Null);
        let _ = set.insert(PrimitiveType::Number);
        let _ = set.insert(PrimitiveType::Object);
        let _ = set.insert(PrimitiveType::String);
        set
    }
}

/// Provide the most-efficient JSON representation of the input `primitive_types`.
///
/// The process includes removing `integer` if `number` is in or not having a representation if all the possible types are included
pub(crate) fn to_json_schema_primitive_types(
    primitive_types: &BTreeSet<PrimitiveType>,
) -> Option<Value> {
    match primitive_types.len() {
        0 => None,
        1 => Some(Value::String(
            primitive_types
                .iter()
                .next()
                .expect("Not empty iterator, so there is at least one element")
                .to_string(),
        )),
        6 if !primitive_types.contains(&PrimitiveType::Integer) => None,
        7 => None,
        _ => {
            let contains_number = primitive_types.contains(&PrimitiveType::Number);
            let json_primitive_types: Vec<_> = primitive_types
                .iter()
                .filter_map(|primitive_type| {
                    if contains_number && primitive_type == &PrimitiveType::Integer {
                        None
                    } else {
                        Some(Value::String(primitive_type.to_string()))
                    }
                })
                .collect();
            if json_primitive_types.len() == 1 {
                Some(json_primitive_types[0].clone())
            } else {
                Some(Value::Array(json_primitive_types))
            }
        }
    }
}

/// Raw (non type-widening) bit of a `PrimitiveType`.
///
/// Unlike `PrimitiveType::to_bit_representation` this does not set the `Integer`
/// bit when given `PrimitiveType::Number`: it is used whenever we need to test/clear
/// a single type without pulling its related types along.
#[inline]
fn raw_bit(primitive_type: PrimitiveType) -> u8 {
    match primitive_type {
        PrimitiveType::Array => 1,
        PrimitiveType::Boolean => 2,
        PrimitiveType::Integer => 4,
        PrimitiveType::Null => 8,
        PrimitiveType::Number => 16,
        PrimitiveType::Object => 32,
        PrimitiveType::String => 64,
    }
}

/// Bitmap representation of a set of `PrimitiveType`s.
///
/// Respect to `BTreeSet<PrimitiveType>` (as returned by `get_primitive_types`) this
/// representation is `Copy`, fits in a single byte and allows set operations (`&`, `|=`)
/// without allocating. `number` still implies `integer`, mirroring `get_primitive_types`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct PrimitiveTypesBitMap(u8);

impl PrimitiveTypesBitMap {
    /// Bitmap containing every primitive type.
    pub(crate) fn all() -> Self {
        let mut bitmap = Self::default();
        for primitive_type in &[
            PrimitiveType::Array,
            PrimitiveType::Boolean,
            PrimitiveType::Integer,
            PrimitiveType::Null,
            PrimitiveType::Number,
            PrimitiveType::Object,
            PrimitiveType::String,
        ] {
            bitmap |= *primitive_type;
        }
        bitmap
    }

    pub(crate) fn from_primitive_type(primitive_type: PrimitiveType) -> Self {
        let mut bitmap = Self::default();
        bitmap |= primitive_type;
        bitmap
    }

    /// Build a bitmap out of the value of a `type` keyword (`schema.get("type")`).
    /// `None` (the keyword is missing) means "every primitive type is allowed".
    pub(crate) fn from_schema_value(maybe_type: Option<&Value>) -> Self {
        if let Some(type_) = maybe_type {
            let mut bitmap = Self::default();
            match type_ {
                Value::String(type_s) => {
                    if let Ok(primitive_type) = PrimitiveType::try_from(type_s.as_str()) {
                        bitmap |= primitive_type;
                    }
                }
                Value::Array(types_) => {
                    for type_s in types_ {
                        if let Ok(primitive_type) = PrimitiveType::try_from(type_s) {
                            bitmap |= primitive_type;
                        }
                    }
                }
                _ => {}
            }
            bitmap
        } else {
            Self::all()
        }
    }

    /// Build a bitmap describing the types allowed by `schema`, regardless of whether
    /// `schema` is a `true`/`false` sentinel or an object carrying a `type` keyword.
    pub(crate) fn from_schema(schema: &Value) -> Self {
        match schema {
            Value::Bool(false) => Self::default(),
            Value::Bool(true) => Self::all(),
            Value::Object(object) => Self::from_schema_value(object.get("type")),
            _ => Self::default(),
        }
    }

    pub(crate) fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub(crate) fn contains(self, primitive_type: PrimitiveType) -> bool {
        self.0 & raw_bit(primitive_type) != 0
    }

    /// `true` if the bitmap contains any type other than `primitive_type`.
    pub(crate) fn has_other_primitive_types_other_than(self, primitive_type: PrimitiveType) -> bool {
        self.0 & !raw_bit(primitive_type) != 0
    }

    pub(crate) fn remove(&mut self, primitive_type: PrimitiveType) {
        self.0 &= !raw_bit(primitive_type);
    }

    pub(crate) fn remove_all(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Render the bitmap back into the most compact JSON representation of `type`,
    /// `None` meaning the keyword should not be present at all.
    pub(crate) fn to_schema_value(self) -> Option<Value> {
        let primitive_types: BTreeSet<PrimitiveType> =
            PrimitiveType::from_bit_representation(self.0).into_iter().collect();
        to_json_schema_primitive_types(&primitive_types)
    }
}

impl BitAnd for PrimitiveTypesBitMap {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitOrAssign<PrimitiveType> for PrimitiveTypesBitMap {
    fn bitor_assign(&mut self, rhs: PrimitiveType) {
        self.0 |= rhs.to_bit_representation();
    }
}

impl From<PrimitiveType> for PrimitiveTypesBitMap {
    fn from(primitive_type: PrimitiveType) -> Self {
        Self::from_primitive_type(primitive_type)
    }
}

impl From<&[PrimitiveType]> for PrimitiveTypesBitMap {
    fn from(primitive_types: &[PrimitiveType]) -> Self {
        let mut bitmap = Self::default();
        for primitive_type in primitive_types {
            bitmap |= *primitive_type;
        }
        bitmap
    }
}

#[cfg(test)]
mod tests {
    use super::{get_primitive_types, to_json_schema_primitive_types, PrimitiveTypesBitMap};
    use crate::primitive_type::PrimitiveType;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(None => PrimitiveTypesBitMap::all())]
    #[test_case(Some(&json!("string")) => PrimitiveTypesBitMap::from(PrimitiveType::String))]
    #[test_case(Some(&json!(["integer", "null"])) => PrimitiveTypesBitMap::from(&[PrimitiveType::Integer, PrimitiveType::Null][..]))]
    #[test_case(Some(&json!("number")) => PrimitiveTypesBitMap::from(&[PrimitiveType::Integer, PrimitiveType::Number][..]))]
    fn test_from_schema_value(maybe_type: Option<&serde_json::Value>) -> PrimitiveTypesBitMap {
        PrimitiveTypesBitMap::from_schema_value(maybe_type)
    }

    #[test_case(&json!(false) => true)]
    #[test_case(&json!(true) => false)]
    #[test_case(&json!({}) => false)]
    fn test_from_schema_is_empty(schema: &serde_json::Value) -> bool {
        PrimitiveTypesBitMap::from_schema(schema).is_empty()
    }

    #[test]
    fn test_remove_only_removes_requested_type() {
        let mut bitmap = PrimitiveTypesBitMap::from(&[PrimitiveType::Object, PrimitiveType::String][..]);
        bitmap.remove(PrimitiveType::Object);
        assert!(!bitmap.contains(PrimitiveType::Object));
        assert!(bitmap.contains(PrimitiveType::String));
    }

    #[test]
    fn test_number_bitmap_contains_integer() {
        let bitmap = PrimitiveTypesBitMap::from(PrimitiveType::Number);
        assert!(bitmap.contains(PrimitiveType::Integer));
        assert!(bitmap.contains(PrimitiveType::Number));
    }

    #[test]
    fn test_to_schema_value_round_trip() {
        let bitmap = PrimitiveTypesBitMap::from(&[PrimitiveType::Integer, PrimitiveType::String][..]);
        assert_eq!(bitmap.to_schema_value(), Some(json!(["integer", "string"])));
    }
}
