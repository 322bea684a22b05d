//! Attribute value types
//!
//! `Type` describes the shape of a configurable value. The schema engine only
//! composes and compares types; it never inspects values.

use super::path::PathStep;
use serde::de::{self, Deserializer, EnumAccess, MapAccess, VariantAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const TYPE_NAMES: &[&str] = &[
    "bool", "number", "int64", "float64", "string", "dynamic", "list", "set", "map", "object",
    "tuple",
];

/// The type of an attribute value.
///
/// Object fields are keyed by name in a `BTreeMap`, so two object types built
/// from the same fields compare equal regardless of insertion order.
///
/// In documents a primitive type is written by name (`string`) and a composite
/// type as a single-entry map (`list: string`, `object: {id: string}`).
/// YAML enum tags (`!list string`) are also accepted on input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// A boolean value.
    Bool,
    /// An arbitrary precision number.
    Number,
    /// A 64-bit integer.
    Int64,
    /// A 64-bit floating point number.
    Float64,
    /// A string value.
    String,
    /// An ordered list of values of a single type.
    List(Box<Type>),
    /// An unordered set of unique values of a single type.
    Set(Box<Type>),
    /// A map from string keys to values of a single type.
    Map(Box<Type>),
    /// An object with a fixed set of named fields.
    Object(BTreeMap<String, Type>),
    /// A fixed-length sequence of values with individual types.
    Tuple(Vec<Type>),
    /// A type only known once a value exists.
    Dynamic,
}

impl Type {
    /// Create a list type.
    pub fn list(element_type: Type) -> Self {
        Self::List(Box::new(element_type))
    }

    /// Create a set type.
    pub fn set(element_type: Type) -> Self {
        Self::Set(Box::new(element_type))
    }

    /// Create a map type.
    pub fn map(element_type: Type) -> Self {
        Self::Map(Box::new(element_type))
    }

    /// Compose an object type from a name to type mapping.
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Type)>,
        K: Into<String>,
    {
        Self::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Whether this is the dynamic type.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic)
    }

    /// Element type of a list, set or map.
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Self::List(elem) | Self::Set(elem) | Self::Map(elem) => Some(elem),
            _ => None,
        }
    }

    /// Apply a single data path step to this type.
    ///
    /// Returns `None` when the step cannot be applied: wrong step kind for the
    /// type, an unknown object field, or a tuple index out of range.
    pub fn apply_step(&self, step: &PathStep) -> Option<&Type> {
        match (self, step) {
            (Self::Object(fields), PathStep::AttributeName(name)) => fields.get(name),
            (Self::List(elem), PathStep::ElementKeyInt(_)) => Some(elem),
            (Self::Map(elem), PathStep::ElementKeyString(_)) => Some(elem),
            (Self::Set(elem), PathStep::ElementKeyValue(_)) => Some(elem),
            (Self::Tuple(elems), PathStep::ElementKeyInt(index)) => usize::try_from(*index)
                .ok()
                .and_then(|index| elems.get(index)),
            _ => None,
        }
    }

    /// Whether a list, set or map anywhere in this type has an element type
    /// that contains `Dynamic`.
    ///
    /// Collections require every element to share one type, which a dynamic
    /// element cannot guarantee.
    pub fn contains_collection_with_dynamic(&self) -> bool {
        match self {
            Self::List(elem) | Self::Set(elem) | Self::Map(elem) => elem.contains_dynamic(),
            Self::Object(fields) => fields.values().any(Type::contains_collection_with_dynamic),
            Self::Tuple(elems) => elems.iter().any(Type::contains_collection_with_dynamic),
            _ => false,
        }
    }

    /// Whether `Dynamic` appears anywhere in this type.
    pub fn contains_dynamic(&self) -> bool {
        match self {
            Self::Dynamic => true,
            Self::List(elem) | Self::Set(elem) | Self::Map(elem) => elem.contains_dynamic(),
            Self::Object(fields) => fields.values().any(Type::contains_dynamic),
            Self::Tuple(elems) => elems.iter().any(Type::contains_dynamic),
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Number => write!(f, "number"),
            Self::Int64 => write!(f, "int64"),
            Self::Float64 => write!(f, "float64"),
            Self::String => write!(f, "string"),
            Self::List(elem) => write!(f, "list({elem})"),
            Self::Set(elem) => write!(f, "set({elem})"),
            Self::Map(elem) => write!(f, "map({elem})"),
            Self::Object(fields) => {
                write!(f, "object({{")?;
                for (i, (name, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {ty}")?;
                }
                write!(f, "}})")
            }
            Self::Tuple(elems) => {
                write!(f, "tuple([")?;
                for (i, ty) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{ty}")?;
                }
                write!(f, "])")
            }
            Self::Dynamic => write!(f, "dynamic"),
        }
    }
}

impl Type {
    fn primitive(name: &str) -> Option<Type> {
        match name {
            "bool" => Some(Type::Bool),
            "number" => Some(Type::Number),
            "int64" => Some(Type::Int64),
            "float64" => Some(Type::Float64),
            "string" => Some(Type::String),
            "dynamic" => Some(Type::Dynamic),
            _ => None,
        }
    }
}

fn single_entry<S, V>(serializer: S, key: &str, value: &V) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize + ?Sized,
{
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(key, value)?;
    map.end()
}

impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool => serializer.serialize_str("bool"),
            Self::Number => serializer.serialize_str("number"),
            Self::Int64 => serializer.serialize_str("int64"),
            Self::Float64 => serializer.serialize_str("float64"),
            Self::String => serializer.serialize_str("string"),
            Self::Dynamic => serializer.serialize_str("dynamic"),
            Self::List(elem) => single_entry(serializer, "list", elem),
            Self::Set(elem) => single_entry(serializer, "set", elem),
            Self::Map(elem) => single_entry(serializer, "map", elem),
            Self::Object(fields) => single_entry(serializer, "object", fields),
            Self::Tuple(elems) => single_entry(serializer, "tuple", elems),
        }
    }
}

struct TypeVisitor;

impl<'de> Visitor<'de> for TypeVisitor {
    type Value = Type;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a type name or a single-entry map such as {{list: string}}")
    }

    fn visit_str<E: de::Error>(self, name: &str) -> Result<Type, E> {
        Type::primitive(name).ok_or_else(|| E::unknown_variant(name, TYPE_NAMES))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Type, A::Error> {
        let Some(key) = map.next_key::<String>()? else {
            return Err(de::Error::invalid_length(0, &self));
        };
        let ty = match key.as_str() {
            "list" => Type::List(Box::new(map.next_value()?)),
            "set" => Type::Set(Box::new(map.next_value()?)),
            "map" => Type::Map(Box::new(map.next_value()?)),
            "object" => Type::Object(map.next_value()?),
            "tuple" => Type::Tuple(map.next_value()?),
            other => return Err(de::Error::unknown_variant(other, TYPE_NAMES)),
        };
        if map.next_key::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(2, &self));
        }
        Ok(ty)
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Type, A::Error> {
        let (name, variant): (String, _) = data.variant()?;
        match name.as_str() {
            "list" => Ok(Type::List(Box::new(variant.newtype_variant()?))),
            "set" => Ok(Type::Set(Box::new(variant.newtype_variant()?))),
            "map" => Ok(Type::Map(Box::new(variant.newtype_variant()?))),
            "object" => Ok(Type::Object(variant.newtype_variant()?)),
            "tuple" => Ok(Type::Tuple(variant.newtype_variant()?)),
            other => {
                let ty = Type::primitive(other)
                    .ok_or_else(|| de::Error::unknown_variant(other, TYPE_NAMES))?;
                variant.unit_variant()?;
                Ok(ty)
            }
        }
    }
}

impl<'de> Deserialize<'de> for Type {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TypeVisitor)
    }
}
