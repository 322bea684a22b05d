//! Attribute model
//!
//! An attribute describes a single configurable value. A nested attribute is
//! an attribute whose value is itself structured: it carries a nesting mode
//! and a [`NestedObject`] holding further attributes.

use super::path::SchemaPathStep;
use super::types::Type;
use crate::validation::ImplementationValidator;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// How instances of a nested attribute's object are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestingMode {
    /// Sentinel for an unset mode. Never valid in a finished schema.
    #[default]
    Unknown,
    /// Exactly one object.
    Single,
    /// An ordered list of objects.
    List,
    /// An unordered set of unique objects.
    Set,
    /// A map of objects keyed by string.
    Map,
}

impl NestingMode {
    /// Wrap a nested object type according to this mode.
    pub fn wrap(self, object_type: Type) -> Type {
        match self {
            NestingMode::List => Type::list(object_type),
            NestingMode::Set => Type::set(object_type),
            NestingMode::Map => Type::map(object_type),
            NestingMode::Single | NestingMode::Unknown => object_type,
        }
    }

    /// Representative path step used when synthesizing schema paths.
    pub fn placeholder(self) -> Option<SchemaPathStep> {
        match self {
            NestingMode::List => Some(SchemaPathStep::AnyListIndex),
            NestingMode::Set => Some(SchemaPathStep::AnySetValue),
            NestingMode::Map => Some(SchemaPathStep::AnyMapKey),
            NestingMode::Single | NestingMode::Unknown => None,
        }
    }
}

/// The attributes found under a nested attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NestedObject {
    #[serde(default)]
    pub attributes: BTreeMap<String, Attribute>,
}

impl NestedObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute to this object.
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn get_attributes(&self) -> &BTreeMap<String, Attribute> {
        &self.attributes
    }

    /// Object type built from the child attributes' types.
    ///
    /// Derived fresh on every call; the object owns no cached copy that could
    /// drift from its children.
    pub fn get_type(&self) -> Type {
        Type::Object(
            self.attributes
                .iter()
                .map(|(name, attribute)| (name.clone(), attribute.get_type()))
                .collect(),
        )
    }

    /// Structural equality: identical key sets and pairwise equal attributes.
    pub fn equal(&self, other: &NestedObject) -> bool {
        self.attributes.len() == other.attributes.len()
            && self.attributes.iter().all(|(name, attribute)| {
                other
                    .attributes
                    .get(name)
                    .is_some_and(|theirs| attribute.equal(theirs))
            })
    }
}

/// Discriminates plain attributes from nested ones.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeKind {
    /// A value of a declared type. Schema information stops here.
    Primitive { attribute_type: Type },
    /// A structured value described by further attributes.
    Nested {
        nesting_mode: NestingMode,
        nested_object: NestedObject,
    },
}

/// Attribute model representing one configurable value in a schema
///
/// Attributes are immutable descriptors once built; the owning object or
/// schema holds them exclusively.
///
/// # Example
///
/// ```rust
/// use plugin_schema::models::{Attribute, NestedObject, Type};
///
/// let name = Attribute::new(Type::String).required();
/// let rule = Attribute::list_nested(
///     NestedObject::new().with_attribute("port", Attribute::new(Type::Int64).optional()),
/// )
/// .optional();
/// assert!(rule.as_nested().is_some());
/// assert!(name.as_nested().is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "AttributeDocument", into = "AttributeDocument")]
pub struct Attribute {
    pub kind: AttributeKind,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    /// The value is never persisted, diffed or read back.
    pub write_only: bool,
    pub optional_for_import: bool,
    pub required_for_import: bool,
    pub description: String,
    pub markdown_description: String,
    pub deprecation_message: String,
    /// Extra authoring-time checks run by the implementation validator.
    /// Runtime-only; never part of a document.
    pub implementation_validators: Vec<Arc<dyn ImplementationValidator>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum DocumentKind {
    Primitive,
    Nested,
}

/// Document form of an attribute: the kind discriminant sits beside the
/// kind-specific fields.
#[derive(Debug, Serialize, Deserialize)]
struct AttributeDocument {
    kind: DocumentKind,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    attribute_type: Option<Type>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nesting_mode: Option<NestingMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nested_object: Option<NestedObject>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    computed: bool,
    #[serde(default)]
    sensitive: bool,
    #[serde(default)]
    write_only: bool,
    #[serde(default)]
    optional_for_import: bool,
    #[serde(default)]
    required_for_import: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    markdown_description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    deprecation_message: String,
}

impl TryFrom<AttributeDocument> for Attribute {
    type Error = String;

    fn try_from(doc: AttributeDocument) -> Result<Self, Self::Error> {
        let kind = match doc.kind {
            DocumentKind::Primitive => {
                if doc.nesting_mode.is_some() || doc.nested_object.is_some() {
                    return Err(
                        "primitive attribute cannot declare nesting_mode or nested_object"
                            .to_string(),
                    );
                }
                let attribute_type = doc
                    .attribute_type
                    .ok_or_else(|| "primitive attribute is missing its type".to_string())?;
                AttributeKind::Primitive { attribute_type }
            }
            DocumentKind::Nested => {
                if doc.attribute_type.is_some() {
                    return Err("nested attribute cannot declare a type".to_string());
                }
                AttributeKind::Nested {
                    nesting_mode: doc.nesting_mode.unwrap_or_default(),
                    nested_object: doc.nested_object.unwrap_or_default(),
                }
            }
        };

        Ok(Attribute {
            kind,
            required: doc.required,
            optional: doc.optional,
            computed: doc.computed,
            sensitive: doc.sensitive,
            write_only: doc.write_only,
            optional_for_import: doc.optional_for_import,
            required_for_import: doc.required_for_import,
            description: doc.description,
            markdown_description: doc.markdown_description,
            deprecation_message: doc.deprecation_message,
            implementation_validators: Vec::new(),
        })
    }
}

impl From<Attribute> for AttributeDocument {
    fn from(attribute: Attribute) -> Self {
        let (kind, attribute_type, nesting_mode, nested_object) = match attribute.kind {
            AttributeKind::Primitive { attribute_type } => {
                (DocumentKind::Primitive, Some(attribute_type), None, None)
            }
            AttributeKind::Nested {
                nesting_mode,
                nested_object,
            } => (
                DocumentKind::Nested,
                None,
                Some(nesting_mode),
                Some(nested_object),
            ),
        };

        AttributeDocument {
            kind,
            attribute_type,
            nesting_mode,
            nested_object,
            required: attribute.required,
            optional: attribute.optional,
            computed: attribute.computed,
            sensitive: attribute.sensitive,
            write_only: attribute.write_only,
            optional_for_import: attribute.optional_for_import,
            required_for_import: attribute.required_for_import,
            description: attribute.description,
            markdown_description: attribute.markdown_description,
            deprecation_message: attribute.deprecation_message,
        }
    }
}

impl Attribute {
    fn from_kind(kind: AttributeKind) -> Self {
        Self {
            kind,
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            write_only: false,
            optional_for_import: false,
            required_for_import: false,
            description: String::new(),
            markdown_description: String::new(),
            deprecation_message: String::new(),
            implementation_validators: Vec::new(),
        }
    }

    /// Create a plain attribute of the given type.
    pub fn new(attribute_type: Type) -> Self {
        Self::from_kind(AttributeKind::Primitive { attribute_type })
    }

    /// Create a nested attribute with the given mode and object.
    pub fn nested(nesting_mode: NestingMode, nested_object: NestedObject) -> Self {
        Self::from_kind(AttributeKind::Nested {
            nesting_mode,
            nested_object,
        })
    }

    pub fn single_nested(nested_object: NestedObject) -> Self {
        Self::nested(NestingMode::Single, nested_object)
    }

    pub fn list_nested(nested_object: NestedObject) -> Self {
        Self::nested(NestingMode::List, nested_object)
    }

    pub fn set_nested(nested_object: NestedObject) -> Self {
        Self::nested(NestingMode::Set, nested_object)
    }

    pub fn map_nested(nested_object: NestedObject) -> Self {
        Self::nested(NestingMode::Map, nested_object)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn write_only(mut self) -> Self {
        self.write_only = true;
        self
    }

    pub fn optional_for_import(mut self) -> Self {
        self.optional_for_import = true;
        self
    }

    pub fn required_for_import(mut self) -> Self {
        self.required_for_import = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_markdown_description(mut self, description: impl Into<String>) -> Self {
        self.markdown_description = description.into();
        self
    }

    pub fn with_deprecation_message(mut self, message: impl Into<String>) -> Self {
        self.deprecation_message = message.into();
        self
    }

    /// Attach an extra implementation check to this attribute.
    pub fn with_validator(mut self, validator: Arc<dyn ImplementationValidator>) -> Self {
        self.implementation_validators.push(validator);
        self
    }

    /// The declared type, or for nested attributes the object type wrapped by
    /// the nesting mode.
    pub fn get_type(&self) -> Type {
        match &self.kind {
            AttributeKind::Primitive { attribute_type } => attribute_type.clone(),
            AttributeKind::Nested {
                nesting_mode,
                nested_object,
            } => nesting_mode.wrap(nested_object.get_type()),
        }
    }

    /// Nesting mode and object, when this is a nested attribute.
    pub fn as_nested(&self) -> Option<(NestingMode, &NestedObject)> {
        match &self.kind {
            AttributeKind::Nested {
                nesting_mode,
                nested_object,
            } => Some((*nesting_mode, nested_object)),
            AttributeKind::Primitive { .. } => None,
        }
    }

    pub fn is_nested(&self) -> bool {
        self.as_nested().is_some()
    }

    /// Exhaustive equality over kind, type, every flag and every text field.
    ///
    /// Implementation validators are behaviour, not description, and take no
    /// part in the comparison.
    pub fn equal(&self, other: &Attribute) -> bool {
        let same_kind = match (&self.kind, &other.kind) {
            (
                AttributeKind::Primitive { attribute_type: a },
                AttributeKind::Primitive { attribute_type: b },
            ) => a == b,
            (
                AttributeKind::Nested {
                    nesting_mode: mode_a,
                    nested_object: object_a,
                },
                AttributeKind::Nested {
                    nesting_mode: mode_b,
                    nested_object: object_b,
                },
            ) => mode_a == mode_b && object_a.equal(object_b),
            _ => false,
        };

        same_kind
            && self.required == other.required
            && self.optional == other.optional
            && self.computed == other.computed
            && self.sensitive == other.sensitive
            && self.write_only == other.write_only
            && self.optional_for_import == other.optional_for_import
            && self.required_for_import == other.required_for_import
            && self.description == other.description
            && self.markdown_description == other.markdown_description
            && self.deprecation_message == other.deprecation_message
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}
