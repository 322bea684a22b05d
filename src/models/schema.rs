//! Schema model
//!
//! The root of a schema tree: named attributes and blocks plus metadata.

use super::attribute::Attribute;
use super::block::{object_type, Block};
use super::types::Type;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which component a schema describes.
///
/// Determines which root-level names are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    /// Provider configuration.
    Provider,
    /// A managed resource.
    #[default]
    Resource,
    /// A data source.
    DataSource,
    /// An ephemeral resource.
    EphemeralResource,
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaKind::Provider => write!(f, "provider"),
            SchemaKind::Resource => write!(f, "resource"),
            SchemaKind::DataSource => write!(f, "data source"),
            SchemaKind::EphemeralResource => write!(f, "ephemeral resource"),
        }
    }
}

/// Schema for a provider, resource, data source or ephemeral resource
///
/// Built once by the defining component and read-only afterwards. Every
/// operation on a schema is a pure traversal, so a schema can be shared across
/// threads without synchronization.
///
/// # Example
///
/// ```rust
/// use plugin_schema::models::{Attribute, Block, NestedBlockObject, Schema, SchemaKind, Type};
///
/// let schema = Schema::new(SchemaKind::Resource)
///     .with_attribute("name", Attribute::new(Type::String).required())
///     .with_block(
///         "timeouts",
///         Block::single(
///             NestedBlockObject::new().with_attribute("create", Attribute::new(Type::String).optional()),
///         ),
///     );
/// assert!(schema.get_attributes().contains_key("name"));
/// assert!(schema.get_blocks().contains_key("timeouts"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub kind: SchemaKind,
    /// Version of this schema, for state upgrades.
    #[serde(default)]
    pub version: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub markdown_description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub deprecation_message: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, Attribute>,
    #[serde(default)]
    pub blocks: BTreeMap<String, Block>,
}

impl Schema {
    /// Create an empty schema of the given kind at version 0.
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: i64) -> Self {
        self.version = version;
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

    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn with_block(mut self, name: impl Into<String>, block: Block) -> Self {
        self.blocks.insert(name.into(), block);
        self
    }

    pub fn get_attributes(&self) -> &BTreeMap<String, Attribute> {
        &self.attributes
    }

    pub fn get_blocks(&self) -> &BTreeMap<String, Block> {
        &self.blocks
    }

    pub fn get_version(&self) -> i64 {
        self.version
    }

    pub fn get_description(&self) -> &str {
        &self.description
    }

    pub fn get_markdown_description(&self) -> &str {
        &self.markdown_description
    }

    pub fn get_deprecation_message(&self) -> &str {
        &self.deprecation_message
    }

    /// Object type with one field per root attribute and block.
    pub fn get_type(&self) -> Type {
        object_type(&self.attributes, &self.blocks)
    }

    /// Structural equality over metadata and the whole tree.
    pub fn equal(&self, other: &Schema) -> bool {
        self == other
    }
}
