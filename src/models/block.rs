//! Block model
//!
//! Blocks are structural groupings distinct from attributes. A block's object
//! may contain both attributes and further blocks, so blocks nest inside blocks.

use super::attribute::Attribute;
use super::path::SchemaPathStep;
use super::types::Type;
use crate::validation::ImplementationValidator;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// How instances of a block are collected. Blocks have no map nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockNestingMode {
    /// Sentinel for an unset mode. Never valid in a finished schema.
    #[default]
    Unknown,
    List,
    Set,
    Single,
}

impl BlockNestingMode {
    /// Wrap a block object type according to this mode.
    pub fn wrap(self, object_type: Type) -> Type {
        match self {
            BlockNestingMode::List => Type::list(object_type),
            BlockNestingMode::Set => Type::set(object_type),
            BlockNestingMode::Single | BlockNestingMode::Unknown => object_type,
        }
    }

    /// Representative path step used when synthesizing schema paths.
    pub fn placeholder(self) -> Option<SchemaPathStep> {
        match self {
            BlockNestingMode::List => Some(SchemaPathStep::AnyListIndex),
            BlockNestingMode::Set => Some(SchemaPathStep::AnySetValue),
            BlockNestingMode::Single | BlockNestingMode::Unknown => None,
        }
    }
}

/// The attributes and blocks found under a block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NestedBlockObject {
    #[serde(default)]
    pub attributes: BTreeMap<String, Attribute>,
    #[serde(default)]
    pub blocks: BTreeMap<String, Block>,
}

impl NestedBlockObject {
    pub fn new() -> Self {
        Self::default()
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

    /// Object type whose fields are the attribute types plus each block's own
    /// derived type.
    pub fn get_type(&self) -> Type {
        object_type(&self.attributes, &self.blocks)
    }

    /// Structural equality over both attribute and block children.
    pub fn equal(&self, other: &NestedBlockObject) -> bool {
        self.attributes.len() == other.attributes.len()
            && self.blocks.len() == other.blocks.len()
            && self.attributes.iter().all(|(name, attribute)| {
                other
                    .attributes
                    .get(name)
                    .is_some_and(|theirs| attribute.equal(theirs))
            })
            && self.blocks.iter().all(|(name, block)| {
                other
                    .blocks
                    .get(name)
                    .is_some_and(|theirs| block.equal(theirs))
            })
    }
}

/// Build the object type for a set of attributes and blocks.
pub(crate) fn object_type(
    attributes: &BTreeMap<String, Attribute>,
    blocks: &BTreeMap<String, Block>,
) -> Type {
    let mut fields: BTreeMap<String, Type> = attributes
        .iter()
        .map(|(name, attribute)| (name.clone(), attribute.get_type()))
        .collect();
    for (name, block) in blocks {
        fields.insert(name.clone(), block.get_type());
    }
    Type::Object(fields)
}

/// A nested block within a schema or another block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub nesting_mode: BlockNestingMode,
    #[serde(default)]
    pub nested_object: NestedBlockObject,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub markdown_description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub deprecation_message: String,
    #[serde(skip)]
    pub implementation_validators: Vec<Arc<dyn ImplementationValidator>>,
}

impl Block {
    pub fn new(nesting_mode: BlockNestingMode, nested_object: NestedBlockObject) -> Self {
        Self {
            nesting_mode,
            nested_object,
            description: String::new(),
            markdown_description: String::new(),
            deprecation_message: String::new(),
            implementation_validators: Vec::new(),
        }
    }

    pub fn single(nested_object: NestedBlockObject) -> Self {
        Self::new(BlockNestingMode::Single, nested_object)
    }

    pub fn list(nested_object: NestedBlockObject) -> Self {
        Self::new(BlockNestingMode::List, nested_object)
    }

    pub fn set(nested_object: NestedBlockObject) -> Self {
        Self::new(BlockNestingMode::Set, nested_object)
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

    /// Attach an extra implementation check to this block.
    pub fn with_validator(mut self, validator: Arc<dyn ImplementationValidator>) -> Self {
        self.implementation_validators.push(validator);
        self
    }

    /// Object type of the nested block object, wrapped by the nesting mode.
    pub fn get_type(&self) -> Type {
        self.nesting_mode.wrap(self.nested_object.get_type())
    }

    pub fn equal(&self, other: &Block) -> bool {
        self.nesting_mode == other.nesting_mode
            && self.get_type() == other.get_type()
            && self.description == other.description
            && self.markdown_description == other.markdown_description
            && self.deprecation_message == other.deprecation_message
            && self.nested_object.equal(&other.nested_object)
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network_block() -> Block {
        Block::list(
            NestedBlockObject::new()
                .with_attribute("name", Attribute::new(Type::String).required())
                .with_block(
                    "subnet",
                    Block::set(
                        NestedBlockObject::new()
                            .with_attribute("cidr", Attribute::new(Type::String).required()),
                    ),
                ),
        )
    }

    #[test]
    fn test_block_type_includes_nested_blocks() {
        let expected = Type::list(Type::object([
            ("name", Type::String),
            (
                "subnet",
                Type::set(Type::object([("cidr", Type::String)])),
            ),
        ]));
        assert_eq!(network_block().get_type(), expected);
    }

    #[test]
    fn test_block_equality_reaches_nested_blocks() {
        let a = network_block();
        let mut b = network_block();
        assert_eq!(a, b);

        if let Some(subnet) = b.nested_object.blocks.get_mut("subnet") {
            subnet.nested_object.attributes.insert(
                "cidr".to_string(),
                Attribute::new(Type::String).required().sensitive(),
            );
        }
        assert_ne!(a, b);
    }

    #[test]
    fn test_nesting_mode_distinguishes_blocks() {
        let object = NestedBlockObject::new().with_attribute("x", Attribute::new(Type::Bool));
        assert_ne!(Block::list(object.clone()), Block::set(object));
    }
}
