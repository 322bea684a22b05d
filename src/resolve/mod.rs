//! Path resolution
//!
//! Walks a schema tree along an [`AttributePath`] and returns the addressed
//! node. Resolution is pure: the same root and path always give the same
//! result.
//!
//! Step rules:
//! - schemas and objects accept attribute name steps, looking in the
//!   attribute map first and then in the block map
//! - single nesting descends straight into the nested object by name
//! - list, set and map nesting need an index, value or key step respectively,
//!   which lands on the nested object
//! - a plain attribute hands the remaining steps to its declared type
//! - a dynamic type accepts no steps at all

use crate::models::{
    Attribute, AttributeKind, AttributePath, Block, BlockNestingMode, NestedBlockObject,
    NestedObject, NestingMode, PathStep, Schema, Type,
};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors returned when a path cannot be resolved to the requested node.
///
/// None of these are transient; the tree never changes between calls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("path is empty and leads to the schema root")]
    EmptyPath,

    #[error("no attribute or block named {name:?} at {path}")]
    NotFound { name: String, path: AttributePath },

    #[error("path step {step} cannot be applied at {path}")]
    UnsupportedStep { step: PathStep, path: AttributePath },

    /// The path continues below a plain attribute's declared type.
    #[error("{path} is inside an attribute; schema information stops at the attribute's declared type")]
    InsideAtomicAttribute { path: AttributePath },

    /// The path continues into a dynamically typed attribute, which has no
    /// further schema. Callers should stop descending rather than fail.
    #[error("{path} is inside a dynamic attribute; no schema exists below it")]
    InsideDynamicAttribute { path: AttributePath },

    #[error("{path} leads to a block; use the block accessor instead")]
    IsBlock { path: AttributePath },

    #[error("{path} leads to a nested object rather than an attribute")]
    IsNestedObject { path: AttributePath },

    #[error("{path} does not lead to a block")]
    NotBlock { path: AttributePath },
}

/// A borrowed node in a schema tree.
#[derive(Debug, Clone, Copy)]
pub enum SchemaNode<'a> {
    Schema(&'a Schema),
    Attribute(&'a Attribute),
    NestedObject(&'a NestedObject),
    Block(&'a Block),
    NestedBlockObject(&'a NestedBlockObject),
    /// A position inside a plain attribute's declared type.
    Type(&'a Type),
}

impl SchemaNode<'_> {
    /// Type of the value found at this node.
    pub fn get_type(&self) -> Type {
        match self {
            SchemaNode::Schema(schema) => schema.get_type(),
            SchemaNode::Attribute(attribute) => attribute.get_type(),
            SchemaNode::NestedObject(object) => object.get_type(),
            SchemaNode::Block(block) => block.get_type(),
            SchemaNode::NestedBlockObject(object) => object.get_type(),
            SchemaNode::Type(ty) => (*ty).clone(),
        }
    }
}

impl<'a> From<&'a Schema> for SchemaNode<'a> {
    fn from(schema: &'a Schema) -> Self {
        SchemaNode::Schema(schema)
    }
}

impl<'a> From<&'a NestedObject> for SchemaNode<'a> {
    fn from(object: &'a NestedObject) -> Self {
        SchemaNode::NestedObject(object)
    }
}

impl<'a> From<&'a NestedBlockObject> for SchemaNode<'a> {
    fn from(object: &'a NestedBlockObject) -> Self {
        SchemaNode::NestedBlockObject(object)
    }
}

/// Why a single step failed, before the path context is attached.
enum StepFailure {
    NotFound(String),
    Unsupported,
    Dynamic,
}

/// Walk `path` from `root` and return the node it addresses.
pub fn resolve<'a>(
    root: impl Into<SchemaNode<'a>>,
    path: &AttributePath,
) -> Result<SchemaNode<'a>, PathError> {
    let mut node = root.into();
    for (index, step) in path.steps().iter().enumerate() {
        node = apply_step(node, step).map_err(|failure| match failure {
            StepFailure::NotFound(name) => PathError::NotFound {
                name,
                path: path.prefix(index + 1),
            },
            StepFailure::Unsupported => PathError::UnsupportedStep {
                step: step.clone(),
                path: path.prefix(index),
            },
            StepFailure::Dynamic => PathError::InsideDynamicAttribute {
                path: path.prefix(index),
            },
        })?;
    }
    Ok(node)
}

/// Resolve `path` to an attribute.
///
/// A path that stops inside a plain attribute's type, even on a dynamic
/// element such as `values[0]` of a `list(dynamic)`, fails with
/// [`PathError::InsideAtomicAttribute`]. [`PathError::InsideDynamicAttribute`]
/// is reserved for paths with steps left after a dynamic node.
///
/// # Example
///
/// ```rust
/// use plugin_schema::models::{Attribute, AttributePath, NestedObject, Schema, SchemaKind, Type};
/// use plugin_schema::resolve::attribute_at_path;
///
/// let schema = Schema::new(SchemaKind::Resource).with_attribute(
///     "rule",
///     Attribute::list_nested(NestedObject::new().with_attribute("port", Attribute::new(Type::Int64))),
/// );
/// let port = attribute_at_path(&schema, &AttributePath::root("rule").at_list_index(0).at_name("port"))?;
/// assert_eq!(port.get_type(), Type::Int64);
/// # Ok::<(), plugin_schema::resolve::PathError>(())
/// ```
pub fn attribute_at_path<'a>(
    root: impl Into<SchemaNode<'a>>,
    path: &AttributePath,
) -> Result<&'a Attribute, PathError> {
    match resolve(root, path)? {
        SchemaNode::Attribute(attribute) => Ok(attribute),
        SchemaNode::Block(_) => Err(PathError::IsBlock { path: path.clone() }),
        SchemaNode::Schema(_) => Err(PathError::EmptyPath),
        SchemaNode::NestedObject(_) | SchemaNode::NestedBlockObject(_) => {
            Err(PathError::IsNestedObject { path: path.clone() })
        }
        // Landing on a dynamic element is still inside the attribute's own
        // type; only steps taken beyond a dynamic node are dynamic failures.
        SchemaNode::Type(_) => Err(PathError::InsideAtomicAttribute { path: path.clone() }),
    }
}

/// Resolve `path` to a block.
pub fn block_at_path<'a>(
    root: impl Into<SchemaNode<'a>>,
    path: &AttributePath,
) -> Result<&'a Block, PathError> {
    match resolve(root, path)? {
        SchemaNode::Block(block) => Ok(block),
        SchemaNode::Schema(_) => Err(PathError::EmptyPath),
        _ => Err(PathError::NotBlock { path: path.clone() }),
    }
}

/// Type of the value at `path`, without materializing an attribute.
///
/// Unlike [`attribute_at_path`], positions inside a plain attribute's type
/// are answered. Positions inside a dynamic type are still an error.
pub fn type_at_path<'a>(
    root: impl Into<SchemaNode<'a>>,
    path: &AttributePath,
) -> Result<Type, PathError> {
    resolve(root, path).map(|node| node.get_type())
}

fn apply_step<'a>(node: SchemaNode<'a>, step: &PathStep) -> Result<SchemaNode<'a>, StepFailure> {
    match node {
        SchemaNode::Schema(schema) => lookup_name(&schema.attributes, Some(&schema.blocks), step),
        SchemaNode::NestedObject(object) => lookup_name(&object.attributes, None, step),
        SchemaNode::NestedBlockObject(object) => {
            lookup_name(&object.attributes, Some(&object.blocks), step)
        }
        SchemaNode::Attribute(attribute) => match &attribute.kind {
            AttributeKind::Primitive { attribute_type } => apply_type_step(attribute_type, step),
            AttributeKind::Nested {
                nesting_mode,
                nested_object,
            } => match (nesting_mode, step) {
                (NestingMode::Single, PathStep::AttributeName(_)) => {
                    apply_step(SchemaNode::NestedObject(nested_object), step)
                }
                (NestingMode::List, PathStep::ElementKeyInt(_))
                | (NestingMode::Set, PathStep::ElementKeyValue(_))
                | (NestingMode::Map, PathStep::ElementKeyString(_)) => {
                    Ok(SchemaNode::NestedObject(nested_object))
                }
                _ => Err(StepFailure::Unsupported),
            },
        },
        SchemaNode::Block(block) => match (block.nesting_mode, step) {
            (BlockNestingMode::Single, PathStep::AttributeName(_)) => {
                apply_step(SchemaNode::NestedBlockObject(&block.nested_object), step)
            }
            (BlockNestingMode::List, PathStep::ElementKeyInt(_))
            | (BlockNestingMode::Set, PathStep::ElementKeyValue(_)) => {
                Ok(SchemaNode::NestedBlockObject(&block.nested_object))
            }
            _ => Err(StepFailure::Unsupported),
        },
        SchemaNode::Type(ty) => apply_type_step(ty, step),
    }
}

fn lookup_name<'a>(
    attributes: &'a BTreeMap<String, Attribute>,
    blocks: Option<&'a BTreeMap<String, Block>>,
    step: &PathStep,
) -> Result<SchemaNode<'a>, StepFailure> {
    let PathStep::AttributeName(name) = step else {
        return Err(StepFailure::Unsupported);
    };
    if let Some(attribute) = attributes.get(name) {
        return Ok(SchemaNode::Attribute(attribute));
    }
    blocks
        .and_then(|blocks| blocks.get(name))
        .map(SchemaNode::Block)
        .ok_or_else(|| StepFailure::NotFound(name.clone()))
}

fn apply_type_step<'a>(ty: &'a Type, step: &PathStep) -> Result<SchemaNode<'a>, StepFailure> {
    if ty.is_dynamic() {
        return Err(StepFailure::Dynamic);
    }
    if let Some(next) = ty.apply_step(step) {
        return Ok(SchemaNode::Type(next));
    }
    match (ty, step) {
        (Type::Object(_), PathStep::AttributeName(name)) => Err(StepFailure::NotFound(name.clone())),
        _ => Err(StepFailure::Unsupported),
    }
}

impl Schema {
    /// Attribute at `path`. See [`attribute_at_path`].
    pub fn attribute_at_path(&self, path: &AttributePath) -> Result<&Attribute, PathError> {
        attribute_at_path(self, path)
    }

    /// Block at `path`. See [`block_at_path`].
    pub fn block_at_path(&self, path: &AttributePath) -> Result<&Block, PathError> {
        block_at_path(self, path)
    }

    /// Type at `path`. See [`type_at_path`].
    pub fn type_at_path(&self, path: &AttributePath) -> Result<Type, PathError> {
        type_at_path(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SchemaKind;

    fn schema() -> Schema {
        Schema::new(SchemaKind::Resource)
            .with_attribute("name", Attribute::new(Type::String).required())
            .with_attribute("payload", Attribute::new(Type::Dynamic).optional())
            .with_attribute(
                "settings",
                Attribute::single_nested(
                    NestedObject::new().with_attribute("enabled", Attribute::new(Type::Bool)),
                ),
            )
    }

    #[test]
    fn test_single_nesting_descends_by_name() {
        let schema = schema();
        let path = AttributePath::root("settings").at_name("enabled");
        let attribute = schema.attribute_at_path(&path).unwrap();
        assert_eq!(attribute.get_type(), Type::Bool);
    }

    #[test]
    fn test_unsupported_step_reports_prefix() {
        let schema = schema();
        let path = AttributePath::root("settings").at_list_index(0);
        assert_eq!(
            schema.attribute_at_path(&path),
            Err(PathError::UnsupportedStep {
                step: PathStep::ElementKeyInt(0),
                path: AttributePath::root("settings"),
            })
        );
    }

    #[test]
    fn test_dynamic_short_circuit_reports_dynamic_attribute() {
        let schema = schema();
        let path = AttributePath::root("payload").at_name("x").at_name("y");
        assert_eq!(
            schema.attribute_at_path(&path),
            Err(PathError::InsideDynamicAttribute {
                path: AttributePath::root("payload"),
            })
        );
    }

    #[test]
    fn test_empty_path() {
        let schema = schema();
        assert_eq!(
            schema.attribute_at_path(&AttributePath::empty()),
            Err(PathError::EmptyPath)
        );
        assert_eq!(
            schema.type_at_path(&AttributePath::empty()),
            Ok(schema.get_type())
        );
    }
}
