//! Plugin Schema - schema definition and implementation validation engine
//!
//! Provides:
//! - A typed schema tree (attributes, nested attributes, blocks)
//! - Path resolution from a data path to the schema node it addresses
//! - Type derivation and structural equality over schema trees
//! - Implementation validation reporting authoring mistakes as diagnostics
//! - Loading schemas from YAML or JSON documents
//!
//! # Example
//!
//! ```rust
//! use plugin_schema::{Attribute, AttributePath, NestedObject, Schema, SchemaKind, Type};
//!
//! let schema = Schema::new(SchemaKind::Resource)
//!     .with_attribute("name", Attribute::new(Type::String).required())
//!     .with_attribute(
//!         "credentials",
//!         Attribute::single_nested(
//!             NestedObject::new()
//!                 .with_attribute("password", Attribute::new(Type::String).optional().write_only()),
//!         )
//!         .optional()
//!         .write_only(),
//!     );
//!
//! assert!(!schema.validate_implementation().has_error());
//!
//! let path = AttributePath::root("credentials").at_name("password");
//! assert!(schema.attribute_at_path(&path)?.write_only);
//! # Ok::<(), plugin_schema::PathError>(())
//! ```

pub mod cli;
pub mod model;
pub mod models;
pub mod resolve;
pub mod validation;

// Re-export commonly used types
pub use model::{LoadError, SchemaFormat, load_schema_file, parse_schema};
pub use models::{
    Attribute, AttributeKind, AttributePath, Block, BlockNestingMode, Diagnostic, Diagnostics,
    NestedBlockObject, NestedObject, NestingMode, PathStep, Schema, SchemaKind, SchemaPath,
    SchemaPathStep, Severity, Type,
};
pub use resolve::{PathError, SchemaNode, attribute_at_path, block_at_path, type_at_path};
pub use validation::{
    ImplementationValidator, ValidateImplementationRequest, ValidationConfig, validate_schema,
};
