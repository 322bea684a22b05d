//! Models module
//!
//! Defines the schema node taxonomy and the collaborators it is built from:
//! value types, paths and diagnostics.

pub mod attribute;
pub mod block;
pub mod diagnostics;
pub mod path;
pub mod schema;
pub mod types;

pub use attribute::{Attribute, AttributeKind, NestedObject, NestingMode};
pub use block::{Block, BlockNestingMode, NestedBlockObject};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use path::{AttributePath, PathStep, SchemaPath, SchemaPathStep};
pub use schema::{Schema, SchemaKind};
pub use types::Type;
