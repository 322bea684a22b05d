//! Schema implementation validation
//!
//! Provides the authoring-time checks run over a schema before it is served:
//! - Name rules (identifier pattern, reserved root names)
//! - Write-only placement rules
//! - Dynamic types inside collections
//! - Custom per-node implementation hooks

pub mod config;
pub mod implementation;
pub mod names;
pub mod write_only;

pub use config::{ConfigError, ValidationConfig, ValidationConfigBuilder};
pub use implementation::{
    ImplementationValidator, ValidateImplementationRequest, validate_attribute_implementation,
    validate_block_implementation, validate_schema, validate_schema_with,
};
pub use names::{NameViolation, is_valid_name};
