//! CLI command implementations

pub mod validate;

pub use validate::{KindArg, OutputFormat, ValidateArgs, handle_validate, validate_document};
