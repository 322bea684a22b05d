//! Schema document loading
//!
//! Reads schemas authored as YAML or JSON documents.

pub mod loader;

pub use loader::{LoadError, SchemaFormat, load_schema_file, parse_schema};
