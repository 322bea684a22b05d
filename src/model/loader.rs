//! Schema loading functionality
//!
//! Loads schema documents authored as YAML or JSON. The document shape is the
//! serde representation of [`Schema`]; custom implementation validators are
//! runtime-only and cannot be expressed in a document.

use crate::models::{Schema, SchemaKind};
use anyhow::{Context, Result};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while parsing a schema document
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Invalid YAML schema document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON schema document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported schema document extension: {0}")]
    UnsupportedExtension(String),
}

/// Schema document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Yaml,
    Json,
}

impl SchemaFormat {
    /// Detect the format from a file extension.
    ///
    /// Files without an extension are read as YAML.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            None | Some("yaml") | Some("yml") => Ok(SchemaFormat::Yaml),
            Some("json") => Ok(SchemaFormat::Json),
            Some(other) => Err(LoadError::UnsupportedExtension(other.to_string())),
        }
    }
}

/// Parse a schema document.
///
/// ```
/// use plugin_schema::model::{parse_schema, SchemaFormat};
/// use plugin_schema::models::SchemaKind;
///
/// let yaml = r#"
/// kind: data_source
/// attributes:
///   id:
///     kind: primitive
///     type: string
///     computed: true
/// "#;
/// let schema = parse_schema(yaml, SchemaFormat::Yaml)?;
/// assert_eq!(schema.kind, SchemaKind::DataSource);
/// assert!(schema.get_attributes().contains_key("id"));
/// # Ok::<(), plugin_schema::model::LoadError>(())
/// ```
pub fn parse_schema(content: &str, format: SchemaFormat) -> Result<Schema, LoadError> {
    let schema = match format {
        SchemaFormat::Yaml => serde_yaml::from_str(content)?,
        SchemaFormat::Json => serde_json::from_str(content)?,
    };
    Ok(schema)
}

/// Load a schema document from a file.
///
/// When `kind` is given it replaces whatever kind the document declares.
pub fn load_schema_file(path: impl AsRef<Path>, kind: Option<SchemaKind>) -> Result<Schema> {
    let path = path.as_ref();
    let format = SchemaFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file {}", path.display()))?;
    let mut schema = parse_schema(&content, format)
        .with_context(|| format!("Failed to parse schema file {}", path.display()))?;
    if let Some(kind) = kind {
        schema.kind = kind;
    }

    info!(
        "Loaded {} schema from {} ({} attributes, {} blocks)",
        schema.kind,
        path.display(),
        schema.attributes.len(),
        schema.blocks.len()
    );
    Ok(schema)
}
