//! Validate command implementation

use crate::cli::error::CliError;
use crate::cli::output::{format_compact_output, format_json_output, format_pretty_output};
use crate::model::{SchemaFormat, load_schema_file, parse_schema};
use crate::models::{Diagnostics, Schema, SchemaKind};
use crate::validation::ValidationConfig;
use clap::{Args, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Schema kind accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Provider,
    Resource,
    DataSource,
    EphemeralResource,
}

impl From<KindArg> for SchemaKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Provider => SchemaKind::Provider,
            KindArg::Resource => SchemaKind::Resource,
            KindArg::DataSource => SchemaKind::DataSource,
            KindArg::EphemeralResource => SchemaKind::EphemeralResource,
        }
    }
}

/// How diagnostics are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Schema document (.yaml, .yml or .json), or "-" for YAML/JSON on stdin
    pub input: String,

    /// Override the schema kind declared in the document
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,

    /// TOML file with validation settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Compact)]
    pub format: OutputFormat,
}

/// Read a schema document from stdin
fn read_stdin() -> Result<String, CliError> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
    Ok(content)
}

fn load_config(path: Option<&Path>) -> Result<ValidationConfig, CliError> {
    match path {
        Some(path) => Ok(ValidationConfig::from_file(path)?),
        None => Ok(ValidationConfig::default()),
    }
}

/// Load the schema named by `input`, applying the kind override
///
/// Files go through the library loader; "-" reads YAML or JSON from stdin.
fn load_schema(input: &str, kind: Option<SchemaKind>) -> Result<Schema, CliError> {
    if input == "-" {
        // JSON documents are valid YAML.
        let mut schema = parse_schema(&read_stdin()?, SchemaFormat::Yaml)?;
        if let Some(kind) = kind {
            schema.kind = kind;
        }
        return Ok(schema);
    }

    let path = PathBuf::from(input);
    load_schema_file(&path, kind).map_err(|e| CliError::FileReadError(path, format!("{:#}", e)))
}

/// Validate a schema document and return its diagnostics
pub fn validate_document(args: &ValidateArgs) -> Result<Diagnostics, CliError> {
    let config = load_config(args.config.as_deref())?;
    let schema = load_schema(&args.input, args.kind.map(SchemaKind::from))?;
    info!("Validating {} schema from {}", schema.kind, args.input);
    Ok(schema.validate_implementation_with(&config))
}

/// Handle the validate command
///
/// Prints every diagnostic. Fails with [`CliError::ValidationError`] when any
/// of them is an error.
pub fn handle_validate(args: &ValidateArgs) -> Result<(), CliError> {
    let diags = validate_document(args)?;

    let output = match args.format {
        OutputFormat::Compact => format_compact_output(&diags),
        OutputFormat::Pretty => format_pretty_output(&diags),
        OutputFormat::Json => format_json_output(&diags)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to encode diagnostics: {}", e)))?,
    };
    println!("{}", output.trim_end());

    let errors = diags.errors().count();
    if errors > 0 {
        return Err(CliError::ValidationError(errors));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(input: &str) -> ValidateArgs {
        ValidateArgs {
            input: input.to_string(),
            kind: None,
            config: None,
            format: OutputFormat::Compact,
        }
    }

    fn schema_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_kind_override_changes_reserved_names() {
        let file = schema_file(
            "kind: resource\nattributes:\n  alias:\n    kind: primitive\n    type: string\n    optional: true\n",
        );
        let mut args = args(&file.path().display().to_string());
        assert!(validate_document(&args).unwrap().is_empty());

        args.kind = Some(KindArg::Provider);
        assert_eq!(validate_document(&args).unwrap().errors().count(), 1);
    }

    #[test]
    fn test_handle_validate_fails_on_errors() {
        let file = schema_file(
            "attributes:\n  Bad-Name:\n    kind: primitive\n    type: string\n    optional: true\n",
        );
        let result = handle_validate(&args(&file.path().display().to_string()));
        assert!(matches!(result, Err(CliError::ValidationError(1))));
    }

    #[test]
    fn test_missing_file() {
        let result = validate_document(&args("/nonexistent/schema.yaml"));
        assert!(matches!(result, Err(CliError::FileReadError(..))));
    }

    #[test]
    fn test_unparseable_file_reports_cause() {
        let file = schema_file("attributes:\n  name:\n    kind: primitive\n    type: text\n");
        let err = validate_document(&args(&file.path().display().to_string())).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Failed to parse schema file"), "{message}");
        assert!(message.contains("text"), "{message}");
    }
}
