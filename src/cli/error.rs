//! CLI error types

use crate::model::LoadError;
use crate::validation::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the schema-lint binary
#[derive(Error, Debug)]
pub enum CliError {
    /// The schema file could not be read or parsed.
    #[error("Failed to load schema file {0}: {1}")]
    FileReadError(PathBuf, String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The schema loaded but has implementation errors.
    #[error("Schema validation failed with {0} error(s)")]
    ValidationError(usize),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::ValidationError(_) => 1,
            _ => 2,
        }
    }
}
