//! Configuration for implementation validation

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a validation configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML for this structure
    #[error("Invalid validation config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid validation config: {0}")]
    Invalid(String),
}

/// Configuration for implementation validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationConfig {
    /// Maximum number of named levels to descend before reporting the schema
    /// as too deeply nested
    pub max_depth: usize,

    /// Reject reserved root attribute/block names
    pub check_reserved_names: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_depth: 32,
            check_reserved_names: true,
        }
    }
}

impl ValidationConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> ValidationConfigBuilder {
        ValidationConfigBuilder::default()
    }

    /// Parse a configuration from TOML text
    ///
    /// Missing keys take their default values.
    ///
    /// ```
    /// use plugin_schema::validation::ValidationConfig;
    ///
    /// let config = ValidationConfig::from_toml_str("maxDepth = 8").unwrap();
    /// assert_eq!(config.max_depth, 8);
    /// assert!(config.check_reserved_names);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ValidationConfig = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "maxDepth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for ValidationConfig
#[derive(Debug, Default)]
pub struct ValidationConfigBuilder {
    config: ValidationConfig,
}

impl ValidationConfigBuilder {
    /// Set the maximum nesting depth (at least 1)
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth.max(1);
        self
    }

    /// Enable or disable the reserved root name check
    pub fn check_reserved_names(mut self, check: bool) -> Self {
        self.config.check_reserved_names = check;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ValidationConfig {
        self.config
    }
}
