//! Paths into a schema tree
//!
//! Two distinct path concepts live here:
//! - [`AttributePath`] addresses a position the way a configuration value
//!   would: attribute names plus concrete list indexes, map keys and set values.
//!   The path resolver walks these.
//! - [`SchemaPath`] is synthesized while validating a schema, when no value
//!   exists yet. Collection positions are represented by placeholder steps.
//!
//! The two are deliberately separate types with no conversion between them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of an [`AttributePath`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStep {
    /// Descend into a named attribute or block.
    AttributeName(String),
    /// Descend into a list (or tuple) element by index.
    ElementKeyInt(i64),
    /// Descend into a map element by key.
    ElementKeyString(String),
    /// Descend into a set element, identified by its value.
    ElementKeyValue(serde_json::Value),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::AttributeName(name) => write!(f, "{name}"),
            PathStep::ElementKeyInt(index) => write!(f, "[{index}]"),
            PathStep::ElementKeyString(key) => write!(f, "[{key:?}]"),
            PathStep::ElementKeyValue(value) => write!(f, "[Value({value})]"),
        }
    }
}

/// An ordered sequence of [`PathStep`]s from the schema root.
///
/// # Example
///
/// ```rust
/// use plugin_schema::models::AttributePath;
///
/// let path = AttributePath::root("network").at_list_index(0).at_name("subnet_id");
/// assert_eq!(path.to_string(), "network[0].subnet_id");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributePath {
    steps: Vec<PathStep>,
}

impl AttributePath {
    /// Create an empty path addressing the root.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a path with a single attribute name step.
    pub fn root(name: impl Into<String>) -> Self {
        Self::empty().at_name(name)
    }

    /// Create a path from a sequence of steps.
    pub fn from_steps(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    /// Append an attribute name step.
    pub fn at_name(mut self, name: impl Into<String>) -> Self {
        self.steps.push(PathStep::AttributeName(name.into()));
        self
    }

    /// Append a list index step.
    pub fn at_list_index(mut self, index: i64) -> Self {
        self.steps.push(PathStep::ElementKeyInt(index));
        self
    }

    /// Append a map key step.
    pub fn at_map_key(mut self, key: impl Into<String>) -> Self {
        self.steps.push(PathStep::ElementKeyString(key.into()));
        self
    }

    /// Append a set value step.
    pub fn at_set_value(mut self, value: serde_json::Value) -> Self {
        self.steps.push(PathStep::ElementKeyValue(value));
        self
    }

    /// The steps of this path.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether this path addresses the root.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The first `len` steps of this path.
    pub fn prefix(&self, len: usize) -> AttributePath {
        Self::from_steps(self.steps[..len.min(self.steps.len())].to_vec())
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 && matches!(step, PathStep::AttributeName(_)) {
                write!(f, ".")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

/// One step of a [`SchemaPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaPathStep {
    /// A named attribute or block.
    Name(String),
    /// Stands in for every element of a list.
    AnyListIndex,
    /// Stands in for every element of a set.
    AnySetValue,
    /// Stands in for every element of a map.
    AnyMapKey,
}

impl fmt::Display for SchemaPathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaPathStep::Name(name) => write!(f, "{name}"),
            SchemaPathStep::AnyListIndex => write!(f, "[*]"),
            SchemaPathStep::AnySetValue => write!(f, "[{{*}}]"),
            SchemaPathStep::AnyMapKey => write!(f, "[\"*\"]"),
        }
    }
}

/// A path synthesized during schema validation.
///
/// Since no concrete value exists while a schema is being validated, list,
/// set and map nesting contribute a single representative placeholder step
/// rather than a real index or key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaPath {
    steps: Vec<SchemaPathStep>,
}

impl SchemaPath {
    /// Create a path with a single name step.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            steps: vec![SchemaPathStep::Name(name.into())],
        }
    }

    /// Append a name step.
    pub fn at_name(&self, name: impl Into<String>) -> Self {
        let mut steps = self.steps.clone();
        steps.push(SchemaPathStep::Name(name.into()));
        Self { steps }
    }

    /// Append a placeholder step, if any.
    pub fn at_placeholder(&self, placeholder: Option<SchemaPathStep>) -> Self {
        let mut steps = self.steps.clone();
        steps.extend(placeholder);
        Self { steps }
    }

    /// The steps of this path.
    pub fn steps(&self) -> &[SchemaPathStep] {
        &self.steps
    }

    /// Whether this path names a root-level attribute or block.
    pub fn is_root_level(&self) -> bool {
        self.steps.len() == 1
    }

    /// Number of named levels on this path.
    pub fn depth(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, SchemaPathStep::Name(_)))
            .count()
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 && matches!(step, SchemaPathStep::Name(_)) {
                write!(f, ".")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_path_display() {
        let path = AttributePath::root("tags")
            .at_map_key("env")
            .at_name("value")
            .at_set_value(serde_json::json!("a"));
        assert_eq!(path.to_string(), "tags[\"env\"].value[Value(\"a\")]");
        assert_eq!(path.len(), 4);
        assert_eq!(path.prefix(2).to_string(), "tags[\"env\"]");
    }

    #[test]
    fn test_schema_path_placeholders() {
        let path = SchemaPath::root("rule")
            .at_placeholder(Some(SchemaPathStep::AnyListIndex))
            .at_name("port")
            .at_placeholder(None)
            .at_name("range");
        assert_eq!(path.to_string(), "rule[*].port.range");
        assert_eq!(path.depth(), 3);
        assert!(!path.is_root_level());
        assert!(SchemaPath::root("rule").is_root_level());
    }

    #[test]
    fn test_schema_path_set_and_map_placeholders() {
        let set = SchemaPath::root("s").at_placeholder(Some(SchemaPathStep::AnySetValue));
        let map = SchemaPath::root("m").at_placeholder(Some(SchemaPathStep::AnyMapKey));
        assert_eq!(set.to_string(), "s[{*}]");
        assert_eq!(map.to_string(), "m[\"*\"]");
    }
}
