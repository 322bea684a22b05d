//! Attribute and block name rules
//!
//! Names must be lowercase identifiers. Root-level names additionally must not
//! collide with words the configuration language reserves for its own
//! meta-arguments.

use crate::models::{Diagnostics, SchemaKind, SchemaPath};
use once_cell::sync::Lazy;
use regex::Regex;

static VALID_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z_][a-z0-9_]*$").unwrap());

static DIGIT_START_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]").unwrap());

/// Root names reserved in provider schemas.
pub const RESERVED_PROVIDER_NAMES: &[&str] = &["alias", "version"];

/// Root names reserved in resource, data source and ephemeral resource schemas.
pub const RESERVED_RESOURCE_NAMES: &[&str] = &[
    "connection",
    "count",
    "depends_on",
    "for_each",
    "lifecycle",
    "provider",
    "provisioner",
];

/// Why a name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameViolation {
    /// The name starts with a digit.
    LeadingDigit,
    /// The name contains something other than `a-z`, `0-9` and `_`, or is empty.
    InvalidCharacters,
}

/// Check a name against the identifier pattern.
///
/// # Examples
///
/// ```
/// use plugin_schema::validation::names::{check_name, NameViolation};
///
/// assert_eq!(check_name("abc_1"), None);
/// assert_eq!(check_name("1abc"), Some(NameViolation::LeadingDigit));
/// assert_eq!(check_name("My-Attr"), Some(NameViolation::InvalidCharacters));
/// ```
pub fn check_name(name: &str) -> Option<NameViolation> {
    if VALID_NAME_REGEX.is_match(name) {
        None
    } else if DIGIT_START_REGEX.is_match(name) {
        Some(NameViolation::LeadingDigit)
    } else {
        Some(NameViolation::InvalidCharacters)
    }
}

/// Whether `name` is a valid attribute or block name.
pub fn is_valid_name(name: &str) -> bool {
    check_name(name).is_none()
}

/// Reserved root names for a schema kind.
pub fn reserved_names(kind: SchemaKind) -> &'static [&'static str] {
    match kind {
        SchemaKind::Provider => RESERVED_PROVIDER_NAMES,
        SchemaKind::Resource | SchemaKind::DataSource | SchemaKind::EphemeralResource => {
            RESERVED_RESOURCE_NAMES
        }
    }
}

/// Report an invalid name at `path`.
pub fn validate_name(name: &str, path: &SchemaPath, diags: &mut Diagnostics) {
    let Some(violation) = check_name(name) else {
        return;
    };
    let rule = match violation {
        NameViolation::LeadingDigit => {
            "Names must begin with a lowercase alphabet character (a-z) or underscore (_) and must only contain lowercase alphanumeric characters (a-z, 0-9) and underscores (_)."
        }
        NameViolation::InvalidCharacters => {
            "Names must only contain lowercase alphanumeric characters (a-z, 0-9) and underscores (_)."
        }
    };
    diags.add_error(
        path,
        "Invalid Attribute/Block Name",
        format!(
            "When validating the schema, an implementation issue was found. \
             This is always an issue with the provider and should be reported to the provider developers.\n\n\
             {name:?} at schema path {:?} is an invalid attribute/block name. {rule}",
            path.to_string()
        ),
    );
}

/// Report a reserved root name at `path`.
///
/// Only root-level paths are checked; the same word is legal deeper down.
pub fn validate_reserved_name(
    kind: SchemaKind,
    name: &str,
    path: &SchemaPath,
    diags: &mut Diagnostics,
) {
    if !path.is_root_level() || !reserved_names(kind).contains(&name) {
        return;
    }
    let scope = match kind {
        SchemaKind::Provider => "provider",
        SchemaKind::Resource | SchemaKind::DataSource | SchemaKind::EphemeralResource => {
            "resource or data source"
        }
    };
    diags.add_error(
        path,
        "Reserved Root Attribute/Block Name",
        format!(
            "When validating the {scope} schema, an implementation issue was found. \
             This is always an issue with the provider and should be reported to the provider developers.\n\n\
             {:?} is a reserved root attribute/block name. \
             This is to prevent practitioners from needing special configuration syntax.",
            path.to_string()
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_name() {
        assert_eq!(check_name("abc_1"), None);
        assert_eq!(check_name("_private"), None);
        assert_eq!(check_name("1abc"), Some(NameViolation::LeadingDigit));
        assert_eq!(check_name("My-Attr"), Some(NameViolation::InvalidCharacters));
        assert_eq!(check_name("has space"), Some(NameViolation::InvalidCharacters));
        assert_eq!(check_name(""), Some(NameViolation::InvalidCharacters));
    }

    #[test]
    fn test_leading_digit_message() {
        let mut diags = Diagnostics::new();
        validate_name("1abc", &SchemaPath::root("1abc"), &mut diags);
        assert_eq!(diags.len(), 1);
        let diag = diags.iter().next().unwrap();
        assert!(
            diag.detail
                .contains("begin with a lowercase alphabet character (a-z) or underscore")
        );
    }

    #[test]
    fn test_invalid_characters_message() {
        let mut diags = Diagnostics::new();
        validate_name("My-Attr", &SchemaPath::root("My-Attr"), &mut diags);
        let diag = diags.iter().next().unwrap();
        assert!(!diag.detail.contains("must begin with"));
        assert!(diag.detail.contains("\"My-Attr\""));
    }

    #[test]
    fn test_reserved_names_by_kind() {
        let root = SchemaPath::root("count");
        let mut diags = Diagnostics::new();
        validate_reserved_name(SchemaKind::Provider, "count", &root, &mut diags);
        assert!(diags.is_empty());
        validate_reserved_name(SchemaKind::DataSource, "count", &root, &mut diags);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_reserved_names_only_at_root() {
        let nested = SchemaPath::root("settings").at_name("alias");
        let mut diags = Diagnostics::new();
        validate_reserved_name(SchemaKind::Provider, "alias", &nested, &mut diags);
        assert!(diags.is_empty());
    }
}
