//! Schema implementation validation
//!
//! Walks a schema once, top-down, and reports authoring mistakes that would
//! otherwise surface later as confusing data-layer failures:
//! - invalid and reserved attribute/block names
//! - write-only values placed where they cannot work (set nesting, computed
//!   nesting, write-only nesting with non-write-only children)
//! - collections whose element type contains a dynamic type
//! - unset nesting modes and excessive nesting depth
//!
//! Problems are returned as diagnostics, never as errors. A bad node does not
//! stop the walk, so one pass reports everything it can find. A node's own
//! diagnostics are always appended before those of its children.

use super::config::ValidationConfig;
use super::names::{validate_name, validate_reserved_name};
use super::write_only::{
    block_contains_any_write_only_children, contains_all_write_only_children,
    contains_any_write_only_children,
};
use crate::models::{
    Attribute, Block, BlockNestingMode, Diagnostics, NestingMode, Schema, SchemaKind, SchemaPath,
    SchemaPathStep,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

const IMPLEMENTATION_ISSUE: &str = "When validating the schema, an implementation issue was found. \
     This is always an issue with the provider and should be reported to the provider developers.";

/// Extra authoring-time check attached to an attribute or block.
///
/// Runs once per node during implementation validation. Anything it appends
/// to `diags` is merged into the pass result; reporting an error does not stop
/// validation of siblings or children.
///
/// # Example
///
/// ```rust
/// use plugin_schema::models::{Attribute, Diagnostics, Schema, SchemaKind, Type};
/// use plugin_schema::validation::{ImplementationValidator, ValidateImplementationRequest};
/// use std::sync::Arc;
///
/// #[derive(Debug)]
/// struct RequireDescription;
///
/// impl ImplementationValidator for RequireDescription {
///     fn validate_implementation(&self, req: &ValidateImplementationRequest, diags: &mut Diagnostics) {
///         diags.add_warning(&req.path, "Missing Description", format!("{} has no description", req.name));
///     }
/// }
///
/// let schema = Schema::new(SchemaKind::Resource).with_attribute(
///     "name",
///     Attribute::new(Type::String).required().with_validator(Arc::new(RequireDescription)),
/// );
/// let diags = schema.validate_implementation();
/// assert_eq!(diags.warnings().count(), 1);
/// assert!(!diags.has_error());
/// ```
pub trait ImplementationValidator: Send + Sync + fmt::Debug {
    fn validate_implementation(&self, req: &ValidateImplementationRequest, diags: &mut Diagnostics);
}

/// Where a node sits in the schema being validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateImplementationRequest {
    /// Name of the attribute or block under validation.
    pub name: String,
    /// Synthesized schema path of the node.
    pub path: SchemaPath,
    /// Kind of the schema the node belongs to.
    pub schema_kind: SchemaKind,
}

impl ValidateImplementationRequest {
    /// Request for a root-level node.
    pub fn root(schema_kind: SchemaKind, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: SchemaPath::root(name.clone()),
            name,
            schema_kind,
        }
    }

    fn child(&self, placeholder: Option<SchemaPathStep>, name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: self.path.at_placeholder(placeholder).at_name(name),
            schema_kind: self.schema_kind,
        }
    }
}

/// Validate a whole schema with the default configuration.
pub fn validate_schema(schema: &Schema) -> Diagnostics {
    validate_schema_with(schema, &ValidationConfig::default())
}

/// Validate a whole schema.
pub fn validate_schema_with(schema: &Schema, config: &ValidationConfig) -> Diagnostics {
    debug!(
        "Validating {} schema implementation ({} attributes, {} blocks)",
        schema.kind,
        schema.attributes.len(),
        schema.blocks.len()
    );

    let mut walker = Walker::new(config);
    walker.duplicate_names(&schema.attributes, &schema.blocks, None);
    for (name, attribute) in &schema.attributes {
        walker.attribute(
            attribute,
            &ValidateImplementationRequest::root(schema.kind, name),
            false,
        );
    }
    for (name, block) in &schema.blocks {
        walker.block(block, &ValidateImplementationRequest::root(schema.kind, name));
    }

    let diags = walker.diags;
    debug!(
        "Schema implementation validation finished with {} diagnostics ({} errors)",
        diags.len(),
        diags.errors().count()
    );
    diags
}

/// Validate one attribute and everything below it.
pub fn validate_attribute_implementation(
    attribute: &Attribute,
    req: &ValidateImplementationRequest,
    config: &ValidationConfig,
) -> Diagnostics {
    let mut walker = Walker::new(config);
    walker.attribute(attribute, req, false);
    walker.diags
}

/// Validate one block and everything below it.
pub fn validate_block_implementation(
    block: &Block,
    req: &ValidateImplementationRequest,
    config: &ValidationConfig,
) -> Diagnostics {
    let mut walker = Walker::new(config);
    walker.block(block, req);
    walker.diags
}

impl Schema {
    /// Validate this schema with the default configuration.
    ///
    /// Any error-severity diagnostic means the schema must not be served.
    pub fn validate_implementation(&self) -> Diagnostics {
        validate_schema(self)
    }

    /// Validate this schema with `config`.
    pub fn validate_implementation_with(&self, config: &ValidationConfig) -> Diagnostics {
        validate_schema_with(self, config)
    }
}

struct Walker<'c> {
    config: &'c ValidationConfig,
    diags: Diagnostics,
}

impl<'c> Walker<'c> {
    fn new(config: &'c ValidationConfig) -> Self {
        Self {
            config,
            diags: Diagnostics::new(),
        }
    }

    /// Checks shared by attributes and blocks. Returns false when the node is
    /// too deep to descend into.
    fn common(
        &mut self,
        req: &ValidateImplementationRequest,
        validators: &[Arc<dyn ImplementationValidator>],
    ) -> bool {
        let depth = req.path.depth();
        if depth > self.config.max_depth {
            warn!(
                "Schema nesting at {} exceeds the maximum depth of {}",
                req.path, self.config.max_depth
            );
            self.diags.add_error(
                &req.path,
                "Schema Nesting Too Deep",
                format!(
                    "{IMPLEMENTATION_ISSUE}\n\n{:?} is nested {depth} levels deep, which exceeds the maximum of {}. \
                     Validation did not descend further.",
                    req.path.to_string(),
                    self.config.max_depth
                ),
            );
            return false;
        }

        validate_name(&req.name, &req.path, &mut self.diags);
        if self.config.check_reserved_names {
            validate_reserved_name(req.schema_kind, &req.name, &req.path, &mut self.diags);
        }
        for validator in validators {
            validator.validate_implementation(req, &mut self.diags);
        }
        true
    }

    fn attribute(
        &mut self,
        attribute: &Attribute,
        req: &ValidateImplementationRequest,
        inside_write_only: bool,
    ) {
        if !self.common(req, &attribute.implementation_validators) {
            return;
        }
        let path = &req.path;

        if attribute.write_only && attribute.required && attribute.optional {
            self.invalid(
                path,
                format!(
                    "{:?} is a write-only attribute set with both Required and Optional. \
                     Write-only attributes must be set with only one of Required or Optional.",
                    path.to_string()
                ),
            );
        }
        if attribute.write_only && attribute.computed {
            self.invalid(
                path,
                format!(
                    "{:?} is a write-only attribute that is also Computed. \
                     Write-only attributes cannot be Computed.",
                    path.to_string()
                ),
            );
        }

        let Some((mode, object)) = attribute.as_nested() else {
            if attribute.get_type().contains_collection_with_dynamic() {
                self.collection_with_dynamic(path, "attribute");
            }
            return;
        };

        if mode == NestingMode::Unknown {
            self.unknown_nesting_mode(path, "nested attribute");
        }
        if matches!(mode, NestingMode::List | NestingMode::Set | NestingMode::Map)
            && object.get_type().contains_dynamic()
        {
            self.collection_with_dynamic(path, "nested attribute");
        }

        // Reported once, at the outermost write-only ancestor.
        if attribute.write_only && !inside_write_only && !contains_all_write_only_children(object)
        {
            self.invalid(
                path,
                format!(
                    "{:?} is a write-only nested attribute that contains a non-write-only child attribute.\n\n\
                     Every child attribute of a write-only nested attribute must also be write-only.",
                    path.to_string()
                ),
            );
        }
        if mode == NestingMode::Set && contains_any_write_only_children(object) {
            self.invalid(
                path,
                format!(
                    "{:?} is a set nested attribute that contains a write-only child attribute.\n\n\
                     Every child attribute of a set nested attribute must have write-only set to false.",
                    path.to_string()
                ),
            );
        }
        if attribute.computed && contains_any_write_only_children(object) {
            self.invalid(
                path,
                format!(
                    "{:?} is a computed nested attribute that contains a write-only child attribute.\n\n\
                     Every child attribute of a computed nested attribute must have write-only set to false.",
                    path.to_string()
                ),
            );
        }

        let placeholder = mode.placeholder();
        for (name, child) in &object.attributes {
            self.attribute(
                child,
                &req.child(placeholder.clone(), name),
                inside_write_only || attribute.write_only,
            );
        }
    }

    fn block(&mut self, block: &Block, req: &ValidateImplementationRequest) {
        if !self.common(req, &block.implementation_validators) {
            return;
        }
        let path = &req.path;
        let object = &block.nested_object;

        if block.nesting_mode == BlockNestingMode::Unknown {
            self.unknown_nesting_mode(path, "block");
        }
        if matches!(block.nesting_mode, BlockNestingMode::List | BlockNestingMode::Set)
            && object.get_type().contains_dynamic()
        {
            self.collection_with_dynamic(path, "block");
        }
        if block.nesting_mode == BlockNestingMode::Set && block_contains_any_write_only_children(block)
        {
            self.invalid(
                path,
                format!(
                    "{:?} is a set nested block that contains a write-only child attribute.\n\n\
                     Every child attribute of a set nested block must have write-only set to false.",
                    path.to_string()
                ),
            );
        }

        self.duplicate_names(&object.attributes, &object.blocks, Some(path));

        let placeholder = block.nesting_mode.placeholder();
        for (name, child) in &object.attributes {
            self.attribute(child, &req.child(placeholder.clone(), name), false);
        }
        for (name, child) in &object.blocks {
            self.block(child, &req.child(placeholder.clone(), name));
        }
    }

    fn duplicate_names(
        &mut self,
        attributes: &BTreeMap<String, Attribute>,
        blocks: &BTreeMap<String, Block>,
        parent: Option<&SchemaPath>,
    ) {
        for name in attributes.keys().filter(|name| blocks.contains_key(*name)) {
            let path = match parent {
                Some(parent) => parent.at_name(name),
                None => SchemaPath::root(name),
            };
            self.invalid(
                &path,
                format!(
                    "{:?} is declared as both an attribute and a block. \
                     Attribute and block names must be unique within the same object.",
                    path.to_string()
                ),
            );
        }
    }

    fn invalid(&mut self, path: &SchemaPath, problem: String) {
        self.diags.add_error(
            path,
            "Invalid Schema Implementation",
            format!("{IMPLEMENTATION_ISSUE}\n\n{problem}"),
        );
    }

    fn unknown_nesting_mode(&mut self, path: &SchemaPath, what: &str) {
        self.invalid(
            path,
            format!(
                "{:?} is a {what} without a nesting mode. Set one of the supported nesting modes.",
                path.to_string()
            ),
        );
    }

    fn collection_with_dynamic(&mut self, path: &SchemaPath, what: &str) {
        self.invalid(
            path,
            format!(
                "{:?} is an {what} that uses a list, set or map containing a dynamic type. \
                 Every element of a collection must share one type, which a dynamic type cannot guarantee. \
                 Use a dynamic attribute or a tuple instead.",
                path.to_string()
            ),
        );
    }
}
