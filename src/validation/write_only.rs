//! Write-only descendant queries
//!
//! Write-only values are never persisted or diffed. That conflicts with set
//! membership, which is decided by value, and with computed values, which
//! are read back after apply. These helpers answer what a nested attribute or
//! block contains so the implementation validator can reject the conflicts.

use crate::models::{Block, NestedObject};

/// Whether every attribute under `object`, at any depth, is write-only.
pub fn contains_all_write_only_children(object: &NestedObject) -> bool {
    object.attributes.values().all(|attribute| {
        attribute.write_only
            && attribute
                .as_nested()
                .is_none_or(|(_, nested)| contains_all_write_only_children(nested))
    })
}

/// Whether any attribute under `object`, at any depth, is write-only.
pub fn contains_any_write_only_children(object: &NestedObject) -> bool {
    object.attributes.values().any(|attribute| {
        attribute.write_only
            || attribute
                .as_nested()
                .is_some_and(|(_, nested)| contains_any_write_only_children(nested))
    })
}

/// Whether any attribute under `block`, including inside nested blocks, is
/// write-only.
pub fn block_contains_any_write_only_children(block: &Block) -> bool {
    let object = &block.nested_object;
    object.attributes.values().any(|attribute| {
        attribute.write_only
            || attribute
                .as_nested()
                .is_some_and(|(_, nested)| contains_any_write_only_children(nested))
    }) || object
        .blocks
        .values()
        .any(block_contains_any_write_only_children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attribute, NestedBlockObject, Type};

    fn write_only_string() -> Attribute {
        Attribute::new(Type::String).optional().write_only()
    }

    #[test]
    fn test_all_write_only_recurses() {
        let inner = NestedObject::new().with_attribute("secret", write_only_string());
        let outer = NestedObject::new()
            .with_attribute("token", write_only_string())
            .with_attribute("inner", Attribute::single_nested(inner).write_only());
        assert!(contains_all_write_only_children(&outer));

        let leaky = NestedObject::new().with_attribute(
            "inner",
            Attribute::single_nested(
                NestedObject::new().with_attribute("plain", Attribute::new(Type::String)),
            )
            .write_only(),
        );
        assert!(!contains_all_write_only_children(&leaky));
    }

    #[test]
    fn test_empty_object_is_all_write_only() {
        assert!(contains_all_write_only_children(&NestedObject::new()));
        assert!(!contains_any_write_only_children(&NestedObject::new()));
    }

    #[test]
    fn test_any_write_only_finds_grandchild() {
        let object = NestedObject::new().with_attribute(
            "inner",
            Attribute::list_nested(NestedObject::new().with_attribute("secret", write_only_string())),
        );
        assert!(contains_any_write_only_children(&object));
    }

    #[test]
    fn test_block_search_reaches_nested_blocks() {
        let block = Block::list(NestedBlockObject::new().with_block(
            "inner",
            Block::single(NestedBlockObject::new().with_attribute("secret", write_only_string())),
        ));
        assert!(block_contains_any_write_only_children(&block));
        assert!(!block_contains_any_write_only_children(&Block::list(
            NestedBlockObject::new().with_attribute("plain", Attribute::new(Type::String)),
        )));
    }
}
