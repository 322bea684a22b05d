//! Schema model tests: type derivation and equality

use plugin_schema::models::{
    Attribute, Block, NestedBlockObject, NestedObject, Schema, SchemaKind, Type,
};
use plugin_schema::{SchemaFormat, parse_schema};

/// Three levels of nesting below the root, ending in `leaf`.
fn deep_schema(leaf: Attribute) -> Schema {
    Schema::new(SchemaKind::Resource)
        .with_version(1)
        .with_description("Deeply nested resource")
        .with_attribute("id", Attribute::new(Type::String).computed())
        .with_attribute(
            "config",
            Attribute::single_nested(NestedObject::new().with_attribute(
                "listeners",
                Attribute::list_nested(NestedObject::new().with_attribute(
                    "tls",
                    Attribute::single_nested(NestedObject::new().with_attribute("key", leaf)),
                ))
                .optional(),
            ))
            .optional(),
        )
        .with_block(
            "timeouts",
            Block::single(
                NestedBlockObject::new().with_attribute("create", Attribute::new(Type::String)),
            )
            .with_description("Operation timeouts"),
        )
}

mod type_derivation_tests {
    use super::*;

    #[test]
    fn test_schema_type_includes_attributes_and_blocks() {
        let schema = deep_schema(Attribute::new(Type::String).optional());
        let expected = Type::object([
            ("id", Type::String),
            (
                "config",
                Type::object([(
                    "listeners",
                    Type::list(Type::object([(
                        "tls",
                        Type::object([("key", Type::String)]),
                    )])),
                )]),
            ),
            ("timeouts", Type::object([("create", Type::String)])),
        ]);
        assert_eq!(schema.get_type(), expected);
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let schema = deep_schema(Attribute::new(Type::String).optional());
        assert_eq!(schema.get_type(), schema.get_type());
    }

    #[test]
    fn test_construction_order_does_not_matter() {
        let a = NestedBlockObject::new()
            .with_attribute("x", Attribute::new(Type::Bool))
            .with_attribute("y", Attribute::new(Type::Int64))
            .with_block("z", Block::list(NestedBlockObject::new()));
        let b = NestedBlockObject::new()
            .with_block("z", Block::list(NestedBlockObject::new()))
            .with_attribute("y", Attribute::new(Type::Int64))
            .with_attribute("x", Attribute::new(Type::Bool));
        assert_eq!(a.get_type(), b.get_type());
        assert!(a.equal(&b));
    }

    #[test]
    fn test_nested_object_type_ignores_flags() {
        let plain = NestedObject::new().with_attribute("k", Attribute::new(Type::String));
        let flagged = NestedObject::new()
            .with_attribute("k", Attribute::new(Type::String).sensitive().write_only());
        assert_eq!(plain.get_type(), flagged.get_type());
        assert!(!plain.equal(&flagged));
    }

    #[test]
    fn test_type_display() {
        let ty = Type::object([("ports", Type::list(Type::Int64)), ("id", Type::String)]);
        assert_eq!(ty.to_string(), "object({id: string, ports: list(int64)})");
    }
}

mod equality_tests {
    use super::*;

    fn flip_deep_sensitive(schema: &mut Schema) {
        let config = schema.attributes.get_mut("config").unwrap();
        let plugin_schema::AttributeKind::Nested { nested_object, .. } = &mut config.kind else {
            panic!("config is nested");
        };
        let listeners = nested_object.attributes.get_mut("listeners").unwrap();
        let plugin_schema::AttributeKind::Nested { nested_object, .. } = &mut listeners.kind else {
            panic!("listeners is nested");
        };
        let tls = nested_object.attributes.get_mut("tls").unwrap();
        tls.sensitive = !tls.sensitive;
    }

    #[test]
    fn test_reflexive() {
        let schema = deep_schema(Attribute::new(Type::String).optional());
        assert!(schema.equal(&schema));
        assert!(Schema::default().equal(&Schema::default()));
    }

    #[test]
    fn test_symmetric_and_transitive() {
        let a = deep_schema(Attribute::new(Type::String).optional());
        let b = a.clone();
        let c = deep_schema(Attribute::new(Type::String).optional());
        assert!(a.equal(&b) && b.equal(&a));
        assert!(a.equal(&b) && b.equal(&c) && a.equal(&c));
    }

    #[test]
    fn test_flag_three_levels_deep_breaks_equality() {
        let before = deep_schema(Attribute::new(Type::String).optional());
        let mut after = before.clone();
        flip_deep_sensitive(&mut after);
        assert!(!before.equal(&after));
        assert!(!after.equal(&before));
        assert_eq!(before.get_type(), after.get_type());
    }

    #[test]
    fn test_nesting_mode_matters() {
        let object = NestedObject::new().with_attribute("a", Attribute::new(Type::String));
        assert!(!Attribute::list_nested(object.clone()).equal(&Attribute::set_nested(object.clone())));
        assert!(!Block::list(NestedBlockObject::new()).equal(&Block::set(NestedBlockObject::new())));
    }

    #[test]
    fn test_block_metadata_matters() {
        let a = deep_schema(Attribute::new(Type::String).optional());
        let mut b = a.clone();
        b.blocks.get_mut("timeouts").unwrap().description = "Changed".to_string();
        assert!(!a.equal(&b));
    }

    #[test]
    fn test_schema_metadata_matters() {
        let a = deep_schema(Attribute::new(Type::String).optional());
        assert!(!a.equal(&a.clone().with_version(2)));
        assert!(!a.equal(&a.clone().with_deprecation_message("Use v2")));
    }

    #[test]
    fn test_parsed_schema_equals_built_schema() {
        let yaml = r#"
kind: provider
attributes:
  endpoint:
    kind: primitive
    type: string
    optional: true
  credentials:
    kind: nested
    nesting_mode: single
    optional: true
    sensitive: true
    nested_object:
      attributes:
        token:
          kind: primitive
          type: string
          required: true
          write_only: true
"#;
        let parsed = parse_schema(yaml, SchemaFormat::Yaml).unwrap();
        let built = Schema::new(SchemaKind::Provider)
            .with_attribute("endpoint", Attribute::new(Type::String).optional())
            .with_attribute(
                "credentials",
                Attribute::single_nested(NestedObject::new().with_attribute(
                    "token",
                    Attribute::new(Type::String).required().write_only(),
                ))
                .optional()
                .sensitive(),
            );
        assert!(parsed.equal(&built));
        assert!(!parsed.validate_implementation().has_error());
    }
}

mod document_tests {
    use super::*;

    fn composite_schema() -> Schema {
        Schema::new(SchemaKind::Resource)
            .with_attribute("tags", Attribute::new(Type::list(Type::String)).optional())
            .with_attribute(
                "labels",
                Attribute::new(Type::map(Type::set(Type::Int64))).optional(),
            )
            .with_block(
                "rule",
                Block::set(
                    NestedBlockObject::new()
                        .with_attribute(
                            "range",
                            Attribute::new(Type::Tuple(vec![Type::Int64, Type::Int64])).required(),
                        )
                        .with_attribute(
                            "match",
                            Attribute::new(Type::object([
                                ("path", Type::String),
                                ("headers", Type::map(Type::String)),
                            ]))
                            .optional(),
                        ),
                ),
            )
    }

    #[test]
    fn test_yaml_round_trip_with_composite_types() {
        let schema = composite_schema();
        let yaml = serde_yaml::to_string(&schema).unwrap();
        let parsed = parse_schema(&yaml, SchemaFormat::Yaml).unwrap();
        assert!(parsed.equal(&schema));
    }

    #[test]
    fn test_json_round_trip_with_composite_types() {
        let schema = composite_schema();
        let json = serde_json::to_string_pretty(&schema).unwrap();
        let parsed = parse_schema(&json, SchemaFormat::Json).unwrap();
        assert!(parsed.equal(&schema));
    }

    #[test]
    fn test_yaml_enum_tags_are_accepted() {
        let yaml = r#"
attributes:
  tags:
    kind: primitive
    type: !list string
    optional: true
  ports:
    kind: primitive
    type: !tuple [int64, int64]
    optional: true
"#;
        let parsed = parse_schema(yaml, SchemaFormat::Yaml).unwrap();
        assert_eq!(
            parsed.attributes["tags"],
            Attribute::new(Type::list(Type::String)).optional()
        );
        assert_eq!(
            parsed.attributes["ports"].get_type(),
            Type::Tuple(vec![Type::Int64, Type::Int64])
        );
    }
}

mod concurrency_tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_schema_is_send_and_sync() {
        assert_send_sync::<Schema>();
        assert_send_sync::<Attribute>();
        assert_send_sync::<Block>();
    }

    #[test]
    fn test_shared_schema_validates_across_threads() {
        let schema = Arc::new(deep_schema(Attribute::new(Type::String).optional()));
        let expected = schema.validate_implementation().len();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let schema = Arc::clone(&schema);
                thread::spawn(move || (schema.get_type(), schema.validate_implementation().len()))
            })
            .collect();
        for handle in handles {
            let (ty, count) = handle.join().unwrap();
            assert_eq!(ty, schema.get_type());
            assert_eq!(count, expected);
        }
    }
}
