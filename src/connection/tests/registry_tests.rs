//! Unit tests for the connection type registry and spec catalog.

use crate::connection::domain::{ConnectionDomainError, SecretMap};
use crate::connection::registry::{
    DISCRIMINATOR_FIELD, FieldSpec, MODULE_FIELD, TypeRegistry, build_catalog,
};
use rstest::rstest;
use std::collections::BTreeMap;

fn flat(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(field, value)| ((*field).to_owned(), (*value).to_owned()))
        .collect()
}

// ── Registry lookup ────────────────────────────────────────────────

#[rstest]
#[case("azure_open_ai")]
#[case("open_ai")]
#[case("serp")]
#[case("qdrant")]
#[case("cognitive_search")]
#[case("azure_content_safety")]
#[case("form_recognizer")]
fn builtin_registry_contains_expected_types(#[case] type_name: &str) {
    let registry = TypeRegistry::builtin();
    assert!(registry.contains(type_name));
    let schema = registry.get_schema(type_name).expect("schema should exist");
    assert_eq!(schema.type_name(), type_name);
}

#[rstest]
fn unknown_type_lookup_is_rejected() {
    let registry = TypeRegistry::builtin();
    let result = registry.get_schema("carrier_pigeon");
    assert!(matches!(
        result,
        Err(ConnectionDomainError::UnknownType(type_name)) if type_name == "carrier_pigeon"
    ));
}

#[rstest]
fn registry_iterates_in_declaration_order() {
    let registry = TypeRegistry::builtin();
    let names: Vec<&str> = registry.types().map(|schema| schema.type_name()).collect();
    assert_eq!(
        names,
        vec![
            "azure_open_ai",
            "open_ai",
            "serp",
            "qdrant",
            "cognitive_search",
            "azure_content_safety",
            "form_recognizer",
        ]
    );
}

#[rstest]
fn every_schema_declares_a_non_secret_discriminator_with_default() {
    let registry = TypeRegistry::builtin();
    for schema in registry.types() {
        let field = schema
            .field(DISCRIMINATOR_FIELD)
            .expect("discriminator should be declared");
        assert!(!field.is_secret());
        assert_eq!(field.default_value(), Some(schema.type_name()));
    }
}

// ── Bucket partitioning ────────────────────────────────────────────

#[rstest]
fn partition_routes_declared_secret_fields_to_the_secret_bucket() {
    let registry = TypeRegistry::builtin();
    let schema = registry.get_schema("qdrant").expect("schema should exist");

    let (plain, secret) = schema.partition_values(flat(&[
        ("api_base", "https://qdrant.example"),
        ("api_key", "abc"),
    ]));

    assert_eq!(plain.get("api_base").map(String::as_str), Some("https://qdrant.example"));
    assert!(!plain.contains_key("api_key"));
    assert_eq!(secret.get("api_key").map(String::as_str), Some("abc"));
}

#[rstest]
fn partition_leaves_undeclared_fields_in_the_plain_bucket() {
    let registry = TypeRegistry::builtin();
    let schema = registry.get_schema("serp").expect("schema should exist");

    let (plain, secret) = schema.partition_values(flat(&[("mystery", "x")]));

    assert!(plain.contains_key("mystery"));
    assert!(secret.is_empty());
}

// ── Bucket validation ──────────────────────────────────────────────

#[rstest]
fn undeclared_fields_are_listed_by_name() {
    let registry = TypeRegistry::builtin();
    let schema = registry.get_schema("serp").expect("schema should exist");
    let mut secrets = SecretMap::new();
    secrets.insert("api_key", "abc");

    let result = schema.validate_buckets(&flat(&[("zeta", "1"), ("alpha", "2")]), &secrets);

    assert!(matches!(
        result,
        Err(ConnectionDomainError::UndeclaredFields { ref fields, .. })
            if *fields == vec!["alpha".to_owned(), "zeta".to_owned()]
    ));
}

#[rstest]
fn misplaced_secret_field_is_rejected() {
    let registry = TypeRegistry::builtin();
    let schema = registry.get_schema("serp").expect("schema should exist");

    let result = schema.validate_buckets(&flat(&[("api_key", "abc")]), &SecretMap::new());

    assert!(matches!(
        result,
        Err(ConnectionDomainError::MisplacedFields { ref fields, .. })
            if *fields == vec!["api_key".to_owned()]
    ));
}

#[rstest]
fn misplaced_plain_field_is_rejected() {
    let registry = TypeRegistry::builtin();
    let schema = registry.get_schema("qdrant").expect("schema should exist");
    let mut secrets = SecretMap::new();
    secrets.insert("api_key", "abc");
    secrets.insert("api_base", "https://qdrant.example");

    let result = schema.validate_buckets(&BTreeMap::new(), &secrets);

    assert!(matches!(
        result,
        Err(ConnectionDomainError::MisplacedFields { ref fields, .. })
            if *fields == vec!["api_base".to_owned()]
    ));
}

#[rstest]
fn missing_required_fields_are_reported_in_declaration_order() {
    let registry = TypeRegistry::builtin();
    let schema = registry
        .get_schema("cognitive_search")
        .expect("schema should exist");

    let result = schema.validate_buckets(&BTreeMap::new(), &SecretMap::new());

    assert!(matches!(
        result,
        Err(ConnectionDomainError::MissingRequiredFields { ref fields, .. })
            if *fields == vec!["api_key".to_owned(), "api_base".to_owned()]
    ));
}

#[rstest]
fn defaults_and_optional_fields_are_never_required() {
    let registry = TypeRegistry::builtin();
    let schema = registry.get_schema("open_ai").expect("schema should exist");
    let mut secrets = SecretMap::new();
    secrets.insert("api_key", "abc");

    // `organization` is optional, `type`/`module`/`api_type` carry defaults.
    let result = schema.validate_buckets(&BTreeMap::new(), &secrets);

    assert!(result.is_ok());
}

// ── Spec catalog ───────────────────────────────────────────────────

#[rstest]
fn catalog_has_one_entry_per_registered_type() {
    let registry = TypeRegistry::builtin();
    let catalog = build_catalog(&registry);

    assert_eq!(catalog.len(), registry.len());
    for (entry, schema) in catalog.iter().zip(registry.types()) {
        assert_eq!(entry.connection_type, schema.type_name());
    }
}

#[rstest]
fn catalog_hides_the_module_field() {
    let catalog = build_catalog(&TypeRegistry::builtin());
    for entry in &catalog {
        assert!(
            entry
                .config_spec
                .iter()
                .all(|config| config.name != MODULE_FIELD),
            "module field should be hidden from '{}'",
            entry.connection_type
        );
    }
}

#[rstest]
fn catalog_reports_optionality_and_defaults_exactly_as_declared() {
    let registry = TypeRegistry::builtin();
    let catalog = build_catalog(&registry);

    for (entry, schema) in catalog.iter().zip(registry.types()) {
        for config in &entry.config_spec {
            let field = schema
                .field(&config.name)
                .expect("catalog field should exist on schema");
            assert_eq!(config.optional, field.is_optional());
            if config.name == DISCRIMINATOR_FIELD {
                assert_eq!(config.default.as_deref(), Some(schema.type_name()));
            } else {
                assert_eq!(config.default.as_deref(), field.default_value());
            }
        }
    }
}

#[rstest]
fn catalog_lists_every_visible_field() {
    let registry = TypeRegistry::builtin();
    let catalog = build_catalog(&registry);

    for (entry, schema) in catalog.iter().zip(registry.types()) {
        let visible = schema
            .fields()
            .iter()
            .filter(|field| field.name() != MODULE_FIELD)
            .count();
        assert_eq!(entry.config_spec.len(), visible);
    }
}

// ── FieldSpec builders ─────────────────────────────────────────────

#[rstest]
fn field_spec_builders_set_flags() {
    let field = FieldSpec::plain("api_version")
        .optional()
        .with_default("2023-07-01");

    assert_eq!(field.name(), "api_version");
    assert!(!field.is_secret());
    assert!(field.is_optional());
    assert_eq!(field.default_value(), Some("2023-07-01"));

    let secret_field = FieldSpec::secret("api_key");
    assert!(secret_field.is_secret());
    assert!(!secret_field.is_optional());
    assert!(secret_field.default_value().is_none());
}
