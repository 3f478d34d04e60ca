//! Static connection type registry.

use super::schema::{ConnectionTypeSchema, DISCRIMINATOR_FIELD, FieldSpec, MODULE_FIELD};
use crate::connection::domain::ConnectionDomainError;
use std::collections::BTreeMap;

/// Default provider namespace recorded on every connection.
const DEFAULT_MODULE: &str = "junction.connections";

/// Fixed set of connection type schemas, addressable by name.
///
/// The registry is built once at process start and is read-only afterwards;
/// iteration follows declaration order.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    schemas: Vec<ConnectionTypeSchema>,
    index: BTreeMap<&'static str, usize>,
}

impl TypeRegistry {
    /// Builds a registry from an ordered list of type schemas.
    #[must_use]
    pub fn new(schemas: Vec<ConnectionTypeSchema>) -> Self {
        let index = schemas
            .iter()
            .enumerate()
            .map(|(position, schema)| (schema.type_name(), position))
            .collect();
        Self { schemas, index }
    }

    /// Builds the registry of built-in connection types.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            schema("azure_open_ai", vec![
                FieldSpec::secret("api_key"),
                FieldSpec::plain("api_base"),
                FieldSpec::plain("api_type").with_default("azure"),
                FieldSpec::plain("api_version").with_default("2023-07-01-preview"),
            ]),
            schema("open_ai", vec![
                FieldSpec::secret("api_key"),
                FieldSpec::plain("organization").optional(),
            ]),
            schema("serp", vec![FieldSpec::secret("api_key")]),
            schema("qdrant", vec![
                FieldSpec::secret("api_key"),
                FieldSpec::plain("api_base"),
            ]),
            schema("cognitive_search", vec![
                FieldSpec::secret("api_key"),
                FieldSpec::plain("api_base"),
                FieldSpec::plain("api_version").with_default("2023-07-01-Preview"),
            ]),
            schema("azure_content_safety", vec![
                FieldSpec::secret("api_key"),
                FieldSpec::plain("endpoint"),
                FieldSpec::plain("api_version").with_default("2023-04-30-preview"),
            ]),
            schema("form_recognizer", vec![
                FieldSpec::secret("api_key"),
                FieldSpec::plain("endpoint"),
                FieldSpec::plain("api_version").with_default("2023-07-31"),
            ]),
        ])
    }

    /// Iterates registered type schemas in declaration order.
    pub fn types(&self) -> impl Iterator<Item = &ConnectionTypeSchema> {
        self.schemas.iter()
    }

    /// Returns the number of registered types.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns whether the registry holds no types.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Returns whether a type name is registered.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.index.contains_key(type_name)
    }

    /// Looks up the schema for a type name.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionDomainError::UnknownType`] when the name is not
    /// registered.
    pub fn get_schema(&self, type_name: &str) -> Result<&ConnectionTypeSchema, ConnectionDomainError> {
        self.index
            .get(type_name)
            .and_then(|&position| self.schemas.get(position))
            .ok_or_else(|| ConnectionDomainError::UnknownType(type_name.to_owned()))
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Prepends the discriminator and module fields every type shares.
fn schema(type_name: &'static str, fields: Vec<FieldSpec>) -> ConnectionTypeSchema {
    let mut all_fields = vec![
        FieldSpec::plain(DISCRIMINATOR_FIELD).with_default(type_name),
        FieldSpec::plain(MODULE_FIELD)
            .optional()
            .with_default(DEFAULT_MODULE),
    ];
    all_fields.extend(fields);
    ConnectionTypeSchema::new(type_name, all_fields)
}
