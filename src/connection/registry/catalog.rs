//! Spec catalog builder for the registered connection types.

use super::schema::{DISCRIMINATOR_FIELD, MODULE_FIELD};
use super::table::TypeRegistry;
use serde::Serialize;

/// Internal-only fields omitted from the externally visible catalog.
const HIDDEN_CATALOG_FIELDS: &[&str] = &[MODULE_FIELD];

/// Externally visible description of one configuration field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionConfigSpec {
    /// Field name.
    pub name: String,
    /// Whether the field may be omitted.
    pub optional: bool,
    /// Declared default value; absent entries are omitted from the wire.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// Externally visible description of one connection type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionSpec {
    /// The type's discriminator value.
    pub connection_type: String,
    /// Field specifications in declaration order, internal fields omitted.
    pub config_spec: Vec<ConnectionConfigSpec>,
}

/// Builds the catalog of registered connection types.
///
/// One entry per type, in registry declaration order. The discriminator
/// field's default is the type's own discriminator value.
#[must_use]
pub fn build_catalog(registry: &TypeRegistry) -> Vec<ConnectionSpec> {
    registry
        .types()
        .map(|schema| ConnectionSpec {
            connection_type: schema.type_name().to_owned(),
            config_spec: schema
                .fields()
                .iter()
                .filter(|field| !HIDDEN_CATALOG_FIELDS.contains(&field.name()))
                .map(|field| ConnectionConfigSpec {
                    name: field.name().to_owned(),
                    optional: field.is_optional(),
                    default: if field.name() == DISCRIMINATOR_FIELD {
                        Some(schema.type_name().to_owned())
                    } else {
                        field.default_value().map(str::to_owned)
                    },
                })
                .collect(),
        })
        .collect()
}
