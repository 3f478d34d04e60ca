//! Field specifications and per-type connection schemas.

use crate::connection::domain::{ConnectionDomainError, SecretMap};
use std::collections::BTreeMap;

/// Name of the discriminator field present on every connection type.
pub const DISCRIMINATOR_FIELD: &str = "type";

/// Name of the internal provider-namespace field hidden from the catalog.
pub const MODULE_FIELD: &str = "module";

/// Declares one configuration field of a connection type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    name: &'static str,
    secret: bool,
    optional: bool,
    default: Option<&'static str>,
}

impl FieldSpec {
    /// Declares a required plain field with no default.
    #[must_use]
    pub const fn plain(name: &'static str) -> Self {
        Self {
            name,
            secret: false,
            optional: false,
            default: None,
        }
    }

    /// Declares a required secret field with no default.
    #[must_use]
    pub const fn secret(name: &'static str) -> Self {
        Self {
            name,
            secret: true,
            optional: false,
            default: None,
        }
    }

    /// Marks the field optional.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Sets the field's default value.
    #[must_use]
    pub const fn with_default(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    /// Returns the field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns whether the field is secret.
    #[must_use]
    pub const fn is_secret(&self) -> bool {
        self.secret
    }

    /// Returns whether the field is optional.
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    /// Returns the declared default value, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&'static str> {
        self.default
    }
}

/// Ordered field specification of one connection type.
///
/// Field order is declaration order; it matters for catalog display, not
/// for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTypeSchema {
    type_name: &'static str,
    fields: Vec<FieldSpec>,
}

impl ConnectionTypeSchema {
    /// Creates a schema from a discriminator value and its ordered fields.
    #[must_use]
    pub const fn new(type_name: &'static str, fields: Vec<FieldSpec>) -> Self {
        Self { type_name, fields }
    }

    /// Returns the type's discriminator value.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the ordered field specifications.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a field specification by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name() == name)
    }

    /// Buckets a flat field map by declared secrecy.
    ///
    /// Keys declared secret land in the secret bucket; everything else,
    /// including keys the schema does not declare, lands in the plain
    /// bucket so that [`Self::validate_buckets`] can reject undeclared
    /// fields by name.
    #[must_use]
    pub fn partition_values(
        &self,
        values: BTreeMap<String, String>,
    ) -> (BTreeMap<String, String>, BTreeMap<String, String>) {
        let mut plain = BTreeMap::new();
        let mut secret = BTreeMap::new();
        for (field, value) in values {
            if self.field(&field).is_some_and(FieldSpec::is_secret) {
                secret.insert(field, value);
            } else {
                plain.insert(field, value);
            }
        }
        (plain, secret)
    }

    /// Validates bucketed field values against this schema.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionDomainError::UndeclaredFields`] when a key is not
    /// declared by the schema, [`ConnectionDomainError::MisplacedFields`]
    /// when a key sits in the wrong secrecy bucket, or
    /// [`ConnectionDomainError::MissingRequiredFields`] when a non-optional
    /// field with no default is absent from both buckets.
    pub fn validate_buckets(
        &self,
        plain: &BTreeMap<String, String>,
        secret: &SecretMap,
    ) -> Result<(), ConnectionDomainError> {
        let mut undeclared = Vec::new();
        let mut misplaced = Vec::new();

        for field in plain.keys() {
            match self.field(field) {
                None => undeclared.push(field.clone()),
                Some(spec) if spec.is_secret() => misplaced.push(field.clone()),
                Some(_) => {}
            }
        }
        for field in secret.names() {
            match self.field(field) {
                None => undeclared.push(field.to_owned()),
                Some(spec) if !spec.is_secret() => misplaced.push(field.to_owned()),
                Some(_) => {}
            }
        }

        if !undeclared.is_empty() {
            undeclared.sort_unstable();
            return Err(ConnectionDomainError::UndeclaredFields {
                type_name: self.type_name.to_owned(),
                fields: undeclared,
            });
        }
        if !misplaced.is_empty() {
            misplaced.sort_unstable();
            return Err(ConnectionDomainError::MisplacedFields {
                type_name: self.type_name.to_owned(),
                fields: misplaced,
            });
        }

        let missing: Vec<String> = self
            .fields
            .iter()
            .filter(|spec| {
                !spec.is_optional()
                    && spec.default_value().is_none()
                    && !plain.contains_key(spec.name())
                    && !secret.contains(spec.name())
            })
            .map(|spec| spec.name().to_owned())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConnectionDomainError::MissingRequiredFields {
                type_name: self.type_name.to_owned(),
                fields: missing,
            })
        }
    }
}
