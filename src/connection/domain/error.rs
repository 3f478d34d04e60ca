//! Error types for connection domain validation.

use thiserror::Error;

/// Errors returned while constructing or validating connection domain values.
///
/// Field-level variants carry offending field *names* only; secret values
/// never appear in error output.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectionDomainError {
    /// The connection name is empty after trimming.
    #[error("connection name must not be empty")]
    EmptyConnectionName,

    /// The connection name contains characters outside `[A-Za-z0-9._-]`.
    #[error(
        "connection name '{0}' contains invalid characters (only alphanumeric, '.', '_' and '-' allowed)"
    )]
    InvalidConnectionName(String),

    /// The connection name exceeds the 256-character storage limit.
    #[error("connection name exceeds 256 character limit: {0}")]
    ConnectionNameTooLong(String),

    /// The requested connection type is not present in the registry.
    #[error("unknown connection type: {0}")]
    UnknownType(String),

    /// The payload does not declare a connection type.
    #[error("connection payload does not declare a connection type")]
    MissingType,

    /// The payload's `type` field disagrees with the governing type.
    #[error(
        "connection field 'type' value '{provided}' does not match connection type '{expected}'"
    )]
    MismatchedDiscriminator {
        /// The type governing the record.
        expected: String,
        /// The discriminator value supplied by the caller.
        provided: String,
    },

    /// One or more fields are not declared by the connection type schema.
    #[error("fields not declared by connection type '{type_name}': {}", .fields.join(", "))]
    UndeclaredFields {
        /// The schema the payload was validated against.
        type_name: String,
        /// Offending field names, sorted.
        fields: Vec<String>,
    },

    /// One or more fields were supplied in the wrong secrecy bucket.
    #[error(
        "fields of connection type '{type_name}' supplied in the wrong bucket: {}", .fields.join(", ")
    )]
    MisplacedFields {
        /// The schema the payload was validated against.
        type_name: String,
        /// Offending field names, sorted.
        fields: Vec<String>,
    },

    /// One or more non-optional fields with no default are absent.
    #[error("required fields of connection type '{type_name}' are missing: {}", .fields.join(", "))]
    MissingRequiredFields {
        /// The schema the payload was validated against.
        type_name: String,
        /// Missing field names, in schema declaration order.
        fields: Vec<String>,
    },
}
