//! Error mapping for the connection API surface.

use crate::connection::{
    domain::ConnectionDomainError, ports::ConnectionStoreError, services::ConnectionServiceError,
};
use serde_json::{Value, json};

/// Transport-agnostic API error: an HTTP status, a stable code, and a
/// human-readable message.
///
/// Messages carry field names only; secret values never appear in them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: u16,
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Returns the HTTP status the error maps to.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the wire body, shaped `{"error_message": ...}`.
    #[must_use]
    pub fn body(&self) -> Value {
        json!({ "error_message": self.message })
    }

    const fn classify(error: &ConnectionServiceError) -> (u16, &'static str) {
        match error {
            ConnectionServiceError::Domain(domain) => match domain {
                ConnectionDomainError::UnknownType(_) => (400, "unknown_connection_type"),
                ConnectionDomainError::EmptyConnectionName
                | ConnectionDomainError::InvalidConnectionName(_)
                | ConnectionDomainError::ConnectionNameTooLong(_) => {
                    (400, "invalid_connection_name")
                }
                ConnectionDomainError::MissingType
                | ConnectionDomainError::MismatchedDiscriminator { .. }
                | ConnectionDomainError::UndeclaredFields { .. }
                | ConnectionDomainError::MisplacedFields { .. } => (400, "schema_validation"),
                ConnectionDomainError::MissingRequiredFields { .. } => {
                    (400, "missing_required_fields")
                }
            },
            ConnectionServiceError::Store(store) => match store {
                ConnectionStoreError::NotFound(_) => (404, "connection_not_found"),
                ConnectionStoreError::AlreadyExists(_) => (409, "connection_already_exists"),
                ConnectionStoreError::InvalidPersistedData(_) => (500, "invalid_persisted_data"),
                ConnectionStoreError::Unavailable(_) => (503, "store_unavailable"),
            },
        }
    }
}

impl From<ConnectionServiceError> for ApiError {
    fn from(error: ConnectionServiceError) -> Self {
        let (status, code) = Self::classify(&error);
        Self {
            status,
            code,
            message: error.to_string(),
        }
    }
}

impl From<ConnectionDomainError> for ApiError {
    fn from(error: ConnectionDomainError) -> Self {
        Self::from(ConnectionServiceError::Domain(error))
    }
}
