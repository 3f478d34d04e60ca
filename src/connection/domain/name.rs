//! Validated connection name type.

use super::ConnectionDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a connection name, matching the `VARCHAR(256)` column.
const MAX_NAME_LENGTH: usize = 256;

/// Validated connection record identifier.
///
/// Connection names are the primary key of a record and are immutable after
/// creation (e.g. `azure_open_ai_connection`, `team-search.prod`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionName(String);

impl ConnectionName {
    /// Creates a validated connection name.
    ///
    /// The input is trimmed. Only characters in `[A-Za-z0-9._-]` are
    /// accepted; case is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionDomainError::EmptyConnectionName`] when the value
    /// is empty after trimming,
    /// [`ConnectionDomainError::InvalidConnectionName`] when it contains
    /// characters outside `[A-Za-z0-9._-]`, or
    /// [`ConnectionDomainError::ConnectionNameTooLong`] when it exceeds 256
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ConnectionDomainError> {
        let raw = value.into();
        let trimmed = raw.trim().to_owned();

        if trimmed.is_empty() {
            return Err(ConnectionDomainError::EmptyConnectionName);
        }

        if trimmed.len() > MAX_NAME_LENGTH {
            return Err(ConnectionDomainError::ConnectionNameTooLong(raw));
        }

        let is_valid = trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-');

        if !is_valid {
            return Err(ConnectionDomainError::InvalidConnectionName(raw));
        }

        Ok(Self(trimmed))
    }

    /// Returns the connection name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ConnectionName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ConnectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
