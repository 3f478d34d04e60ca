//! Request mapping for the connection API surface.

use crate::connection::{
    domain::{ConnectionDomainError, SecretMap},
    registry::{DISCRIMINATOR_FIELD, TypeRegistry},
    services::CreateConnectionRequest,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Listing bound applied when the caller does not supply one.
pub const DEFAULT_LIST_MAX_RESULTS: usize = 50;

/// Query options of the list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ListQuery {
    /// Maximum number of records to return.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Requests an unbounded listing that includes hidden records.
    #[serde(default)]
    pub all_results: bool,
}

const fn default_max_results() -> usize {
    DEFAULT_LIST_MAX_RESULTS
}

impl ListQuery {
    /// Resolves the query into service listing arguments.
    ///
    /// `all_results` lifts the bound entirely (any cap is then the store's
    /// concern) and admits hidden records.
    #[must_use]
    pub const fn bounds(&self) -> (Option<usize>, bool) {
        if self.all_results {
            (None, true)
        } else {
            (Some(self.max_results), false)
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_LIST_MAX_RESULTS,
            all_results: false,
        }
    }
}

/// Flat field map of a create or update body.
///
/// The payload may carry secret values before they are bucketed, so its
/// `Debug` implementation prints field names only.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ConnectionPayload(BTreeMap<String, String>);

impl ConnectionPayload {
    /// Creates an empty payload.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts or overwrites a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Returns the underlying flat field map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for ConnectionPayload {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self(values)
    }
}

impl FromIterator<(String, String)> for ConnectionPayload {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Debug for ConnectionPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}

/// Maps a create body onto a service request.
///
/// The mandatory `type` entry selects the governing schema; the remaining
/// fields are bucketed by declared secrecy. Keys the schema does not
/// declare stay in the plain bucket for the service to reject by name.
///
/// # Errors
///
/// Returns [`ConnectionDomainError::MissingType`] when the body carries no
/// `type` entry, or [`ConnectionDomainError::UnknownType`] when the type is
/// not registered.
pub fn create_request(
    name: impl Into<String>,
    body: ConnectionPayload,
    registry: &TypeRegistry,
) -> Result<CreateConnectionRequest, ConnectionDomainError> {
    let mut values = body.into_inner();
    let type_name = values
        .remove(DISCRIMINATOR_FIELD)
        .ok_or(ConnectionDomainError::MissingType)?;
    let schema = registry.get_schema(&type_name)?;
    let (plain_values, secret_values) = schema.partition_values(values);

    Ok(CreateConnectionRequest::new(name, type_name)
        .with_plain_values(plain_values)
        .with_secret_values(SecretMap::from(secret_values)))
}
