//! Service layer for connection record management.
//!
//! Provides [`ConnectionService`] which coordinates schema validation,
//! secret redaction, merge-on-update, and store calls.

use crate::connection::{
    domain::{ConnectionDomainError, ConnectionName, ConnectionRecord, SecretMap},
    ports::{ConnectionStore, ConnectionStoreError},
    registry::{DISCRIMINATOR_FIELD, TypeRegistry},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a new connection record.
///
/// Secret fields travel in a [`SecretMap`], so a request never leaks its
/// secret values through debug output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateConnectionRequest {
    name: String,
    type_name: String,
    plain_values: BTreeMap<String, String>,
    secret_values: SecretMap,
    expiry_time: Option<DateTime<Utc>>,
}

impl CreateConnectionRequest {
    /// Creates a request for the given record name and connection type.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            plain_values: BTreeMap::new(),
            secret_values: SecretMap::new(),
            expiry_time: None,
        }
    }

    /// Adds a plain field value.
    #[must_use]
    pub fn with_plain_value(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.plain_values.insert(field.into(), value.into());
        self
    }

    /// Adds a secret field value.
    #[must_use]
    pub fn with_secret_value(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.secret_values.insert(field, value);
        self
    }

    /// Replaces the plain field bucket.
    #[must_use]
    pub fn with_plain_values(mut self, values: BTreeMap<String, String>) -> Self {
        self.plain_values = values;
        self
    }

    /// Replaces the secret field bucket.
    #[must_use]
    pub fn with_secret_values(mut self, values: SecretMap) -> Self {
        self.secret_values = values;
        self
    }

    /// Sets the advisory expiration timestamp.
    #[must_use]
    pub const fn with_expiry_time(mut self, expiry_time: DateTime<Utc>) -> Self {
        self.expiry_time = Some(expiry_time);
        self
    }

    /// Returns the requested record name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the requested connection type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the plain field bucket.
    #[must_use]
    pub const fn plain_values(&self) -> &BTreeMap<String, String> {
        &self.plain_values
    }

    /// Returns the secret field bucket.
    #[must_use]
    pub const fn secret_values(&self) -> &SecretMap {
        &self.secret_values
    }
}

/// Service-level errors for connection operations.
#[derive(Debug, Error)]
pub enum ConnectionServiceError {
    /// Schema or domain validation failed.
    #[error(transparent)]
    Domain(#[from] ConnectionDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] ConnectionStoreError),
}

/// Result type for connection service operations.
pub type ConnectionServiceResult<T> = Result<T, ConnectionServiceError>;

/// Connection record orchestration service.
///
/// The service holds no record state of its own; every operation validates
/// against the read-only type registry and completes within one store
/// round-trip (plus the initial read on the update path).
#[derive(Clone)]
pub struct ConnectionService<S, C>
where
    S: ConnectionStore,
    C: Clock + Send + Sync,
{
    registry: Arc<TypeRegistry>,
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> ConnectionService<S, C>
where
    S: ConnectionStore,
    C: Clock + Send + Sync,
{
    /// Creates a new connection service.
    #[must_use]
    pub const fn new(registry: Arc<TypeRegistry>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            registry,
            store,
            clock,
        }
    }

    /// Returns the type registry backing validation and the spec catalog.
    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Lists connection records with their secret buckets emptied.
    ///
    /// `max_results` bounds the listing (`None` = unbounded, capped at the
    /// store's discretion); `include_hidden` admits expired records.
    /// Redaction happens here rather than being trusted to callers.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionServiceError::Store`] when the store lookup
    /// fails.
    pub async fn list(
        &self,
        max_results: Option<usize>,
        include_hidden: bool,
    ) -> ConnectionServiceResult<Vec<ConnectionRecord>> {
        let records = self.store.list(max_results, include_hidden).await?;
        Ok(records.iter().map(ConnectionRecord::redacted).collect())
    }

    /// Fetches a connection record by name.
    ///
    /// This is the only path through which secret values leave the
    /// service, and only when `reveal_secrets` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionStoreError::NotFound`] (via
    /// [`ConnectionServiceError::Store`]) when no record with the name
    /// exists, or [`ConnectionServiceError::Domain`] when the name fails
    /// validation.
    pub async fn get(
        &self,
        name: &str,
        reveal_secrets: bool,
    ) -> ConnectionServiceResult<ConnectionRecord> {
        let connection_name = ConnectionName::new(name)?;
        let record = self
            .store
            .get(&connection_name)
            .await?
            .ok_or_else(|| ConnectionStoreError::NotFound(connection_name))?;

        if reveal_secrets {
            tracing::info!(name = %record.name(), "revealing connection secrets");
            Ok(record)
        } else {
            Ok(record.redacted())
        }
    }

    /// Creates a new connection record and returns its redacted form.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionServiceError::Domain`] when the type is unknown,
    /// a field is undeclared or misplaced, a required field is missing, or
    /// the payload's discriminator disagrees with the requested type; and
    /// [`ConnectionStoreError::AlreadyExists`] (via
    /// [`ConnectionServiceError::Store`]) when the name is taken.
    pub async fn create(
        &self,
        request: CreateConnectionRequest,
    ) -> ConnectionServiceResult<ConnectionRecord> {
        let CreateConnectionRequest {
            name,
            type_name,
            plain_values,
            secret_values,
            expiry_time,
        } = request;

        let connection_name = ConnectionName::new(name)?;
        let schema = self.registry.get_schema(&type_name)?;
        let plain_fields = strip_discriminator(plain_values, &type_name)?;
        schema.validate_buckets(&plain_fields, &secret_values)?;

        let record = ConnectionRecord::new(
            connection_name,
            type_name,
            plain_fields,
            secret_values,
            expiry_time,
            &*self.clock,
        );
        self.store.insert(&record).await?;

        tracing::info!(
            name = %record.name(),
            connection_type = record.type_name(),
            "connection created"
        );
        Ok(record.redacted())
    }

    /// Applies a partial update to an existing record and returns its
    /// redacted form.
    ///
    /// Overrides are bucketed per the record's type schema and overlaid
    /// onto the stored record; fields the caller omits are retained
    /// verbatim. In particular a secret field absent from `field_overrides`
    /// keeps its previously stored value, so re-submitting a redacted read
    /// never discards secrets. The merged result is re-validated as if it
    /// were a fresh create before it is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionStoreError::NotFound`] (via
    /// [`ConnectionServiceError::Store`]) when no record with the name
    /// exists, or [`ConnectionServiceError::Domain`] when the merged result
    /// fails schema validation or an override renames the record's type.
    pub async fn update(
        &self,
        name: &str,
        field_overrides: BTreeMap<String, String>,
    ) -> ConnectionServiceResult<ConnectionRecord> {
        let connection_name = ConnectionName::new(name)?;
        let mut record = self
            .store
            .get(&connection_name)
            .await?
            .ok_or_else(|| ConnectionStoreError::NotFound(connection_name.clone()))?;

        let schema = self.registry.get_schema(record.type_name())?;
        let (raw_plain_overrides, secret_overrides) = schema.partition_values(field_overrides);
        let plain_overrides = strip_discriminator(raw_plain_overrides, record.type_name())?;
        tracing::debug!(
            name = %record.name(),
            fields = ?plain_overrides.keys().chain(secret_overrides.keys()).collect::<Vec<_>>(),
            "merging connection overrides"
        );

        record.apply_overrides(plain_overrides, secret_overrides, &*self.clock);
        schema.validate_buckets(record.plain_values(), record.secret_values())?;

        self.store.replace(&record).await?;

        tracing::info!(name = %record.name(), "connection updated");
        Ok(record.redacted())
    }

    /// Removes a connection record.
    ///
    /// Delete is strict: removing an absent name fails. Callers wanting
    /// idempotent semantics treat the not-found error as success.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionStoreError::NotFound`] (via
    /// [`ConnectionServiceError::Store`]) when no record with the name
    /// exists, or [`ConnectionServiceError::Domain`] when the name fails
    /// validation.
    pub async fn delete(&self, name: &str) -> ConnectionServiceResult<()> {
        let connection_name = ConnectionName::new(name)?;
        self.store.delete(&connection_name).await?;

        tracing::info!(name = %connection_name, "connection deleted");
        Ok(())
    }
}

/// Checks and removes a `type` entry from the plain bucket.
///
/// The record's `type_name` is the single source of truth for the
/// discriminator; a payload entry is accepted only when it agrees.
fn strip_discriminator(
    mut plain_values: BTreeMap<String, String>,
    type_name: &str,
) -> Result<BTreeMap<String, String>, ConnectionDomainError> {
    if let Some(provided) = plain_values.remove(DISCRIMINATOR_FIELD) {
        if provided != type_name {
            return Err(ConnectionDomainError::MismatchedDiscriminator {
                expected: type_name.to_owned(),
                provided,
            });
        }
    }
    Ok(plain_values)
}
