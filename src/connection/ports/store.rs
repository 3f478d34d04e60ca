//! Store port for connection record persistence.

use crate::connection::domain::{ConnectionName, ConnectionRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for connection store operations.
pub type ConnectionStoreResult<T> = Result<T, ConnectionStoreError>;

/// Connection record persistence contract.
///
/// Implementations own durability, pagination mechanics, and per-key write
/// serialization: [`ConnectionStore::replace`] must be atomic for a given
/// name so concurrent read-modify-write callers cannot silently lose a
/// writer's changes.
#[async_trait]
pub trait ConnectionStore: Send + Sync {
    /// Stores a new connection record.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionStoreError::AlreadyExists`] when a record with
    /// the same name is present.
    async fn insert(&self, record: &ConnectionRecord) -> ConnectionStoreResult<()>;

    /// Replaces an existing connection record in a single atomic write.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionStoreError::NotFound`] when no record with the
    /// name exists.
    async fn replace(&self, record: &ConnectionRecord) -> ConnectionStoreResult<()>;

    /// Fetches a record by name, including its secret bucket.
    ///
    /// Returns `None` when the record does not exist.
    async fn get(&self, name: &ConnectionName) -> ConnectionStoreResult<Option<ConnectionRecord>>;

    /// Lists records in name order.
    ///
    /// At most `max_results` records are returned when a bound is given;
    /// `None` requests an unbounded listing, capped at the store's
    /// discretion. Expired records are omitted unless `include_hidden` is
    /// set.
    async fn list(
        &self,
        max_results: Option<usize>,
        include_hidden: bool,
    ) -> ConnectionStoreResult<Vec<ConnectionRecord>>;

    /// Removes a record by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionStoreError::NotFound`] when no record with the
    /// name exists.
    async fn delete(&self, name: &ConnectionName) -> ConnectionStoreResult<()>;
}

/// Errors returned by connection store implementations.
#[derive(Debug, Clone, Error)]
pub enum ConnectionStoreError {
    /// A record with the same name already exists.
    #[error("connection already exists: {0}")]
    AlreadyExists(ConnectionName),

    /// The record was not found.
    #[error("connection not found: {0}")]
    NotFound(ConnectionName),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted connection data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// The store could not be reached or failed transiently.
    #[error("connection store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl ConnectionStoreError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a store-availability error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
