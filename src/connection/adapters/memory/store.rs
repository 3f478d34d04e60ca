//! In-memory connection store for tests and local tooling.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::connection::{
    domain::{ConnectionName, ConnectionRecord},
    ports::{ConnectionStore, ConnectionStoreError, ConnectionStoreResult},
};

/// Thread-safe in-memory connection store keyed by name.
///
/// Records are held in a `BTreeMap`, so listings come back in name order.
/// Writes serialize on the interior lock, which gives `replace` its per-key
/// atomicity.
pub struct InMemoryConnectionStore<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<BTreeMap<ConnectionName, ConnectionRecord>>>,
    clock: Arc<C>,
}

impl InMemoryConnectionStore<DefaultClock> {
    /// Creates an empty in-memory store on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryConnectionStore<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryConnectionStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty in-memory store on the given clock.
    ///
    /// The clock only drives expiry-based hiding in listings.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(BTreeMap::new())),
            clock,
        }
    }

    fn lock_error(err: impl fmt::Display) -> ConnectionStoreError {
        ConnectionStoreError::unavailable(std::io::Error::other(err.to_string()))
    }
}

impl<C> Clone for InMemoryConnectionStore<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> fmt::Debug for InMemoryConnectionStore<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryConnectionStore")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<C> ConnectionStore for InMemoryConnectionStore<C>
where
    C: Clock + Send + Sync,
{
    async fn insert(&self, record: &ConnectionRecord) -> ConnectionStoreResult<()> {
        let mut state = self.state.write().map_err(Self::lock_error)?;

        if state.contains_key(record.name()) {
            return Err(ConnectionStoreError::AlreadyExists(record.name().clone()));
        }

        state.insert(record.name().clone(), record.clone());
        Ok(())
    }

    async fn replace(&self, record: &ConnectionRecord) -> ConnectionStoreResult<()> {
        let mut state = self.state.write().map_err(Self::lock_error)?;

        let slot = state
            .get_mut(record.name())
            .ok_or_else(|| ConnectionStoreError::NotFound(record.name().clone()))?;
        *slot = record.clone();
        Ok(())
    }

    async fn get(&self, name: &ConnectionName) -> ConnectionStoreResult<Option<ConnectionRecord>> {
        let state = self.state.read().map_err(Self::lock_error)?;
        Ok(state.get(name).cloned())
    }

    async fn list(
        &self,
        max_results: Option<usize>,
        include_hidden: bool,
    ) -> ConnectionStoreResult<Vec<ConnectionRecord>> {
        let state = self.state.read().map_err(Self::lock_error)?;
        let now = self.clock.utc();
        let records = state
            .values()
            .filter(|record| include_hidden || !record.is_expired(now))
            .take(max_results.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(records)
    }

    async fn delete(&self, name: &ConnectionName) -> ConnectionStoreResult<()> {
        let mut state = self.state.write().map_err(Self::lock_error)?;
        state
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ConnectionStoreError::NotFound(name.clone()))
    }
}
