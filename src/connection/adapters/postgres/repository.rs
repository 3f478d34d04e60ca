//! `PostgreSQL` store implementation for connection records.

use super::{
    models::{ConnectionRow, NewConnectionRow},
    schema::connections,
};
use crate::connection::{
    domain::{ConnectionName, ConnectionRecord, PersistedConnectionData, SecretMap},
    ports::{ConnectionStore, ConnectionStoreError, ConnectionStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use mockable::{Clock, DefaultClock};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// `PostgreSQL` connection pool type used by connection store adapters.
pub type ConnectionPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed connection store.
///
/// `replace` issues a single keyed `UPDATE`, so row-level atomicity gives
/// the per-key write serialization the port requires.
pub struct PostgresConnectionStore<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    pool: ConnectionPgPool,
    clock: Arc<C>,
}

impl PostgresConnectionStore<DefaultClock> {
    /// Creates a store from a `PostgreSQL` connection pool on the system
    /// clock.
    #[must_use]
    pub fn new(pool: ConnectionPgPool) -> Self {
        Self::with_clock(pool, Arc::new(DefaultClock))
    }
}

impl<C> PostgresConnectionStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a store from a pool and an explicit clock.
    ///
    /// The clock only drives expiry-based hiding in listings.
    #[must_use]
    pub fn with_clock(pool: ConnectionPgPool, clock: Arc<C>) -> Self {
        Self { pool, clock }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ConnectionStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ConnectionStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ConnectionStoreError::unavailable)?;
            f(&mut connection)
        })
        .await
        .map_err(ConnectionStoreError::unavailable)?
    }
}

impl<C> Clone for PostgresConnectionStore<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> fmt::Debug for PostgresConnectionStore<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresConnectionStore")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<C> ConnectionStore for PostgresConnectionStore<C>
where
    C: Clock + Send + Sync,
{
    async fn insert(&self, record: &ConnectionRecord) -> ConnectionStoreResult<()> {
        let record_name = record.name().clone();
        let new_row = to_new_row(record)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(connections::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ConnectionStoreError::AlreadyExists(record_name.clone())
                    }
                    _ => ConnectionStoreError::unavailable(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn replace(&self, record: &ConnectionRecord) -> ConnectionStoreResult<()> {
        let record_name = record.name().clone();
        let name_value = record_name.as_str().to_owned();
        let configs_value = plain_to_value(record)?;
        let secrets_value = secrets_to_value(record)?;
        let modified_value = record.last_modified_at();
        let expiry_value = record.expiry_time();

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(connections::table.filter(connections::name.eq(&name_value)))
                    .set((
                        connections::configs.eq(&configs_value),
                        connections::secrets.eq(&secrets_value),
                        connections::last_modified_at.eq(modified_value),
                        connections::expiry_time.eq(expiry_value),
                    ))
                    .execute(connection)
                    .map_err(ConnectionStoreError::unavailable)?;

            if updated_count == 0 {
                return Err(ConnectionStoreError::NotFound(record_name.clone()));
            }
            Ok(())
        })
        .await
    }

    async fn get(&self, name: &ConnectionName) -> ConnectionStoreResult<Option<ConnectionRecord>> {
        let name_value = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = connections::table
                .filter(connections::name.eq(&name_value))
                .select(ConnectionRow::as_select())
                .first::<ConnectionRow>(connection)
                .optional()
                .map_err(ConnectionStoreError::unavailable)?;
            row.map(row_to_record).transpose()
        })
        .await
    }

    async fn list(
        &self,
        max_results: Option<usize>,
        include_hidden: bool,
    ) -> ConnectionStoreResult<Vec<ConnectionRecord>> {
        let expiry_cutoff = (!include_hidden).then(|| self.clock.utc());

        self.run_blocking(move |connection| {
            let mut query = connections::table
                .select(ConnectionRow::as_select())
                .order(connections::name.asc())
                .into_boxed();
            if let Some(cutoff) = expiry_cutoff {
                query = query.filter(
                    connections::expiry_time
                        .is_null()
                        .or(connections::expiry_time.gt(cutoff)),
                );
            }
            if let Some(limit) = max_results {
                query = query.limit(i64::try_from(limit).unwrap_or(i64::MAX));
            }

            let rows = query
                .load::<ConnectionRow>(connection)
                .map_err(ConnectionStoreError::unavailable)?;
            rows.into_iter().map(row_to_record).collect()
        })
        .await
    }

    async fn delete(&self, name: &ConnectionName) -> ConnectionStoreResult<()> {
        let record_name = name.clone();
        let name_value = record_name.as_str().to_owned();

        self.run_blocking(move |connection| {
            let deleted_count =
                diesel::delete(connections::table.filter(connections::name.eq(&name_value)))
                    .execute(connection)
                    .map_err(ConnectionStoreError::unavailable)?;

            if deleted_count == 0 {
                return Err(ConnectionStoreError::NotFound(record_name.clone()));
            }
            Ok(())
        })
        .await
    }
}

fn plain_to_value(record: &ConnectionRecord) -> ConnectionStoreResult<serde_json::Value> {
    serde_json::to_value(record.plain_values()).map_err(ConnectionStoreError::unavailable)
}

fn secrets_to_value(record: &ConnectionRecord) -> ConnectionStoreResult<serde_json::Value> {
    serde_json::to_value(record.secret_values()).map_err(ConnectionStoreError::unavailable)
}

fn to_new_row(record: &ConnectionRecord) -> ConnectionStoreResult<NewConnectionRow> {
    Ok(NewConnectionRow {
        name: record.name().as_str().to_owned(),
        connection_type: record.type_name().to_owned(),
        configs: plain_to_value(record)?,
        secrets: secrets_to_value(record)?,
        created_at: record.created_at(),
        last_modified_at: record.last_modified_at(),
        expiry_time: record.expiry_time(),
    })
}

fn row_to_record(row: ConnectionRow) -> ConnectionStoreResult<ConnectionRecord> {
    let ConnectionRow {
        name,
        connection_type,
        configs,
        secrets,
        created_at,
        last_modified_at,
        expiry_time,
    } = row;

    let parsed_name =
        ConnectionName::new(&name).map_err(ConnectionStoreError::invalid_persisted_data)?;
    let parsed_configs: BTreeMap<String, String> =
        serde_json::from_value(configs).map_err(ConnectionStoreError::invalid_persisted_data)?;
    let parsed_secrets: BTreeMap<String, String> =
        serde_json::from_value(secrets).map_err(ConnectionStoreError::invalid_persisted_data)?;

    let data = PersistedConnectionData {
        name: parsed_name,
        type_name: connection_type,
        plain_values: parsed_configs,
        secret_values: SecretMap::from(parsed_secrets),
        created_at,
        last_modified_at,
        expiry_time,
    };
    Ok(ConnectionRecord::from_persisted(data))
}
