//! Diesel row models for connection record persistence.

use super::schema::connections;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for connection records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = connections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ConnectionRow {
    /// Connection name.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub name: String,
    /// Connection type discriminator.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub connection_type: String,
    /// Plain field values JSON payload.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub configs: Value,
    /// Secret field values JSON payload.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub secrets: Value,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Latest write timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub last_modified_at: DateTime<Utc>,
    /// Advisory expiration timestamp.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub expiry_time: Option<DateTime<Utc>>,
}

/// Insert model for connection records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = connections)]
pub struct NewConnectionRow {
    /// Connection name.
    pub name: String,
    /// Connection type discriminator.
    pub connection_type: String,
    /// Plain field values JSON payload.
    pub configs: Value,
    /// Secret field values JSON payload.
    pub secrets: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest write timestamp.
    pub last_modified_at: DateTime<Utc>,
    /// Advisory expiration timestamp.
    pub expiry_time: Option<DateTime<Utc>>,
}
