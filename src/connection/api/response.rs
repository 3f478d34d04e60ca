//! Response views for the connection API surface.

use crate::connection::domain::ConnectionRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Wire view of a connection record.
///
/// Field values are flattened into the object next to the envelope keys,
/// matching the shape
/// `{name, type, <fields...>, created_date, last_modified_date,
/// expiry_time?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionView {
    /// Record name.
    pub name: String,
    /// Connection type discriminator.
    #[serde(rename = "type")]
    pub connection_type: String,
    /// Flattened field values.
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    /// Creation timestamp.
    pub created_date: DateTime<Utc>,
    /// Latest write timestamp.
    pub last_modified_date: DateTime<Utc>,
    /// Advisory expiration timestamp; omitted from the wire when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<DateTime<Utc>>,
}

impl ConnectionView {
    /// Builds the default view: plain fields only.
    #[must_use]
    pub fn redacted(record: &ConnectionRecord) -> Self {
        Self::build(record, false)
    }

    /// Builds the revealed view: plain and secret fields merged.
    ///
    /// Only the listsecrets endpoint uses this constructor.
    #[must_use]
    pub fn with_secrets(record: &ConnectionRecord) -> Self {
        Self::build(record, true)
    }

    fn build(record: &ConnectionRecord, reveal_secrets: bool) -> Self {
        let mut fields = record.plain_values().clone();
        if reveal_secrets {
            for (field, value) in record.secret_values().iter() {
                fields.insert(field.to_owned(), value.to_owned());
            }
        }
        Self {
            name: record.name().as_str().to_owned(),
            connection_type: record.type_name().to_owned(),
            fields,
            created_date: record.created_at(),
            last_modified_date: record.last_modified_at(),
            expiry_time: record.expiry_time(),
        }
    }
}
