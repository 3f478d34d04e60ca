//! Connection record aggregate root.

use super::{ConnectionName, SecretMap};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named, typed connection record split into plain and secret field
/// buckets.
///
/// The record's `type_name` is the single source of truth for the
/// discriminator; neither bucket carries a `type` entry. The secret bucket
/// is populated only on explicitly revealed reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    name: ConnectionName,
    type_name: String,
    plain_values: BTreeMap<String, String>,
    secret_values: SecretMap,
    created_at: DateTime<Utc>,
    last_modified_at: DateTime<Utc>,
    expiry_time: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted connection record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedConnectionData {
    /// Persisted connection name.
    pub name: ConnectionName,
    /// Persisted connection type discriminator.
    pub type_name: String,
    /// Persisted plain field values.
    pub plain_values: BTreeMap<String, String>,
    /// Persisted secret field values.
    pub secret_values: SecretMap,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest write timestamp.
    pub last_modified_at: DateTime<Utc>,
    /// Persisted advisory expiration timestamp.
    pub expiry_time: Option<DateTime<Utc>>,
}

impl ConnectionRecord {
    /// Creates a new connection record stamped with the current clock time.
    ///
    /// `created_at` and `last_modified_at` start equal.
    #[must_use]
    pub fn new(
        name: ConnectionName,
        type_name: impl Into<String>,
        plain_values: BTreeMap<String, String>,
        secret_values: SecretMap,
        expiry_time: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            name,
            type_name: type_name.into(),
            plain_values,
            secret_values,
            created_at: timestamp,
            last_modified_at: timestamp,
            expiry_time,
        }
    }

    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedConnectionData) -> Self {
        Self {
            name: data.name,
            type_name: data.type_name,
            plain_values: data.plain_values,
            secret_values: data.secret_values,
            created_at: data.created_at,
            last_modified_at: data.last_modified_at,
            expiry_time: data.expiry_time,
        }
    }

    /// Returns the connection name.
    #[must_use]
    pub const fn name(&self) -> &ConnectionName {
        &self.name
    }

    /// Returns the connection type discriminator.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the plain field values.
    #[must_use]
    pub const fn plain_values(&self) -> &BTreeMap<String, String> {
        &self.plain_values
    }

    /// Returns the secret field values.
    #[must_use]
    pub const fn secret_values(&self) -> &SecretMap {
        &self.secret_values
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest write timestamp.
    #[must_use]
    pub const fn last_modified_at(&self) -> DateTime<Utc> {
        self.last_modified_at
    }

    /// Returns the advisory expiration timestamp, if set.
    #[must_use]
    pub const fn expiry_time(&self) -> Option<DateTime<Utc>> {
        self.expiry_time
    }

    /// Returns whether the record's advisory expiry has passed.
    ///
    /// Expiry is never enforced here; stores use it to soft-hide records
    /// from default listings.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry_time.is_some_and(|expiry| expiry <= now)
    }

    /// Returns a copy of the record with an empty secret bucket.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            secret_values: SecretMap::new(),
            ..self.clone()
        }
    }

    /// Overlays field overrides onto the record and refreshes
    /// `last_modified_at`.
    ///
    /// Entries absent from both override maps are retained verbatim, which
    /// is what preserves stored secrets across partial updates. `created_at`
    /// is untouched.
    pub fn apply_overrides(
        &mut self,
        plain_overrides: BTreeMap<String, String>,
        secret_overrides: BTreeMap<String, String>,
        clock: &impl Clock,
    ) {
        for (field, value) in plain_overrides {
            self.plain_values.insert(field, value);
        }
        for (field, value) in secret_overrides {
            self.secret_values.insert(field, value);
        }
        self.last_modified_at = clock.utc();
    }

    /// Replaces the advisory expiration timestamp.
    pub const fn set_expiry_time(&mut self, expiry_time: Option<DateTime<Utc>>) {
        self.expiry_time = expiry_time;
    }
}
