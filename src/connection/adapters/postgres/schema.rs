//! Diesel schema for connection record persistence.

diesel::table! {
    /// Connection records.
    connections (name) {
        /// Connection name, the primary key.
        #[max_length = 256]
        name -> Varchar,
        /// Connection type discriminator.
        #[max_length = 100]
        connection_type -> Varchar,
        /// Plain field values as JSONB.
        configs -> Jsonb,
        /// Secret field values as JSONB.
        secrets -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Latest write timestamp.
        last_modified_at -> Timestamptz,
        /// Advisory expiration timestamp.
        expiry_time -> Nullable<Timestamptz>,
    }
}
