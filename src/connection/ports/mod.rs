//! Port contracts for connection record persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the connection
//! service.

pub mod store;

pub use store::{ConnectionStore, ConnectionStoreError, ConnectionStoreResult};
