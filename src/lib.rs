//! Junction: connection registry core.
//!
//! This crate provides a registry service for named connection records:
//! reusable configuration objects (endpoint, credentials, provider type)
//! that other tools reference by name instead of embedding secrets inline.
//!
//! # Architecture
//!
//! Junction follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`connection`]: Typed connection records, the static type registry,
//!   CRUD services with secret-preserving partial update, and the
//!   transport-agnostic API mapping

pub mod connection;
