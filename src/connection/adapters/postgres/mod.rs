//! `PostgreSQL` adapters for connection store persistence.

mod models;
mod repository;
mod schema;

pub use repository::{ConnectionPgPool, PostgresConnectionStore};
