//! Thin request/response mapping over the connection service.
//!
//! This module is transport-agnostic: it maps flat wire payloads onto
//! service requests, records onto wire views, and service errors onto
//! status/code pairs. An HTTP layer plugs these functions into its router;
//! caller authentication happens before any of this code runs.

mod error;
mod request;
mod response;

pub use error::ApiError;
pub use request::{ConnectionPayload, DEFAULT_LIST_MAX_RESULTS, ListQuery, create_request};
pub use response::ConnectionView;
