//! Application services for connection record management.

mod connections;

pub use connections::{
    ConnectionService, ConnectionServiceError, ConnectionServiceResult, CreateConnectionRequest,
};
