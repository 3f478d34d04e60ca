//! Shared world state for connection lifecycle BDD scenarios.

use std::sync::Arc;

use junction::connection::{
    adapters::memory::InMemoryConnectionStore,
    domain::ConnectionRecord,
    registry::TypeRegistry,
    services::{ConnectionService, ConnectionServiceError, CreateConnectionRequest},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestConnectionService = ConnectionService<InMemoryConnectionStore, DefaultClock>;

/// Pending connection specification before creation.
pub struct PendingConnection {
    /// Record name.
    pub name: String,
    /// Connection type.
    pub type_name: String,
}

/// Scenario world for connection lifecycle behaviour tests.
pub struct ConnectionWorld {
    /// The connection service under test.
    pub service: TestConnectionService,
    /// Connections queued for creation.
    pub pending_connections: Vec<PendingConnection>,
    /// All successfully created records.
    pub created_connections: Vec<ConnectionRecord>,
    /// Result of the last create attempt.
    pub last_create_result: Option<Result<ConnectionRecord, ConnectionServiceError>>,
    /// Result of the last list call.
    pub last_list_result: Option<Vec<ConnectionRecord>>,
}

impl ConnectionWorld {
    /// Creates a world with empty pending scenario state.
    #[must_use]
    pub fn new() -> Self {
        let service = ConnectionService::new(
            Arc::new(TypeRegistry::builtin()),
            Arc::new(InMemoryConnectionStore::new()),
            Arc::new(DefaultClock),
        );
        Self {
            service,
            pending_connections: Vec::new(),
            created_connections: Vec::new(),
            last_create_result: None,
            last_list_result: None,
        }
    }
}

impl Default for ConnectionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ConnectionWorld {
    ConnectionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Builds a [`CreateConnectionRequest`] for a name and connection type.
///
/// Every request carries the secret `api_key = "abc"`; types that declare
/// an endpoint get a plausible `api_base`.
pub fn build_request(name: &str, type_name: &str) -> CreateConnectionRequest {
    let request = CreateConnectionRequest::new(name, type_name).with_secret_value("api_key", "abc");
    if type_name == "serp" {
        request
    } else {
        request.with_plain_value("api_base", "https://qdrant.example")
    }
}
