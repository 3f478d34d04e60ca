//! Given steps for connection lifecycle BDD scenarios.

use super::world::{ConnectionWorld, PendingConnection, build_request, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a connection named "{name}" of type "{type_name}""#)]
fn a_connection_named(world: &mut ConnectionWorld, name: String, type_name: String) {
    world
        .pending_connections
        .push(PendingConnection { name, type_name });
}

#[given("the connection has already been created")]
fn connection_already_created(world: &mut ConnectionWorld) -> Result<(), eyre::Report> {
    let pending = world
        .pending_connections
        .last()
        .ok_or_else(|| eyre::eyre!("no pending connection in scenario world"))?;
    let request = build_request(&pending.name, &pending.type_name);
    let created = run_async(world.service.create(request))
        .wrap_err("create existing connection for scenario")?;
    world.created_connections.push(created);
    Ok(())
}
