//! When steps for connection lifecycle BDD scenarios.

use std::collections::BTreeMap;

use super::world::{ConnectionWorld, build_request, run_async};
use rstest_bdd_macros::when;

#[when("both connections are created")]
fn create_both_connections(world: &mut ConnectionWorld) -> Result<(), eyre::Report> {
    for pending in &world.pending_connections {
        let request = build_request(&pending.name, &pending.type_name);
        let result = run_async(world.service.create(request));
        match result {
            Ok(record) => {
                world.created_connections.push(record);
            }
            Err(err) => {
                return Err(eyre::eyre!("unexpected create failure: {err}"));
            }
        }
    }
    Ok(())
}

#[when("a second connection with the same name is created")]
fn create_duplicate_connection(world: &mut ConnectionWorld) -> Result<(), eyre::Report> {
    let pending = world
        .pending_connections
        .last()
        .ok_or_else(|| eyre::eyre!("no pending connection in scenario world"))?;
    let request = build_request(&pending.name, &pending.type_name);
    world.last_create_result = Some(run_async(world.service.create(request)));
    Ok(())
}

#[when("the endpoint field is updated without resubmitting the secret")]
fn update_endpoint_only(world: &mut ConnectionWorld) -> Result<(), eyre::Report> {
    let record = world
        .created_connections
        .last()
        .ok_or_else(|| eyre::eyre!("no created connection to update"))?;
    let overrides =
        BTreeMap::from([("api_base".to_owned(), "https://new.example".to_owned())]);
    run_async(world.service.update(record.name().as_str(), overrides))
        .map_err(|err| eyre::eyre!("update failed: {err}"))?;
    Ok(())
}
