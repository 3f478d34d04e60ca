//! Then steps for connection lifecycle BDD scenarios.

use super::world::{ConnectionWorld, run_async};
use junction::connection::{ports::ConnectionStoreError, services::ConnectionServiceError};
use rstest_bdd_macros::then;

#[then("listing connections returns {count:usize} entries")]
fn listing_returns_count(world: &mut ConnectionWorld, count: usize) -> Result<(), eyre::Report> {
    let listed = run_async(world.service.list(None, false))
        .map_err(|err| eyre::eyre!("list failed: {err}"))?;
    if listed.len() != count {
        return Err(eyre::eyre!(
            "expected {count} connections, found {}",
            listed.len()
        ));
    }
    world.last_list_result = Some(listed);
    Ok(())
}

#[then(r#"the connection "{name}" can be fetched by name"#)]
fn connection_fetched_by_name(
    world: &mut ConnectionWorld,
    name: String,
) -> Result<(), eyre::Report> {
    let fetched = run_async(world.service.get(&name, false))
        .map_err(|err| eyre::eyre!("get failed: {err}"))?;
    if !fetched.secret_values().is_empty() {
        return Err(eyre::eyre!("default read should be redacted"));
    }
    Ok(())
}

#[then("creation fails with an already-exists error")]
fn creation_fails_with_conflict(world: &ConnectionWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_create_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing create result in scenario world"))?;
    if !matches!(
        result,
        Err(ConnectionServiceError::Store(
            ConnectionStoreError::AlreadyExists(_)
        ))
    ) {
        return Err(eyre::eyre!("expected already-exists error, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the stored secret value is still "{value}""#)]
fn stored_secret_still(world: &mut ConnectionWorld, value: String) -> Result<(), eyre::Report> {
    let record = world
        .created_connections
        .last()
        .ok_or_else(|| eyre::eyre!("no created connection in scenario world"))?;
    let revealed = run_async(world.service.get(record.name().as_str(), true))
        .map_err(|err| eyre::eyre!("revealed get failed: {err}"))?;
    if revealed.secret_values().get("api_key") != Some(value.as_str()) {
        return Err(eyre::eyre!("expected secret 'api_key' to still be set"));
    }
    Ok(())
}

#[then(r#"the endpoint field is "{value}""#)]
fn endpoint_field_is(world: &mut ConnectionWorld, value: String) -> Result<(), eyre::Report> {
    let record = world
        .created_connections
        .last()
        .ok_or_else(|| eyre::eyre!("no created connection in scenario world"))?;
    let fetched = run_async(world.service.get(record.name().as_str(), false))
        .map_err(|err| eyre::eyre!("get failed: {err}"))?;
    if fetched.plain_values().get("api_base").map(String::as_str) != Some(value.as_str()) {
        return Err(eyre::eyre!("expected endpoint field '{value}'"));
    }
    Ok(())
}
