//! Then steps for group collaboration BDD scenarios.

use super::world::{ADMIN, GroupWorld, SUPERVISOR, run_async};
use rstest_bdd_macros::then;

#[then(r#"the project head is "{member}""#)]
fn head_is(world: &GroupWorld, member: String) -> Result<(), eyre::Report> {
    let project = run_async(
        world
            .lifecycle
            .find_project(world.person(SUPERVISOR)?, world.project_id()?),
    )?;
    let expected = world.person(&member)?.actor_id();
    eyre::ensure!(
        project.kind().head() == Some(expected),
        "expected {member} to be head, found {:?}",
        project.kind().head()
    );
    Ok(())
}

#[then("the project has no head")]
fn no_head(world: &GroupWorld) -> Result<(), eyre::Report> {
    let project = run_async(
        world
            .lifecycle
            .find_project(world.person(SUPERVISOR)?, world.project_id()?),
    )?;
    eyre::ensure!(project.kind().head().is_none(), "expected no head");
    Ok(())
}

#[then("the group has {count:usize} members")]
fn member_count(world: &GroupWorld, count: usize) -> Result<(), eyre::Report> {
    let project = run_async(
        world
            .lifecycle
            .find_project(world.person(SUPERVISOR)?, world.project_id()?),
    )?;
    let members = project.kind().members().len();
    eyre::ensure!(members == count, "expected {count} members, found {members}");
    Ok(())
}

#[then(r#""{reader}" sees {count:usize} channel messages"#)]
fn channel_messages(world: &GroupWorld, reader: String, count: usize) -> Result<(), eyre::Report> {
    let history = run_async(
        world
            .chat
            .history(world.person(&reader)?, world.project_id()?),
    )?;
    eyre::ensure!(
        history.len() == count,
        "expected {count} messages, found {}",
        history.len()
    );
    Ok(())
}

#[then("the supervisor's load is {load:u32}")]
fn supervisor_load(world: &GroupWorld, load: u32) -> Result<(), eyre::Report> {
    let supervisors = run_async(world.allocation.list_supervisors(world.person(ADMIN)?))?;
    let supervisor = supervisors
        .first()
        .ok_or_else(|| eyre::eyre!("missing supervisor"))?;
    eyre::ensure!(
        supervisor.current_load() == load,
        "expected load {load}, found {}",
        supervisor.current_load()
    );
    Ok(())
}

#[then(r#"the last operation fails with "{kind}""#)]
fn last_operation_fails(world: &GroupWorld, kind: String) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the last operation to fail"))?;
    let actual = format!("{:?}", err.kind());
    eyre::ensure!(actual == kind, "expected {kind}, found {actual} ({err})");
    Ok(())
}

#[then("the last operation succeeds")]
fn last_operation_succeeds(world: &GroupWorld) -> Result<(), eyre::Report> {
    if let Some(err) = &world.last_error {
        return Err(eyre::eyre!("unexpected failure: {err}"));
    }
    Ok(())
}
