//! Then steps for phase workflow BDD scenarios.

use super::world::{PhaseWorld, run_async};
use capstone::task::domain::{Task, TaskStatus};
use rstest_bdd_macros::then;

#[then(r#"the latest phase is titled "{title}""#)]
fn latest_title(world: &PhaseWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.latest_task()?;
    eyre::ensure!(
        task.title() == title,
        "expected {title}, found {}",
        task.title()
    );
    Ok(())
}

#[then(r#"the latest phase is "{status}""#)]
fn latest_status(world: &PhaseWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = world.latest_task()?;
    let stored = run_async(world.workflow.find_task(world.supervisor()?, task.id()))?;
    eyre::ensure!(
        stored.status() == expected,
        "expected status {expected}, found {}",
        stored.status()
    );
    Ok(())
}

#[then(r#"the history reads "{titles}""#)]
fn history_reads(world: &PhaseWorld, titles: String) -> Result<(), eyre::Report> {
    let history = run_async(
        world
            .workflow
            .list_history(world.student()?, world.project_id()?),
    )?;
    let actual: Vec<&str> = history.iter().map(Task::title).collect();
    let expected: Vec<&str> = titles.split(", ").collect();
    eyre::ensure!(actual == expected, "expected {expected:?}, found {actual:?}");
    Ok(())
}

#[then("no phase is active")]
fn nothing_active(world: &PhaseWorld) -> Result<(), eyre::Report> {
    let active = run_async(
        world
            .workflow
            .list_active(world.supervisor()?, world.project_id()?),
    )?;
    eyre::ensure!(active.is_empty(), "expected no active phases");
    Ok(())
}

#[then(r#"the last operation fails with "{kind}""#)]
fn last_operation_fails(world: &PhaseWorld, kind: String) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the last operation to fail"))?;
    let actual = format!("{:?}", err.kind());
    eyre::ensure!(actual == kind, "expected {kind}, found {actual} ({err})");
    Ok(())
}

#[then("no operation failed")]
fn no_operation_failed(world: &PhaseWorld) -> Result<(), eyre::Report> {
    if let Some(err) = &world.last_error {
        return Err(eyre::eyre!("unexpected failure: {err}"));
    }
    Ok(())
}
