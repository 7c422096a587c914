//! When steps for phase workflow BDD scenarios.

use super::world::{PhaseWorld, run_async};
use capstone::task::{domain::TaskStatus, services::CreateTaskRequest};
use chrono::{Duration, Utc};
use rstest_bdd_macros::when;

fn issue_phase(world: &mut PhaseWorld) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(
        world.project_id()?,
        "Deliver the milestone",
        Utc::now() + Duration::days(7),
    );
    let result = run_async(world.workflow.create_task(world.supervisor()?, request));
    match result {
        Ok(task) => world.tasks.push(task),
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}

#[when("the supervisor issues {count:usize} phases")]
fn issue_phases(world: &mut PhaseWorld, count: usize) -> Result<(), eyre::Report> {
    for _ in 0..count {
        issue_phase(world)?;
    }
    Ok(())
}

#[when("the supervisor issues a phase")]
fn issue_one_phase(world: &mut PhaseWorld) -> Result<(), eyre::Report> {
    issue_phase(world)
}

#[when("the student submits the latest phase")]
fn submit_latest(world: &mut PhaseWorld) -> Result<(), eyre::Report> {
    let task_id = world.latest_task()?.id();
    let result = run_async(world.workflow.submit_task(world.student()?, task_id));
    match result {
        Ok(task) => {
            if let Some(latest) = world.tasks.last_mut() {
                *latest = task;
            }
        }
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}

#[when("the supervisor approves the latest phase")]
fn approve_latest(world: &mut PhaseWorld) -> Result<(), eyre::Report> {
    let task_id = world.latest_task()?.id();
    let result = run_async(world.workflow.approve_task(world.supervisor()?, task_id));
    match result {
        Ok(task) => {
            if let Some(latest) = world.tasks.last_mut() {
                *latest = task;
            }
        }
        Err(err) => world.last_error = Some(err),
    }
    Ok(())
}

#[when("every phase is submitted and approved")]
fn complete_every_phase(world: &mut PhaseWorld) -> Result<(), eyre::Report> {
    let student = world.student()?.clone();
    let supervisor = world.supervisor()?.clone();
    for task in &mut world.tasks {
        if task.status() == TaskStatus::Pending {
            run_async(world.workflow.submit_task(&student, task.id()))?;
        }
        *task = run_async(world.workflow.approve_task(&supervisor, task.id()))?;
    }
    Ok(())
}
