//! Given steps for phase workflow BDD scenarios.

use super::world::{PhaseWorld, run_async};
use capstone::{
    Revision,
    identity::{
        domain::{Actor, Session},
        ports::ActorDirectory,
    },
    project::{
        domain::{
            ApprovalState, PersistedProjectData, Project, ProjectDetails, ProjectId,
            ProjectKind, ProjectStatus,
        },
        ports::ProjectRepository,
        services::CreateProjectRequest,
    },
};
use chrono::Utc;
use eyre::WrapErr;
use rstest_bdd_macros::given;

fn enrol(world: &PhaseWorld, actor: &Actor) -> Result<Session, eyre::Report> {
    run_async(world.directory.register(actor)).wrap_err("register scenario actor")?;
    Ok(Session::for_actor(actor))
}

#[given(r#"supervisor "{supervisor}" runs an individual project for student "{student}""#)]
fn individual_project(
    world: &mut PhaseWorld,
    supervisor: String,
    student: String,
) -> Result<(), eyre::Report> {
    let supervisor_session = enrol(world, &Actor::supervisor(supervisor, 10, &world.clock)?)?;
    let student_session = enrol(world, &Actor::student(student, &world.clock)?)?;
    let request = CreateProjectRequest::new("Thesis", "Capstone research")
        .with_assignees([student_session.actor_id()]);
    let project = run_async(world.lifecycle.create_project(&supervisor_session, request))
        .wrap_err("create individual project")?;
    world.project_id = Some(project.id());
    world.supervisor = Some(supervisor_session);
    world.student = Some(student_session);
    Ok(())
}

#[given(r#"supervisor "{supervisor}" runs an individual project without a student"#)]
fn unassigned_project(world: &mut PhaseWorld, supervisor: String) -> Result<(), eyre::Report> {
    let supervisor_session = enrol(world, &Actor::supervisor(supervisor, 10, &world.clock)?)?;
    let now = Utc::now();
    let project = Project::from_persisted(PersistedProjectData {
        id: ProjectId::new(),
        details: ProjectDetails::new("Legacy", "Imported without a student")?,
        kind: ProjectKind::Individual {
            assigned_student: None,
        },
        status: ProjectStatus::Pending,
        approval: ApprovalState::Active,
        supervisor: Some(supervisor_session.actor_id()),
        phases_issued: 0,
        created_at: now,
        updated_at: now,
        revision: Revision::INITIAL,
    })?;
    run_async(world.projects.store(&project)).wrap_err("seed unassigned project")?;
    world.project_id = Some(project.id());
    world.supervisor = Some(supervisor_session);
    Ok(())
}
