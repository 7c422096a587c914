//! In-memory integration tests for optimistic concurrency in the stores.

use capstone::{
    ErrorKind, Revision, WorkflowError,
    identity::{
        adapters::memory::InMemoryActorDirectory,
        domain::{Actor, ActorId},
        ports::{ActorDirectory, ActorDirectoryError},
    },
    project::{
        adapters::memory::InMemoryProjectRepository,
        domain::{Project, ProjectDetails, ProjectKind, ProjectStatus, StatusTransitionPolicy},
        ports::{ProjectRepository, ProjectRepositoryError},
    },
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::{PhaseNumber, Task},
        ports::{TaskRepository, TaskRepositoryError},
    },
};
use chrono::Utc;
use mockable::DefaultClock;
use rstest::rstest;

use super::helpers::clock;

fn project(clock: &DefaultClock) -> Result<Project, eyre::Report> {
    let details = ProjectDetails::new("Thesis", "Capstone research")?;
    Ok(Project::commission(
        details,
        ProjectKind::individual(ActorId::new()),
        Some(ActorId::new()),
        clock,
    ))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_project_updates_conflict(clock: DefaultClock) -> Result<(), eyre::Report> {
    let repo = InMemoryProjectRepository::new();
    let stored = project(&clock)?;
    repo.store(&stored).await?;

    let mut first = stored.clone();
    let mut second = stored.clone();
    first.update_status(ProjectStatus::Proposal, StatusTransitionPolicy::AnyToAny, &clock)?;
    second.update_status(ProjectStatus::Testing, StatusTransitionPolicy::AnyToAny, &clock)?;
    repo.update(&first, stored.revision()).await?;
    let result = repo.update(&second, stored.revision()).await;

    eyre::ensure!(
        matches!(
            result,
            Err(ProjectRepositoryError::Conflict { expected, actual, .. })
                if expected == Revision::INITIAL && actual == first.revision()
        ),
        "expected a revision conflict, got {result:?}"
    );
    let current = repo
        .find_by_id(stored.id())
        .await?
        .ok_or_else(|| eyre::eyre!("project vanished"))?;
    eyre::ensure!(current.status() == ProjectStatus::Proposal);
    eyre::ensure!(
        WorkflowError::from(ProjectRepositoryError::Conflict {
            project_id: stored.id(),
            expected: Revision::INITIAL,
            actual: first.revision(),
        })
        .kind()
            == ErrorKind::Conflict
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_and_missing_projects_are_reported(
    clock: DefaultClock,
) -> Result<(), eyre::Report> {
    let repo = InMemoryProjectRepository::new();
    let stored = project(&clock)?;
    repo.store(&stored).await?;

    let duplicate = repo.store(&stored).await;
    let missing = repo.update(&project(&clock)?, Revision::INITIAL).await;

    eyre::ensure!(matches!(
        duplicate,
        Err(ProjectRepositoryError::DuplicateProject(_))
    ));
    eyre::ensure!(matches!(missing, Err(ProjectRepositoryError::NotFound(_))));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn involvement_covers_supervisors_and_students(
    clock: DefaultClock,
) -> Result<(), eyre::Report> {
    let repo = InMemoryProjectRepository::new();
    let first = project(&clock)?;
    let second = project(&clock)?;
    repo.store(&first).await?;
    repo.store(&second).await?;

    let student = first
        .kind()
        .assigned_student()
        .ok_or_else(|| eyre::eyre!("missing student"))?;
    let supervisor = second
        .supervisor()
        .ok_or_else(|| eyre::eyre!("missing supervisor"))?;

    let for_student = repo.list_involving(student).await?;
    let for_supervisor = repo.list_involving(supervisor).await?;
    let all = repo.list_all().await?;

    eyre::ensure!(for_student.iter().map(Project::id).eq([first.id()]));
    eyre::ensure!(for_supervisor.iter().map(Project::id).eq([second.id()]));
    eyre::ensure!(all.iter().map(Project::id).eq([first.id(), second.id()]));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_task_updates_conflict(clock: DefaultClock) -> Result<(), eyre::Report> {
    let repo = InMemoryTaskRepository::new();
    let assignee = ActorId::new();
    let task = Task::issue(
        capstone::project::domain::ProjectId::new(),
        PhaseNumber::new(1)?,
        "Literature review",
        Utc::now(),
        assignee,
        &clock,
    )?;
    repo.store(&task).await?;

    let mut submitted = task.clone();
    submitted.submit(&clock)?;
    repo.update(&submitted, task.revision()).await?;
    let replay = repo.update(&submitted, task.revision()).await;

    eyre::ensure!(matches!(replay, Err(TaskRepositoryError::Conflict { .. })));
    let by_assignee = repo.list_by_assignee(assignee).await?;
    eyre::ensure!(by_assignee.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn directory_rejects_duplicate_actors(clock: DefaultClock) -> Result<(), eyre::Report> {
    let directory = InMemoryActorDirectory::new();
    let student = Actor::student("Ada", &clock)?;
    directory.register(&student).await?;

    let result = directory.register(&student).await;

    eyre::ensure!(matches!(result, Err(ActorDirectoryError::DuplicateActor(_))));
    Ok(())
}
