//! Service layer for issuing, submitting, and approving phases.

use crate::error::{EntityRef, WorkflowError, WorkflowResult};
use crate::identity::{
    domain::{ActorId, Capability, Session},
    ports::ActorDirectory,
    services::{IdentityResolver, denied},
};
use crate::notification::{
    domain::WorkflowEvent, ports::NotificationDispatcher, services::NotificationPublisher,
};
use crate::project::{
    domain::{Project, ProjectId},
    ports::ProjectRepository,
};
use crate::task::{
    domain::{PhaseNumber, Task, TaskBoard, TaskId},
    ports::TaskRepository,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use tracing::{info, warn};

/// Request payload for issuing a phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    description: String,
    due_date: DateTime<Utc>,
}

impl CreateTaskRequest {
    /// Creates a request with all required fields.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        description: impl Into<String>,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            project_id,
            description: description.into(),
            due_date,
        }
    }
}

/// Phase workflow orchestration service.
pub struct TaskWorkflowService<T, P, D, N, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    D: ActorDirectory,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    identity: IdentityResolver<D>,
    notifier: NotificationPublisher<N, C>,
    clock: Arc<C>,
}

// Clones share the same adapters; no `Clone` bound on the parameters.
impl<T, P, D, N, C> Clone for TaskWorkflowService<T, P, D, N, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    D: ActorDirectory,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            projects: Arc::clone(&self.projects),
            identity: self.identity.clone(),
            notifier: self.notifier.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T, P, D, N, C> TaskWorkflowService<T, P, D, N, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    D: ActorDirectory,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    /// Creates a new phase workflow service.
    #[must_use]
    pub fn new(
        tasks: Arc<T>,
        projects: Arc<P>,
        directory: Arc<D>,
        dispatcher: Arc<N>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            projects,
            identity: IdentityResolver::new(directory),
            notifier: NotificationPublisher::new(dispatcher, Arc::clone(&clock)),
            clock,
        }
    }

    /// Issues the next phase of a project.
    ///
    /// The phase is assigned to the individual project's student or the
    /// group's head and titled `Phase n`, where `n` is one more than the
    /// number of phases ever issued for the project.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`] unless the actor is the
    /// project's authority, [`WorkflowError::MissingAssignment`] when there
    /// is nobody to assign the phase to, [`WorkflowError::Task`] for a blank
    /// description, and [`WorkflowError::Project`] for rejected proposals.
    pub async fn create_task(
        &self,
        session: &Session,
        request: CreateTaskRequest,
    ) -> WorkflowResult<Task> {
        let actor = self.identity.resolve(session).await?;
        let project_id = request.project_id;
        let mut project = self.load_project(project_id).await?;
        project
            .authorize(&actor, Capability::CreateTask)
            .map_err(denied)?;
        let assignee = project
            .kind()
            .responsible_student()
            .ok_or(WorkflowError::MissingAssignment(project_id))?;

        let expected = project.revision();
        let phase = PhaseNumber::new(project.issue_phase_number(&*self.clock)?)?;
        let task = Task::issue(
            project_id,
            phase,
            request.description,
            request.due_date,
            assignee,
            &*self.clock,
        )?;
        self.projects.update(&project, expected).await?;
        if let Err(err) = self.tasks.store(&task).await {
            self.release_phase(project, phase).await;
            return Err(err.into());
        }
        info!(
            %project_id,
            task_id = %task.id(),
            actor_id = %actor.id(),
            assignee_id = %assignee,
            %phase,
            "issued phase"
        );
        let event = WorkflowEvent::TaskCreated {
            project_id,
            task_id: task.id(),
            phase,
        };
        self.notifier
            .publish(&event, project.audience(actor.id()))
            .await;
        Ok(task)
    }

    /// Submits a pending phase.
    ///
    /// Only the student the phase is assigned to may submit it, and only
    /// while they are still the project's assigned student or group head.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`] for anyone else and
    /// [`WorkflowError::Task`] unless the phase is pending.
    pub async fn submit_task(&self, session: &Session, task_id: TaskId) -> WorkflowResult<Task> {
        let actor = self.identity.resolve(session).await?;
        actor.require(Capability::SubmitTask).map_err(denied)?;
        let mut task = self.load_task(task_id).await?;
        let project = self.load_project(task.project_id()).await?;
        let responsible = project.kind().responsible_student();
        if task.assigned_to() != actor.id() || responsible != Some(actor.id()) {
            return Err(denied(actor.outside_scope(Capability::SubmitTask)));
        }

        let expected = task.revision();
        task.submit(&*self.clock)?;
        self.tasks.update(&task, expected).await?;
        info!(%task_id, project_id = %task.project_id(), actor_id = %actor.id(), "submitted phase");
        let event = WorkflowEvent::TaskSubmitted {
            project_id: task.project_id(),
            task_id,
        };
        self.notifier
            .publish(&event, project.audience(actor.id()))
            .await;
        Ok(task)
    }

    /// Approves a submitted phase.
    ///
    /// Approving an already approved phase succeeds without a write.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`] unless the actor is the
    /// owning project's authority and [`WorkflowError::Task`] when the phase
    /// has not been submitted.
    pub async fn approve_task(&self, session: &Session, task_id: TaskId) -> WorkflowResult<Task> {
        let actor = self.identity.resolve(session).await?;
        let mut task = self.load_task(task_id).await?;
        let project = self.load_project(task.project_id()).await?;
        project
            .authorize(&actor, Capability::ApproveTask)
            .map_err(denied)?;

        let expected = task.revision();
        if !task.approve(&*self.clock)? {
            return Ok(task);
        }
        self.tasks.update(&task, expected).await?;
        info!(%task_id, project_id = %task.project_id(), actor_id = %actor.id(), "approved phase");
        let event = WorkflowEvent::TaskApproved {
            project_id: task.project_id(),
            task_id,
        };
        self.notifier
            .publish(&event, project.audience(actor.id()))
            .await;
        Ok(task)
    }

    /// Lists a project's phases that are not yet approved, in creation
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`] unless the actor participates
    /// in the project.
    pub async fn list_active(
        &self,
        session: &Session,
        project_id: ProjectId,
    ) -> WorkflowResult<Vec<Task>> {
        let (active, _) = self.board(session, project_id).await?.into_parts();
        Ok(active)
    }

    /// Lists a project's approved phases, sorted by title descending.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`] unless the actor participates
    /// in the project.
    pub async fn list_history(
        &self,
        session: &Session,
        project_id: ProjectId,
    ) -> WorkflowResult<Vec<Task>> {
        let (_, history) = self.board(session, project_id).await?.into_parts();
        Ok(history)
    }

    /// Returns every phase issued to a student, split into active work and
    /// history.
    ///
    /// Students see their own board; supervisors see their allocated
    /// students' boards and administrators see anyone's.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`] when the actor may not view
    /// the student's work.
    pub async fn list_for_assignee(
        &self,
        session: &Session,
        assignee: ActorId,
    ) -> WorkflowResult<TaskBoard> {
        let actor = self.identity.resolve(session).await?;
        actor.require(Capability::ViewProject).map_err(denied)?;
        if assignee != actor.id() && !actor.acts_on_any_project() {
            let student = self.identity.find_actor_or_error(assignee).await?;
            if student.supervisor_id() != Some(actor.id()) {
                return Err(denied(actor.outside_scope(Capability::ViewProject)));
            }
        }
        let tasks = self.tasks.list_by_assignee(assignee).await?;
        Ok(TaskBoard::partition(tasks))
    }

    /// Loads a phase the actor may view.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] for unknown phases or
    /// [`WorkflowError::Unauthorized`] when the actor neither participates
    /// in the project nor was issued the phase.
    pub async fn find_task(&self, session: &Session, task_id: TaskId) -> WorkflowResult<Task> {
        let actor = self.identity.resolve(session).await?;
        let task = self.load_task(task_id).await?;
        if task.assigned_to() == actor.id() {
            actor.require(Capability::ViewProject).map_err(denied)?;
            return Ok(task);
        }
        let project = self.load_project(task.project_id()).await?;
        project.authorize_viewer(&actor).map_err(denied)?;
        Ok(task)
    }

    async fn board(&self, session: &Session, project_id: ProjectId) -> WorkflowResult<TaskBoard> {
        let actor = self.identity.resolve(session).await?;
        let project = self.load_project(project_id).await?;
        project.authorize_viewer(&actor).map_err(denied)?;
        let tasks = self.tasks.list_by_project(project_id).await?;
        Ok(TaskBoard::partition(tasks))
    }

    async fn release_phase(&self, mut project: Project, phase: PhaseNumber) {
        let committed = project.revision();
        if !project.release_phase_number(phase.value(), &*self.clock) {
            return;
        }
        if let Err(err) = self.projects.update(&project, committed).await {
            warn!(
                project_id = %project.id(),
                %phase,
                error = %err,
                "phase number left unused after a failed store"
            );
        }
    }

    async fn load_project(&self, project_id: ProjectId) -> WorkflowResult<Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or(WorkflowError::NotFound(EntityRef::Project(project_id)))
    }

    async fn load_task(&self, task_id: TaskId) -> WorkflowResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(WorkflowError::NotFound(EntityRef::Task(task_id)))
    }
}
