//! Service layer for project creation, status, review, and supervision.

use crate::config::WorkflowConfig;
use crate::error::{EntityRef, WorkflowError, WorkflowResult};
use crate::identity::{
    domain::{Actor, ActorId, Allocation, Capability, Session},
    ports::ActorDirectory,
    services::{IdentityResolver, denied},
};
use crate::notification::{
    domain::WorkflowEvent, ports::NotificationDispatcher, services::NotificationPublisher,
};
use crate::project::{
    domain::{
        Project, ProjectDetails, ProjectDomainError, ProjectId, ProjectKind, ProjectStatus,
        ProjectType, ProposalDecision,
    },
    ports::ProjectRepository,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Request payload for creating a project.
///
/// Students may only propose individual projects for themselves, so the
/// project type and assignees are ignored for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    title: String,
    description: String,
    department: Option<String>,
    deadline: Option<DateTime<Utc>>,
    project_type: ProjectType,
    assignees: Vec<ActorId>,
}

impl CreateProjectRequest {
    /// Creates a request for an individual project with required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            department: None,
            deadline: None,
            project_type: ProjectType::Individual,
            assignees: Vec::new(),
        }
    }

    /// Sets the owning department.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Sets the submission deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the project type.
    #[must_use]
    pub const fn with_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = project_type;
        self
    }

    /// Sets the assigned students.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = ActorId>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    fn details(&self) -> Result<ProjectDetails, ProjectDomainError> {
        let mut details = ProjectDetails::new(self.title.as_str(), self.description.as_str())?;
        if let Some(department) = &self.department {
            details = details.with_department(department.as_str());
        }
        if let Some(deadline) = self.deadline {
            details = details.with_deadline(deadline);
        }
        Ok(details)
    }
}

/// Project lifecycle orchestration service.
pub struct ProjectLifecycleService<P, D, N, C>
where
    P: ProjectRepository,
    D: ActorDirectory,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    identity: IdentityResolver<D>,
    notifier: NotificationPublisher<N, C>,
    clock: Arc<C>,
    config: WorkflowConfig,
}

// Clones share the same adapters; no `Clone` bound on the parameters.
impl<P, D, N, C> Clone for ProjectLifecycleService<P, D, N, C>
where
    P: ProjectRepository,
    D: ActorDirectory,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            projects: Arc::clone(&self.projects),
            identity: self.identity.clone(),
            notifier: self.notifier.clone(),
            clock: Arc::clone(&self.clock),
            config: self.config,
        }
    }
}

impl<P, D, N, C> ProjectLifecycleService<P, D, N, C>
where
    P: ProjectRepository,
    D: ActorDirectory,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    /// Creates a new project lifecycle service.
    #[must_use]
    pub fn new(
        projects: Arc<P>,
        directory: Arc<D>,
        dispatcher: Arc<N>,
        clock: Arc<C>,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            projects,
            identity: IdentityResolver::new(directory),
            notifier: NotificationPublisher::new(dispatcher, Arc::clone(&clock)),
            clock,
            config,
        }
    }

    /// Returns the identity resolver the service authorizes against.
    #[must_use]
    pub const fn identity(&self) -> &IdentityResolver<D> {
        &self.identity
    }

    /// Returns the clock used to stamp changes.
    #[must_use]
    pub const fn clock(&self) -> &Arc<C> {
        &self.clock
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> WorkflowConfig {
        self.config
    }

    /// Creates a project.
    ///
    /// A student's request becomes an individual proposal assigned to the
    /// student, without a supervisor, and awaiting approval. The supervisor
    /// arrives through [`Self::assign_supervisor`]. A supervisor or administrator chooses the type and
    /// assignees; the project is active at once and a supervisor initiator
    /// becomes its supervisor.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`] when the actor may not create
    /// projects, [`WorkflowError::Project`] for blank fields or a wrong
    /// number of assignees, and [`WorkflowError::NotFound`] or
    /// [`WorkflowError::Identity`] when an assignee is not a known student.
    pub async fn create_project(
        &self,
        session: &Session,
        request: CreateProjectRequest,
    ) -> WorkflowResult<Project> {
        let actor = self.identity.resolve(session).await?;
        actor.require(Capability::CreateProject).map_err(denied)?;
        let details = request.details()?;

        let project = if actor.has(Capability::ChooseProjectType) {
            let kind = self.commissioned_kind(&request).await?;
            let supervisor = (!actor.acts_on_any_project()).then_some(actor.id());
            Project::commission(details, kind, supervisor, &*self.clock)
        } else {
            let student = self.identity.find_student(actor.id()).await?;
            Project::propose(details, student.id(), None, &*self.clock)
        };

        self.projects.store(&project).await?;
        info!(
            project_id = %project.id(),
            actor_id = %actor.id(),
            project_type = %project.kind().project_type(),
            approval = %project.approval(),
            "created project"
        );
        let event = WorkflowEvent::ProjectCreated {
            project_id: project.id(),
            created_by: actor.id(),
        };
        self.notifier
            .publish(&event, project.audience(actor.id()))
            .await;
        Ok(project)
    }

    async fn commissioned_kind(
        &self,
        request: &CreateProjectRequest,
    ) -> WorkflowResult<ProjectKind> {
        for assignee in &request.assignees {
            self.identity.find_student(*assignee).await?;
        }
        match request.project_type {
            ProjectType::Individual => match request.assignees.as_slice() {
                [] => Err(ProjectDomainError::MissingAssignee.into()),
                [student] => Ok(ProjectKind::individual(*student)),
                many => Err(ProjectDomainError::TooManyAssignees(many.len()).into()),
            },
            ProjectType::Group => Ok(ProjectKind::group(request.assignees.iter().copied())?),
        }
    }

    /// Moves a project along the status pipeline.
    ///
    /// Selecting the current status again succeeds without a write.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`] unless the actor is the
    /// project's authority, or [`WorkflowError::Project`] when the
    /// configured policy forbids the move.
    pub async fn update_status(
        &self,
        session: &Session,
        project_id: ProjectId,
        target: ProjectStatus,
    ) -> WorkflowResult<Project> {
        let actor = self.identity.resolve(session).await?;
        let mut project = self.load(project_id).await?;
        project
            .authorize(&actor, Capability::UpdateProjectStatus)
            .map_err(denied)?;

        let expected = project.revision();
        let from = project.status();
        if !project.update_status(target, self.config.status_policy, &*self.clock)? {
            return Ok(project);
        }
        self.projects.update(&project, expected).await?;
        info!(%project_id, actor_id = %actor.id(), %from, to = %target, "updated project status");
        let event = WorkflowEvent::ProjectStatusChanged {
            project_id,
            from,
            to: target,
        };
        self.notifier
            .publish(&event, project.audience(actor.id()))
            .await;
        Ok(project)
    }

    /// Approves or rejects a student proposal.
    ///
    /// Repeating the recorded decision succeeds without a write.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`] unless the actor is the
    /// project's authority, or [`WorkflowError::Project`] when the proposal
    /// was already decided the other way.
    pub async fn review_proposal(
        &self,
        session: &Session,
        project_id: ProjectId,
        decision: ProposalDecision,
    ) -> WorkflowResult<Project> {
        let actor = self.identity.resolve(session).await?;
        let mut project = self.load(project_id).await?;
        project
            .authorize(&actor, Capability::ReviewProposal)
            .map_err(denied)?;

        let expected = project.revision();
        if !project.review_proposal(decision, &*self.clock)? {
            return Ok(project);
        }
        self.projects.update(&project, expected).await?;
        info!(%project_id, actor_id = %actor.id(), %decision, "reviewed proposal");
        let event = WorkflowEvent::ProposalReviewed {
            project_id,
            decision,
        };
        self.notifier
            .publish(&event, project.audience(actor.id()))
            .await;
        Ok(project)
    }

    /// Pairs an unassigned student with a supervisor.
    ///
    /// The student's individual projects without a supervisor adopt the
    /// supervisor. Repeating an existing pairing leaves the allocation alone
    /// but still hands over any project that has no supervisor yet, such as a
    /// proposal written after the pairing. Returns the student's record.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`] for non-administrators,
    /// [`WorkflowError::NotFound`] for unknown actors, and
    /// [`WorkflowError::Identity`] when the roles are wrong, the student
    /// already has another supervisor, or the supervisor is at capacity.
    pub async fn assign_supervisor(
        &self,
        session: &Session,
        student_id: ActorId,
        supervisor_id: ActorId,
    ) -> WorkflowResult<Actor> {
        let actor = self.identity.resolve(session).await?;
        actor.require(Capability::AssignSupervisor).map_err(denied)?;

        let student = self.identity.find_actor_or_error(student_id).await?;
        if student.supervisor_id() == Some(supervisor_id) {
            if self.adopt_into_projects(student_id, supervisor_id).await? > 0 {
                self.announce_pairing(student_id, supervisor_id).await;
            }
            return Ok(student);
        }
        let supervisor = self.identity.find_actor_or_error(supervisor_id).await?;
        let allocation = Allocation::pair(student, supervisor, &*self.clock)?;
        self.identity.directory().apply_allocation(&allocation).await?;
        let (paired_student, paired_supervisor) = allocation.into_parts();
        info!(
            %student_id,
            %supervisor_id,
            actor_id = %actor.id(),
            load = paired_supervisor.load().map_or(0, |(_, load)| load),
            "assigned supervisor"
        );

        self.adopt_into_projects(student_id, supervisor_id).await?;
        self.announce_pairing(student_id, supervisor_id).await;
        Ok(paired_student)
    }

    async fn announce_pairing(&self, student_id: ActorId, supervisor_id: ActorId) {
        let event = WorkflowEvent::SupervisorAssigned {
            student_id,
            supervisor_id,
        };
        self.notifier
            .publish(&event, [student_id, supervisor_id])
            .await;
    }

    /// Returns how many projects adopted the supervisor.
    async fn adopt_into_projects(
        &self,
        student_id: ActorId,
        supervisor_id: ActorId,
    ) -> WorkflowResult<usize> {
        let mut adopted = 0;
        for mut project in self.projects.list_involving(student_id).await? {
            if project.kind().assigned_student() != Some(student_id) {
                continue;
            }
            let expected = project.revision();
            if project.adopt_supervisor(supervisor_id, &*self.clock) {
                self.projects.update(&project, expected).await?;
                info!(project_id = %project.id(), %supervisor_id, "project adopted supervisor");
                adopted += 1;
            }
        }
        Ok(adopted)
    }

    /// Loads a project the actor may view.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] for unknown projects or
    /// [`WorkflowError::Unauthorized`] when the actor is not a participant.
    pub async fn find_project(
        &self,
        session: &Session,
        project_id: ProjectId,
    ) -> WorkflowResult<Project> {
        let actor = self.identity.resolve(session).await?;
        let project = self.load(project_id).await?;
        project.authorize_viewer(&actor).map_err(denied)?;
        Ok(project)
    }

    /// Lists the projects an actor participates in, in creation order.
    ///
    /// Administrators see every project.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`] when the actor cannot view
    /// projects or [`WorkflowError::ProjectRepository`] when lookup fails.
    pub async fn list_projects_for(&self, session: &Session) -> WorkflowResult<Vec<Project>> {
        let actor = self.identity.resolve(session).await?;
        actor.require(Capability::ViewProject).map_err(denied)?;
        if actor.acts_on_any_project() {
            return Ok(self.projects.list_all().await?);
        }
        Ok(self.projects.list_involving(actor.id()).await?)
    }

    async fn load(&self, project_id: ProjectId) -> WorkflowResult<Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or(WorkflowError::NotFound(EntityRef::Project(project_id)))
    }
}
