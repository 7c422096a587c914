//! Service layer for group formation and project head designation.

use crate::config::WorkflowConfig;
use crate::error::{EntityRef, WorkflowError, WorkflowResult};
use crate::identity::{
    domain::{ActorId, Capability, ResolvedActor, Session},
    ports::ActorDirectory,
    services::{IdentityResolver, denied},
};
use crate::notification::{
    domain::WorkflowEvent, ports::NotificationDispatcher, services::NotificationPublisher,
};
use crate::project::{
    domain::{MemberRemoval, Project, ProjectId},
    ports::ProjectRepository,
};
use crate::task::ports::TaskRepository;
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Group membership orchestration service.
///
/// Phases follow the head: promoting a member hands the group's unapproved
/// phases over to them.
pub struct GroupFormationService<P, T, D, N, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    D: ActorDirectory,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    tasks: Arc<T>,
    identity: IdentityResolver<D>,
    notifier: NotificationPublisher<N, C>,
    clock: Arc<C>,
    config: WorkflowConfig,
}

// Clones share the same adapters; no `Clone` bound on the parameters.
impl<P, T, D, N, C> Clone for GroupFormationService<P, T, D, N, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    D: ActorDirectory,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            projects: Arc::clone(&self.projects),
            tasks: Arc::clone(&self.tasks),
            identity: self.identity.clone(),
            notifier: self.notifier.clone(),
            clock: Arc::clone(&self.clock),
            config: self.config,
        }
    }
}

impl<P, T, D, N, C> GroupFormationService<P, T, D, N, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    D: ActorDirectory,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    /// Creates a new group formation service.
    #[must_use]
    pub fn new(
        projects: Arc<P>,
        tasks: Arc<T>,
        directory: Arc<D>,
        dispatcher: Arc<N>,
        clock: Arc<C>,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            projects,
            tasks,
            identity: IdentityResolver::new(directory),
            notifier: NotificationPublisher::new(dispatcher, Arc::clone(&clock)),
            clock,
            config,
        }
    }

    /// Turns an individual project into a group project.
    ///
    /// The previously assigned student becomes the first member; the group
    /// has no head until one is promoted.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`] unless the actor is the
    /// project's authority, [`WorkflowError::NotFound`] or
    /// [`WorkflowError::Identity`] when a member is not a known student, and
    /// [`WorkflowError::Project`] when the project already is a group or no
    /// member is given.
    pub async fn convert_to_group(
        &self,
        session: &Session,
        project_id: ProjectId,
        members: Vec<ActorId>,
    ) -> WorkflowResult<Project> {
        let (actor, mut project) = self
            .authorized(session, project_id, Capability::ManageMembers)
            .await?;
        for member in &members {
            self.identity.find_student(*member).await?;
        }

        let expected = project.revision();
        project.convert_to_group(members, &*self.clock)?;
        self.projects.update(&project, expected).await?;
        info!(
            %project_id,
            actor_id = %actor.id(),
            members = project.kind().members().len(),
            "formed group"
        );
        let event = WorkflowEvent::GroupFormed { project_id };
        self.notifier
            .publish(&event, project.audience(actor.id()))
            .await;
        Ok(project)
    }

    /// Adds a student to a group.
    ///
    /// Adding an existing member succeeds without a write.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`] unless the actor is the
    /// project's authority, [`WorkflowError::NotFound`] or
    /// [`WorkflowError::Identity`] when `member` is not a known student, and
    /// [`WorkflowError::Project`] for individual projects.
    pub async fn add_member(
        &self,
        session: &Session,
        project_id: ProjectId,
        member: ActorId,
    ) -> WorkflowResult<Project> {
        let (actor, mut project) = self
            .authorized(session, project_id, Capability::ManageMembers)
            .await?;
        self.identity.find_student(member).await?;

        let expected = project.revision();
        if !project.add_member(member, &*self.clock)? {
            return Ok(project);
        }
        self.projects.update(&project, expected).await?;
        info!(%project_id, actor_id = %actor.id(), member_id = %member, "added group member");
        let event = WorkflowEvent::MemberAdded {
            project_id,
            member_id: member,
        };
        self.notifier
            .publish(&event, project.audience(actor.id()))
            .await;
        Ok(project)
    }

    /// Removes a student from a group.
    ///
    /// Removing the head follows the configured head removal policy.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`] unless the actor is the
    /// project's authority, or [`WorkflowError::Project`] when `member` is
    /// not in the group, is its last member, or is the head under the
    /// blocking policy.
    pub async fn remove_member(
        &self,
        session: &Session,
        project_id: ProjectId,
        member: ActorId,
    ) -> WorkflowResult<Project> {
        let (actor, mut project) = self
            .authorized(session, project_id, Capability::ManageMembers)
            .await?;

        let expected = project.revision();
        let removal = project.remove_member(member, self.config.head_removal, &*self.clock)?;
        self.projects.update(&project, expected).await?;
        let was_head = removal == MemberRemoval::RemovedHead;
        info!(
            %project_id,
            actor_id = %actor.id(),
            member_id = %member,
            was_head,
            "removed group member"
        );
        let event = WorkflowEvent::MemberRemoved {
            project_id,
            member_id: member,
            was_head,
        };
        let mut recipients = project.audience(actor.id());
        recipients.push(member);
        self.notifier.publish(&event, recipients).await;
        Ok(project)
    }

    /// Makes a member the project head, demoting any previous head.
    ///
    /// The group's unapproved phases are handed over to the new head.
    /// Promoting the current head writes no project change but still hands
    /// over any phase left with someone else.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`] unless the actor is the
    /// project's authority, or [`WorkflowError::Project`] for individual
    /// projects and non-members.
    pub async fn promote_to_head(
        &self,
        session: &Session,
        project_id: ProjectId,
        member: ActorId,
    ) -> WorkflowResult<Project> {
        let (actor, mut project) = self
            .authorized(session, project_id, Capability::PromoteHead)
            .await?;

        let expected = project.revision();
        let previous = project.kind().head();
        if project.promote_to_head(member, &*self.clock)? {
            self.projects.update(&project, expected).await?;
            info!(%project_id, actor_id = %actor.id(), head_id = %member, "promoted project head");
            let event = WorkflowEvent::HeadPromoted {
                project_id,
                head_id: member,
                previous,
            };
            self.notifier
                .publish(&event, project.audience(actor.id()))
                .await;
        }
        self.hand_over_open_phases(project_id, member).await?;
        Ok(project)
    }

    async fn hand_over_open_phases(
        &self,
        project_id: ProjectId,
        head: ActorId,
    ) -> WorkflowResult<()> {
        for mut task in self.tasks.list_by_project(project_id).await? {
            let expected = task.revision();
            if task.hand_over(head, &*self.clock) {
                self.tasks.update(&task, expected).await?;
                info!(%project_id, task_id = %task.id(), head_id = %head, "handed phase to head");
            }
        }
        Ok(())
    }

    async fn authorized(
        &self,
        session: &Session,
        project_id: ProjectId,
        capability: Capability,
    ) -> WorkflowResult<(ResolvedActor, Project)> {
        let actor = self.identity.resolve(session).await?;
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(WorkflowError::NotFound(EntityRef::Project(project_id)))?;
        project.authorize(&actor, capability).map_err(denied)?;
        Ok((actor, project))
    }
}
