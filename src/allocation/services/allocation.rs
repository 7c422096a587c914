//! Allocation dashboard and pairing service.

use crate::allocation::domain::SupervisorLoad;
use crate::error::WorkflowResult;
use crate::identity::{
    domain::{Actor, ActorId, Capability, Session},
    ports::ActorDirectory,
    services::denied,
};
use crate::notification::ports::NotificationDispatcher;
use crate::project::{ports::ProjectRepository, services::ProjectLifecycleService};
use mockable::Clock;
use tracing::info;

/// Supervisor allocation orchestration service.
pub struct AllocationService<P, D, N, C>
where
    P: ProjectRepository,
    D: ActorDirectory,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    lifecycle: ProjectLifecycleService<P, D, N, C>,
}

// Clones share the same adapters; no `Clone` bound on the parameters.
impl<P, D, N, C> Clone for AllocationService<P, D, N, C>
where
    P: ProjectRepository,
    D: ActorDirectory,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            lifecycle: self.lifecycle.clone(),
        }
    }
}

impl<P, D, N, C> AllocationService<P, D, N, C>
where
    P: ProjectRepository,
    D: ActorDirectory,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    /// Creates an allocation service on top of the project lifecycle.
    #[must_use]
    pub const fn new(lifecycle: ProjectLifecycleService<P, D, N, C>) -> Self {
        Self { lifecycle }
    }

    /// Lists students without a supervisor, in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`](crate::WorkflowError::Unauthorized)
    /// for actors other than the administrator.
    pub async fn list_unassigned(&self, session: &Session) -> WorkflowResult<Vec<Actor>> {
        let identity = self.lifecycle.identity();
        let actor = identity.resolve(session).await?;
        actor
            .require(Capability::ViewAllocationPool)
            .map_err(denied)?;
        Ok(identity.directory().list_unassigned_students().await?)
    }

    /// Pairs a student with a supervisor.
    ///
    /// # Errors
    ///
    /// See [`ProjectLifecycleService::assign_supervisor`].
    pub async fn authorize(
        &self,
        session: &Session,
        student_id: ActorId,
        supervisor_id: ActorId,
    ) -> WorkflowResult<Actor> {
        self.lifecycle
            .assign_supervisor(session, student_id, supervisor_id)
            .await
    }

    /// Lists supervisors with their capacity and load.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`](crate::WorkflowError::Unauthorized)
    /// for actors other than the administrator.
    pub async fn list_supervisors(&self, session: &Session) -> WorkflowResult<Vec<SupervisorLoad>> {
        let identity = self.lifecycle.identity();
        let actor = identity.resolve(session).await?;
        actor
            .require(Capability::ViewAllocationPool)
            .map_err(denied)?;
        let supervisors = identity.directory().list_supervisors().await?;
        Ok(supervisors
            .iter()
            .filter_map(SupervisorLoad::from_actor)
            .collect())
    }

    /// Lists the students allocated to the calling supervisor.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`](crate::WorkflowError::Unauthorized)
    /// when the actor cannot view projects.
    pub async fn list_my_students(&self, session: &Session) -> WorkflowResult<Vec<Actor>> {
        let identity = self.lifecycle.identity();
        let actor = identity.resolve(session).await?;
        actor.require(Capability::ViewProject).map_err(denied)?;
        Ok(identity.directory().list_students_of(actor.id()).await?)
    }

    /// Registers a supervisor.
    ///
    /// Without an explicit capacity the configured default applies.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`](crate::WorkflowError::Unauthorized)
    /// for actors other than the administrator and
    /// [`WorkflowError::Identity`](crate::WorkflowError::Identity) for a
    /// blank name or zero capacity.
    pub async fn register_supervisor(
        &self,
        session: &Session,
        display_name: &str,
        capacity: Option<u32>,
    ) -> WorkflowResult<Actor> {
        let identity = self.lifecycle.identity();
        let actor = identity.resolve(session).await?;
        actor
            .require(Capability::AssignSupervisor)
            .map_err(denied)?;
        let capacity_or_default =
            capacity.unwrap_or(self.lifecycle.config().default_supervisor_capacity);
        let supervisor = Actor::supervisor(
            display_name,
            capacity_or_default,
            self.lifecycle.clock().as_ref(),
        )?;
        identity.register_actor(&supervisor).await?;
        info!(
            supervisor_id = %supervisor.id(),
            actor_id = %actor.id(),
            capacity = capacity_or_default,
            "registered supervisor"
        );
        Ok(supervisor)
    }
}
