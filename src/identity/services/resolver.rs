//! Session-to-capability resolution backed by the actor directory.

use crate::error::{EntityRef, WorkflowError, WorkflowResult};
use crate::identity::{
    domain::{Actor, ActorId, IdentityDomainError, ResolvedActor, Role, Session},
    ports::ActorDirectory,
};
use std::sync::Arc;
use tracing::debug;

/// Resolves sessions into capability-bearing actors.
pub struct IdentityResolver<D>
where
    D: ActorDirectory,
{
    directory: Arc<D>,
}

// Clones share the same adapters; no `Clone` bound on the parameters.
impl<D> Clone for IdentityResolver<D>
where
    D: ActorDirectory,
{
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
        }
    }
}

impl<D> IdentityResolver<D>
where
    D: ActorDirectory,
{
    /// Creates a resolver over the given directory.
    #[must_use]
    pub const fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// Returns the underlying directory.
    #[must_use]
    pub const fn directory(&self) -> &Arc<D> {
        &self.directory
    }

    /// Resolves a session.
    ///
    /// The result carries an empty capability set when the actor is unknown,
    /// the role claim does not parse, or the claim disagrees with the role on
    /// record. Callers then fail with `Unauthorized` at their capability
    /// check.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Directory`] when the directory lookup fails.
    pub async fn resolve(&self, session: &Session) -> WorkflowResult<ResolvedActor> {
        let actor_id = session.actor_id();
        let Some(actor) = self.directory.find_by_id(actor_id).await? else {
            debug!(%actor_id, "session actor is not in the directory");
            return Ok(ResolvedActor::unresolved(actor_id));
        };
        let claimed = Role::try_from(session.role_claim()).ok();
        if claimed != Some(actor.role()) {
            debug!(
                %actor_id,
                claim = session.role_claim(),
                role = %actor.role(),
                "session role claim does not match the directory"
            );
            return Ok(ResolvedActor::unresolved(actor_id));
        }
        Ok(ResolvedActor::new(actor_id, Some(actor.role())))
    }

    /// Registers an actor in the directory.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Directory`] when the identifier already
    /// exists or persistence fails.
    pub async fn register_actor(&self, actor: &Actor) -> WorkflowResult<()> {
        self.directory.register(actor).await?;
        debug!(actor_id = %actor.id(), role = %actor.role(), "registered actor");
        Ok(())
    }

    /// Loads an actor, failing when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] for unknown actors or
    /// [`WorkflowError::Directory`] when lookup fails.
    pub async fn find_actor_or_error(&self, id: ActorId) -> WorkflowResult<Actor> {
        self.directory
            .find_by_id(id)
            .await?
            .ok_or(WorkflowError::NotFound(EntityRef::Actor(id)))
    }

    /// Loads an actor and checks it is a student.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::NotFound`] for unknown actors,
    /// [`WorkflowError::Identity`] when the actor is not a student, or
    /// [`WorkflowError::Directory`] when lookup fails.
    pub async fn find_student(&self, id: ActorId) -> WorkflowResult<Actor> {
        let actor = self.find_actor_or_error(id).await?;
        if actor.role() != Role::Student {
            return Err(IdentityDomainError::NotAStudent(id).into());
        }
        Ok(actor)
    }
}
