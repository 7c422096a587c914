//! Gated posting and reading of project channels.

use crate::chat::{
    domain::{ChannelMessage, can_post},
    ports::ChatChannel,
};
use crate::error::{EntityRef, WorkflowError, WorkflowResult};
use crate::identity::{
    domain::{Capability, Session},
    ports::ActorDirectory,
    services::{IdentityResolver, denied},
};
use crate::project::{
    domain::{Project, ProjectId},
    ports::ProjectRepository,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Project channel orchestration service.
pub struct ChatService<P, D, H, C>
where
    P: ProjectRepository,
    D: ActorDirectory,
    H: ChatChannel,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    identity: IdentityResolver<D>,
    channel: Arc<H>,
    clock: Arc<C>,
}

// Clones share the same adapters; no `Clone` bound on the parameters.
impl<P, D, H, C> Clone for ChatService<P, D, H, C>
where
    P: ProjectRepository,
    D: ActorDirectory,
    H: ChatChannel,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            projects: Arc::clone(&self.projects),
            identity: self.identity.clone(),
            channel: Arc::clone(&self.channel),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<P, D, H, C> ChatService<P, D, H, C>
where
    P: ProjectRepository,
    D: ActorDirectory,
    H: ChatChannel,
    C: Clock + Send + Sync,
{
    /// Creates a new chat service.
    #[must_use]
    pub fn new(projects: Arc<P>, directory: Arc<D>, channel: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            projects,
            identity: IdentityResolver::new(directory),
            channel,
            clock,
        }
    }

    /// Posts a message to a project's channel.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`] when the actor may not post
    /// to this channel, [`WorkflowError::Chat`] for blank text, and
    /// [`WorkflowError::Channel`] when the transport fails.
    pub async fn post(
        &self,
        session: &Session,
        project_id: ProjectId,
        text: &str,
    ) -> WorkflowResult<ChannelMessage> {
        let actor = self.identity.resolve(session).await?;
        let project = self.load(project_id).await?;
        if !can_post(&actor, &project) {
            return Err(denied(actor.outside_scope(Capability::PostToChannel)));
        }
        let message = ChannelMessage::compose(project_id, actor.id(), text, &*self.clock)?;
        self.channel.send(&message).await?;
        info!(%project_id, actor_id = %actor.id(), message_id = %message.id(), "posted message");
        Ok(message)
    }

    /// Returns a project's messages, oldest first.
    ///
    /// Every project participant may read, including group members who
    /// cannot post.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Unauthorized`] unless the actor participates
    /// in the project.
    pub async fn history(
        &self,
        session: &Session,
        project_id: ProjectId,
    ) -> WorkflowResult<Vec<ChannelMessage>> {
        let actor = self.identity.resolve(session).await?;
        let project = self.load(project_id).await?;
        project.authorize_viewer(&actor).map_err(denied)?;
        Ok(self.channel.history(project_id).await?)
    }

    async fn load(&self, project_id: ProjectId) -> WorkflowResult<Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or(WorkflowError::NotFound(EntityRef::Project(project_id)))
    }
}
