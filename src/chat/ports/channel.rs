//! Messaging transport port.

use crate::chat::domain::ChannelMessage;
use crate::project::domain::ProjectId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for channel operations.
pub type ChatChannelResult<T> = Result<T, ChatChannelError>;

/// Carries messages on per-project channels.
#[async_trait]
pub trait ChatChannel: Send + Sync {
    /// Sends a message on its project's channel.
    ///
    /// # Errors
    ///
    /// Returns [`ChatChannelError`] when the transport fails.
    async fn send(&self, message: &ChannelMessage) -> ChatChannelResult<()>;

    /// Returns a project's messages, oldest first.
    async fn history(&self, project_id: ProjectId) -> ChatChannelResult<Vec<ChannelMessage>>;
}

/// Errors returned by channel implementations.
#[derive(Debug, Clone, Error)]
pub enum ChatChannelError {
    /// Transport-layer failure.
    #[error("channel transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl ChatChannelError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
