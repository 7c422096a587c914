//! In-memory chat channel with a live feed.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tracing::trace;

use crate::chat::{
    domain::ChannelMessage,
    ports::{ChatChannel, ChatChannelError, ChatChannelResult},
};
use crate::project::domain::ProjectId;

/// Number of messages a lagging subscriber may fall behind by.
const FEED_CAPACITY: usize = 256;

/// Thread-safe in-memory channel store.
///
/// Every sent message is kept per project and also broadcast to
/// subscribers of the live feed.
#[derive(Debug, Clone)]
pub struct InMemoryChatChannel {
    messages: Arc<RwLock<HashMap<ProjectId, Vec<ChannelMessage>>>>,
    feed: broadcast::Sender<ChannelMessage>,
}

impl Default for InMemoryChatChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryChatChannel {
    /// Creates an empty channel store.
    #[must_use]
    pub fn new() -> Self {
        let (feed, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            messages: Arc::default(),
            feed,
        }
    }

    /// Subscribes to messages sent from now on, across all projects.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChannelMessage> {
        self.feed.subscribe()
    }
}

fn poisoned(err: impl ToString) -> ChatChannelError {
    ChatChannelError::transport(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ChatChannel for InMemoryChatChannel {
    async fn send(&self, message: &ChannelMessage) -> ChatChannelResult<()> {
        {
            let mut messages = self.messages.write().map_err(poisoned)?;
            messages
                .entry(message.project_id())
                .or_default()
                .push(message.clone());
        }
        if self.feed.send(message.clone()).is_err() {
            trace!(message_id = %message.id(), "no live subscribers");
        }
        Ok(())
    }

    async fn history(&self, project_id: ProjectId) -> ChatChannelResult<Vec<ChannelMessage>> {
        let messages = self.messages.read().map_err(poisoned)?;
        Ok(messages.get(&project_id).cloned().unwrap_or_default())
    }
}
