//! Best-effort fan-out of workflow events.

use crate::identity::domain::ActorId;
use crate::notification::{
    domain::{Notification, WorkflowEvent},
    ports::NotificationDispatcher,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, warn};

/// Turns workflow events into per-recipient notifications.
pub struct NotificationPublisher<N, C>
where
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    dispatcher: Arc<N>,
    clock: Arc<C>,
}

// Clones share the same adapters; no `Clone` bound on the parameters.
impl<N, C> Clone for NotificationPublisher<N, C>
where
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<N, C> NotificationPublisher<N, C>
where
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    /// Creates a publisher over the given dispatcher.
    #[must_use]
    pub const fn new(dispatcher: Arc<N>, clock: Arc<C>) -> Self {
        Self { dispatcher, clock }
    }

    /// Returns the underlying dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &Arc<N> {
        &self.dispatcher
    }

    /// Dispatches `event` once to each distinct recipient.
    ///
    /// Failures are logged and skipped; the remaining recipients are still
    /// notified.
    pub async fn publish(
        &self,
        event: &WorkflowEvent,
        recipients: impl IntoIterator<Item = ActorId> + Send,
    ) {
        let mut distinct: Vec<ActorId> = Vec::new();
        for recipient in recipients {
            if !distinct.contains(&recipient) {
                distinct.push(recipient);
            }
        }
        let mut delivered: usize = 0;
        for recipient in distinct {
            let notification = Notification::new(recipient, event.clone(), &*self.clock);
            match self.dispatcher.dispatch(&notification).await {
                Ok(()) => delivered += 1,
                Err(err) => warn!(
                    event = event.name(),
                    %recipient,
                    error = %err,
                    "notification dispatch failed"
                ),
            }
        }
        debug!(event = event.name(), delivered, "published workflow event");
    }
}
