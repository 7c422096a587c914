//! In-memory notification inbox.

use async_trait::async_trait;
use mockable::Clock;
use std::sync::{Arc, RwLock};

use crate::identity::domain::ActorId;
use crate::notification::{
    domain::{Notification, NotificationId},
    ports::{DispatchError, DispatchResult, NotificationDispatcher},
};

/// Thread-safe inbox that stores every dispatched notification.
///
/// Besides acting as a dispatcher it offers the read-side operations a
/// notification screen needs. Every operation is scoped to one recipient.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationInbox {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

fn poisoned(err: impl ToString) -> DispatchError {
    DispatchError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryNotificationInbox {
    /// Creates an empty inbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a recipient's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Transport`] when the inbox lock is poisoned.
    pub fn list_for(&self, recipient: ActorId) -> DispatchResult<Vec<Notification>> {
        let notifications = self.notifications.read().map_err(poisoned)?;
        Ok(notifications
            .iter()
            .rev()
            .filter(|notification| notification.recipient() == recipient)
            .cloned()
            .collect())
    }

    /// Returns how many of a recipient's notifications are unread.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Transport`] when the inbox lock is poisoned.
    pub fn unread_count(&self, recipient: ActorId) -> DispatchResult<usize> {
        let notifications = self.notifications.read().map_err(poisoned)?;
        Ok(notifications
            .iter()
            .filter(|notification| notification.recipient() == recipient)
            .filter(|notification| notification.is_unread())
            .count())
    }

    /// Marks one notification read.
    ///
    /// Returns `false` when the recipient has no such unread notification.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Transport`] when the inbox lock is poisoned.
    pub fn mark_read(
        &self,
        recipient: ActorId,
        id: NotificationId,
        clock: &impl Clock,
    ) -> DispatchResult<bool> {
        let mut notifications = self.notifications.write().map_err(poisoned)?;
        Ok(notifications
            .iter_mut()
            .find(|notification| notification.id() == id && notification.recipient() == recipient)
            .is_some_and(|notification| notification.mark_read(clock)))
    }

    /// Marks every notification of a recipient read.
    ///
    /// Returns the number of notifications that changed.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Transport`] when the inbox lock is poisoned.
    pub fn mark_all_read(&self, recipient: ActorId, clock: &impl Clock) -> DispatchResult<usize> {
        let mut notifications = self.notifications.write().map_err(poisoned)?;
        Ok(notifications
            .iter_mut()
            .filter(|notification| notification.recipient() == recipient)
            .map(|notification| notification.mark_read(clock))
            .filter(|changed| *changed)
            .count())
    }

    /// Deletes one notification.
    ///
    /// Returns `false` when the recipient has no such notification.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Transport`] when the inbox lock is poisoned.
    pub fn delete(&self, recipient: ActorId, id: NotificationId) -> DispatchResult<bool> {
        let mut notifications = self.notifications.write().map_err(poisoned)?;
        let before = notifications.len();
        notifications.retain(|notification| {
            notification.id() != id || notification.recipient() != recipient
        });
        Ok(notifications.len() != before)
    }
}

#[async_trait]
impl NotificationDispatcher for InMemoryNotificationInbox {
    async fn dispatch(&self, notification: &Notification) -> DispatchResult<()> {
        let mut notifications = self.notifications.write().map_err(poisoned)?;
        notifications.push(notification.clone());
        Ok(())
    }
}
