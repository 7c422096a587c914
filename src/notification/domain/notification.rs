//! Per-recipient notification records.

use super::{NotificationId, WorkflowEvent};
use crate::identity::domain::ActorId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// One event addressed to one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: NotificationId,
    recipient: ActorId,
    event: WorkflowEvent,
    created_at: DateTime<Utc>,
    read_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Creates an unread notification.
    #[must_use]
    pub fn new(recipient: ActorId, event: WorkflowEvent, clock: &impl Clock) -> Self {
        Self {
            id: NotificationId::new(),
            recipient,
            event,
            created_at: clock.utc(),
            read_at: None,
        }
    }

    /// Returns the notification identifier.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the recipient.
    #[must_use]
    pub const fn recipient(&self) -> ActorId {
        self.recipient
    }

    /// Returns the event.
    #[must_use]
    pub const fn event(&self) -> &WorkflowEvent {
        &self.event
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the recipient read the notification.
    #[must_use]
    pub const fn read_at(&self) -> Option<DateTime<Utc>> {
        self.read_at
    }

    /// Returns whether the notification is unread.
    #[must_use]
    pub const fn is_unread(&self) -> bool {
        self.read_at.is_none()
    }

    /// Marks the notification read.
    ///
    /// Returns `false` when it was already read.
    pub fn mark_read(&mut self, clock: &impl Clock) -> bool {
        if self.read_at.is_some() {
            return false;
        }
        self.read_at = Some(clock.utc());
        true
    }
}
