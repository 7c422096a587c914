//! Notification dispatch port.

use crate::notification::domain::Notification;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Delivers notifications to their recipients.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Delivers one notification.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when delivery fails. Callers treat this as
    /// non-fatal.
    async fn dispatch(&self, notification: &Notification) -> DispatchResult<()>;
}

/// Errors returned by dispatcher implementations.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// The recipient cannot receive notifications.
    #[error("recipient rejected notification: {0}")]
    Rejected(String),

    /// Transport-layer failure.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl DispatchError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
