//! Error types for channel message validation.

use thiserror::Error;

/// Errors returned while composing channel messages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChatDomainError {
    /// The message text is empty after trimming.
    #[error("message text must not be empty")]
    EmptyMessage,
}
