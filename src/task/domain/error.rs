//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing or transitioning tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The phase description is empty after trimming.
    #[error("phase description must not be empty")]
    EmptyDescription,

    /// Phase numbers start at one.
    #[error("invalid phase number {0}, expected a positive integer")]
    InvalidPhaseNumber(u32),

    /// The requested status change is not a forward step.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// Task identifier.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },
}

impl TaskDomainError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyDescription | Self::InvalidPhaseNumber(_) => ErrorKind::Validation,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
        }
    }
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
