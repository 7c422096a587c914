//! Workflow error taxonomy.
//!
//! Every service returns [`WorkflowError`]. Callers branch on
//! [`WorkflowError::kind`] rather than on individual variants, so a UI can
//! show a capacity message for [`ErrorKind::CapacityExceeded`] and a generic
//! retry prompt for [`ErrorKind::Infrastructure`].

use crate::chat::{domain::ChatDomainError, ports::ChatChannelError};
use crate::identity::{
    domain::{ActorId, AuthorizationError, IdentityDomainError},
    ports::ActorDirectoryError,
};
use crate::project::{
    domain::{ProjectDomainError, ProjectId},
    ports::ProjectRepositoryError,
};
use crate::task::{
    domain::{TaskDomainError, TaskId},
    ports::TaskRepositoryError,
};
use std::fmt;
use thiserror::Error;

/// Result type for workflow service operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Coarse classification of workflow failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The actor's role or relationship does not permit the operation.
    Unauthorized,
    /// A required field is missing or malformed.
    Validation,
    /// A state machine precondition does not hold.
    InvalidTransition,
    /// The supervisor has no free slot.
    CapacityExceeded,
    /// A phase cannot be issued because the project has no assignee.
    MissingAssignment,
    /// A referenced actor, project, or task does not exist.
    NotFound,
    /// The aggregate changed between load and write; the caller may retry.
    Conflict,
    /// A collaborator (storage, transport) failed.
    Infrastructure,
}

/// Reference to an entity that could not be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// An actor record.
    Actor(ActorId),
    /// A project.
    Project(ProjectId),
    /// A task.
    Task(TaskId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actor(id) => write!(f, "actor {id}"),
            Self::Project(id) => write!(f, "project {id}"),
            Self::Task(id) => write!(f, "task {id}"),
        }
    }
}

/// Errors surfaced by workflow services.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Authorization failed.
    #[error(transparent)]
    Unauthorized(#[from] AuthorizationError),
    /// Actor validation or allocation failed.
    #[error(transparent)]
    Identity(#[from] IdentityDomainError),
    /// Project validation or transition failed.
    #[error(transparent)]
    Project(#[from] ProjectDomainError),
    /// Task validation or transition failed.
    #[error(transparent)]
    Task(#[from] TaskDomainError),
    /// Channel message validation failed.
    #[error(transparent)]
    Chat(#[from] ChatDomainError),
    /// The project has no student or head to assign a phase to.
    #[error("project {0} has no assigned student or project head")]
    MissingAssignment(ProjectId),
    /// A referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(EntityRef),
    /// Actor directory operation failed.
    #[error(transparent)]
    Directory(#[from] ActorDirectoryError),
    /// Project repository operation failed.
    #[error(transparent)]
    ProjectRepository(#[from] ProjectRepositoryError),
    /// Task repository operation failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
    /// Chat transport operation failed.
    #[error(transparent)]
    Channel(#[from] ChatChannelError),
}

impl WorkflowError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Identity(err) => err.kind(),
            Self::Project(err) => err.kind(),
            Self::Task(err) => err.kind(),
            Self::Chat(_) => ErrorKind::Validation,
            Self::MissingAssignment(_) => ErrorKind::MissingAssignment,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Directory(err) => match err {
                ActorDirectoryError::NotFound(_) => ErrorKind::NotFound,
                ActorDirectoryError::Conflict { .. } => ErrorKind::Conflict,
                ActorDirectoryError::DuplicateActor(_) | ActorDirectoryError::Persistence(_) => {
                    ErrorKind::Infrastructure
                }
            },
            Self::ProjectRepository(err) => match err {
                ProjectRepositoryError::NotFound(_) => ErrorKind::NotFound,
                ProjectRepositoryError::Conflict { .. } => ErrorKind::Conflict,
                ProjectRepositoryError::DuplicateProject(_)
                | ProjectRepositoryError::Persistence(_) => ErrorKind::Infrastructure,
            },
            Self::TaskRepository(err) => match err {
                TaskRepositoryError::NotFound(_) => ErrorKind::NotFound,
                TaskRepositoryError::Conflict { .. } => ErrorKind::Conflict,
                TaskRepositoryError::DuplicateTask(_) | TaskRepositoryError::Persistence(_) => {
                    ErrorKind::Infrastructure
                }
            },
            Self::Channel(_) => ErrorKind::Infrastructure,
        }
    }
}
