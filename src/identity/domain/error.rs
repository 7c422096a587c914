//! Error types for identity validation, allocation, and authorization.

use super::{ActorId, Capability};
use crate::error::ErrorKind;
use thiserror::Error;

/// Errors returned while constructing or mutating actor records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The display name is empty after trimming.
    #[error("actor display name must not be empty")]
    EmptyDisplayName,

    /// Supervisor capacity must allow at least one student.
    #[error("supervisor capacity must be positive, got {0}")]
    InvalidCapacity(u32),

    /// The actor was expected to be a student.
    #[error("actor {0} is not a student")]
    NotAStudent(ActorId),

    /// The actor was expected to be a supervisor.
    #[error("actor {0} is not a supervisor")]
    NotASupervisor(ActorId),

    /// The supervisor has no free slot left.
    #[error("supervisor {supervisor_id} is at capacity ({current_load}/{capacity})")]
    CapacityExceeded {
        /// Supervisor identifier.
        supervisor_id: ActorId,
        /// Maximum concurrently supervised students.
        capacity: u32,
        /// Students currently supervised.
        current_load: u32,
    },

    /// The student is already paired with a different supervisor.
    #[error("student {student_id} is already supervised by {supervisor_id}")]
    AlreadyAllocated {
        /// Student identifier.
        student_id: ActorId,
        /// Supervisor currently paired with the student.
        supervisor_id: ActorId,
    },
}

impl IdentityDomainError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyDisplayName
            | Self::InvalidCapacity(_)
            | Self::NotAStudent(_)
            | Self::NotASupervisor(_) => ErrorKind::Validation,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::AlreadyAllocated { .. } => ErrorKind::InvalidTransition,
        }
    }
}

/// Raised when an actor attempts an operation it may not perform.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The actor's role does not grant the capability.
    #[error("actor {actor_id} lacks the {capability} capability")]
    MissingCapability {
        /// Acting actor.
        actor_id: ActorId,
        /// Capability the operation requires.
        capability: Capability,
    },

    /// The actor holds the capability but not over the targeted resource.
    #[error("actor {actor_id} may not {capability} outside their own projects and phases")]
    OutsideScope {
        /// Acting actor.
        actor_id: ActorId,
        /// Capability the operation requires.
        capability: Capability,
    },
}

impl AuthorizationError {
    /// Returns the actor that was rejected.
    #[must_use]
    pub const fn actor_id(&self) -> ActorId {
        match self {
            Self::MissingCapability { actor_id, .. } | Self::OutsideScope { actor_id, .. } => {
                *actor_id
            }
        }
    }

    /// Returns the capability the rejected operation required.
    #[must_use]
    pub const fn capability(&self) -> Capability {
        match self {
            Self::MissingCapability { capability, .. } | Self::OutsideScope { capability, .. } => {
                *capability
            }
        }
    }
}

/// Error returned while parsing role claims.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
