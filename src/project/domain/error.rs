//! Error types for project validation and transitions.

use super::{ApprovalState, ProjectId, ProjectStatus, ProposalDecision};
use crate::error::ErrorKind;
use crate::identity::domain::ActorId;
use thiserror::Error;

/// Errors returned while constructing or mutating projects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The title is empty after trimming.
    #[error("project title must not be empty")]
    EmptyTitle,

    /// The description is empty after trimming.
    #[error("project description must not be empty")]
    EmptyDescription,

    /// A supervisor-created individual project names no student.
    #[error("an individual project needs exactly one assigned student")]
    MissingAssignee,

    /// A supervisor-created individual project names several students.
    #[error("an individual project needs exactly one assigned student, got {0}")]
    TooManyAssignees(usize),

    /// A group would have no members.
    #[error("a group project needs at least one member")]
    EmptyMemberSet,

    /// The actor is not a member of the group.
    #[error("actor {actor_id} is not a member of project {project_id}")]
    NotAMember {
        /// Project identifier.
        project_id: ProjectId,
        /// Actor identifier.
        actor_id: ActorId,
    },

    /// A group lists the same member twice.
    #[error("actor {0} is listed twice in the group")]
    DuplicateMember(ActorId),

    /// A group's head is not one of its members.
    #[error("head {0} is not a member of the group")]
    HeadOutsideGroup(ActorId),

    /// Removing the member would leave the group empty.
    #[error("cannot remove the last member of project {0}")]
    LastMember(ProjectId),

    /// A group-only operation targeted an individual project.
    #[error("project {0} is not a group project")]
    NotAGroup(ProjectId),

    /// The project is already a group project.
    #[error("project {0} is already a group project")]
    AlreadyGroup(ProjectId),

    /// The current head cannot be removed before a successor is promoted.
    #[error("actor {actor_id} heads project {project_id}; promote another member first")]
    HeadRemovalBlocked {
        /// Project identifier.
        project_id: ProjectId,
        /// Head identifier.
        actor_id: ActorId,
    },

    /// The configured policy forbids this status move.
    #[error("project {project_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Project identifier.
        project_id: ProjectId,
        /// Current stage.
        from: ProjectStatus,
        /// Requested stage.
        to: ProjectStatus,
    },

    /// The proposal has already been decided differently.
    #[error("project {project_id} proposal is {state}; cannot {decision}")]
    ProposalAlreadyDecided {
        /// Project identifier.
        project_id: ProjectId,
        /// Current approval state.
        state: ApprovalState,
        /// Requested decision.
        decision: ProposalDecision,
    },

    /// The proposal was rejected; no further phases may be issued.
    #[error("project {0} was rejected")]
    ProjectRejected(ProjectId),

    /// The phase counter cannot advance further.
    #[error("project {0} has exhausted its phase numbers")]
    PhaseCounterExhausted(ProjectId),
}

impl ProjectDomainError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyTitle
            | Self::EmptyDescription
            | Self::MissingAssignee
            | Self::TooManyAssignees(_)
            | Self::EmptyMemberSet
            | Self::DuplicateMember(_)
            | Self::HeadOutsideGroup(_)
            | Self::LastMember(_) => ErrorKind::Validation,
            Self::NotAMember { .. } => ErrorKind::NotFound,
            Self::NotAGroup(_)
            | Self::AlreadyGroup(_)
            | Self::HeadRemovalBlocked { .. }
            | Self::InvalidStatusTransition { .. }
            | Self::ProposalAlreadyDecided { .. }
            | Self::ProjectRejected(_)
            | Self::PhaseCounterExhausted(_) => ErrorKind::InvalidTransition,
        }
    }
}

/// Error returned while parsing project statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project status: {0}")]
pub struct ParseProjectStatusError(pub String);

/// Error returned while parsing policy names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown policy: {0}")]
pub struct ParsePolicyError(pub String);
