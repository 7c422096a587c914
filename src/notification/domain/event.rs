//! Events describing committed workflow transitions.

use crate::identity::domain::ActorId;
use crate::project::domain::{ProjectId, ProjectStatus, ProposalDecision};
use crate::task::domain::{PhaseNumber, TaskId};
use serde::{Deserialize, Serialize};

/// A committed workflow transition worth telling someone about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WorkflowEvent {
    /// A project was created or proposed.
    ProjectCreated {
        /// Project identifier.
        project_id: ProjectId,
        /// Actor who created it.
        created_by: ActorId,
    },
    /// A project moved along the status pipeline.
    ProjectStatusChanged {
        /// Project identifier.
        project_id: ProjectId,
        /// Previous stage.
        from: ProjectStatus,
        /// New stage.
        to: ProjectStatus,
    },
    /// A student proposal was approved or rejected.
    ProposalReviewed {
        /// Project identifier.
        project_id: ProjectId,
        /// The decision taken.
        decision: ProposalDecision,
    },
    /// A student was paired with a supervisor.
    SupervisorAssigned {
        /// Student identifier.
        student_id: ActorId,
        /// Supervisor identifier.
        supervisor_id: ActorId,
    },
    /// An individual project became a group project.
    GroupFormed {
        /// Project identifier.
        project_id: ProjectId,
    },
    /// A student joined a group.
    MemberAdded {
        /// Project identifier.
        project_id: ProjectId,
        /// New member.
        member_id: ActorId,
    },
    /// A student left a group.
    MemberRemoved {
        /// Project identifier.
        project_id: ProjectId,
        /// Removed member.
        member_id: ActorId,
        /// Whether the removed member was the head.
        was_head: bool,
    },
    /// A member became the project head.
    HeadPromoted {
        /// Project identifier.
        project_id: ProjectId,
        /// New head.
        head_id: ActorId,
        /// Demoted head, if there was one.
        previous: Option<ActorId>,
    },
    /// A phase was issued.
    TaskCreated {
        /// Project identifier.
        project_id: ProjectId,
        /// Task identifier.
        task_id: TaskId,
        /// Phase number.
        phase: PhaseNumber,
    },
    /// A phase was submitted.
    TaskSubmitted {
        /// Project identifier.
        project_id: ProjectId,
        /// Task identifier.
        task_id: TaskId,
    },
    /// A phase was approved.
    TaskApproved {
        /// Project identifier.
        project_id: ProjectId,
        /// Task identifier.
        task_id: TaskId,
    },
}

impl WorkflowEvent {
    /// Returns a short machine-readable event name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ProjectCreated { .. } => "project_created",
            Self::ProjectStatusChanged { .. } => "project_status_changed",
            Self::ProposalReviewed { .. } => "proposal_reviewed",
            Self::SupervisorAssigned { .. } => "supervisor_assigned",
            Self::GroupFormed { .. } => "group_formed",
            Self::MemberAdded { .. } => "member_added",
            Self::MemberRemoved { .. } => "member_removed",
            Self::HeadPromoted { .. } => "head_promoted",
            Self::TaskCreated { .. } => "task_created",
            Self::TaskSubmitted { .. } => "task_submitted",
            Self::TaskApproved { .. } => "task_approved",
        }
    }

    /// Returns the project the event concerns, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        match self {
            Self::ProjectCreated { project_id, .. }
            | Self::ProjectStatusChanged { project_id, .. }
            | Self::ProposalReviewed { project_id, .. }
            | Self::GroupFormed { project_id }
            | Self::MemberAdded { project_id, .. }
            | Self::MemberRemoved { project_id, .. }
            | Self::HeadPromoted { project_id, .. }
            | Self::TaskCreated { project_id, .. }
            | Self::TaskSubmitted { project_id, .. }
            | Self::TaskApproved { project_id, .. } => Some(*project_id),
            Self::SupervisorAssigned { .. } => None,
        }
    }
}
