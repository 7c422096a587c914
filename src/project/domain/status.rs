//! Project status pipeline and proposal approval state.

use super::ParseProjectStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of the five-stage project pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// Not started.
    Pending,
    /// Proposal being written.
    Proposal,
    /// Implementation under way.
    Implementation,
    /// Testing and evaluation.
    Testing,
    /// Finished.
    Completed,
}

impl ProjectStatus {
    /// All stages in pipeline order.
    pub const PIPELINE: [Self; 5] = [
        Self::Pending,
        Self::Proposal,
        Self::Implementation,
        Self::Testing,
        Self::Completed,
    ];

    /// Returns the stage's position in the pipeline, starting at zero.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Pending => 0,
            Self::Proposal => 1,
            Self::Implementation => 2,
            Self::Testing => 3,
            Self::Completed => 4,
        }
    }

    /// Returns the display representation used by clients.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Proposal => "Proposal",
            Self::Implementation => "Implementation",
            Self::Testing => "Testing",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProjectStatus {
    type Error = ParseProjectStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "proposal" => Ok(Self::Proposal),
            "implementation" => Ok(Self::Implementation),
            "testing" => Ok(Self::Testing),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseProjectStatusError(value.to_owned())),
        }
    }
}

/// Coarse approval state of a project before its pipeline work starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalState {
    /// A student proposal awaiting a supervisor's decision.
    AwaitingApproval,
    /// Approved, or created directly by a supervisor.
    Active,
    /// Turned down by the supervisor.
    Rejected,
}

impl ApprovalState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AwaitingApproval => "awaiting_approval",
            Self::Active => "active",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a proposal review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalDecision {
    /// Accept the proposal; the project becomes active.
    Approve,
    /// Turn the proposal down.
    Reject,
}

impl ProposalDecision {
    /// Returns the approval state the decision leads to.
    #[must_use]
    pub const fn outcome(self) -> ApprovalState {
        match self {
            Self::Approve => ApprovalState::Active,
            Self::Reject => ApprovalState::Rejected,
        }
    }
}

impl fmt::Display for ProposalDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        })
    }
}
