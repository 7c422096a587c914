//! Domain model for projects.
//!
//! The aggregate enforces the single-head invariant, the non-empty group
//! invariant, and the configured status pipeline policy. Authorization of
//! the acting user is checked against the aggregate's supervisor here too,
//! so services cannot forget the ownership rule.

mod details;
mod error;
mod ids;
mod kind;
mod policy;
mod project;
mod status;

pub use details::ProjectDetails;
pub use error::{ParsePolicyError, ParseProjectStatusError, ProjectDomainError};
pub use ids::ProjectId;
pub use kind::{MemberRemoval, ProjectKind, ProjectType};
pub use policy::{HeadRemovalPolicy, StatusTransitionPolicy};
pub use project::{PersistedProjectData, Project};
pub use status::{ApprovalState, ProjectStatus, ProposalDecision};
