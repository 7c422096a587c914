//! Role-derived capabilities.

use super::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// An operation an actor may attempt, subject to relationship checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Start a new project.
    CreateProject,
    /// Pick the project type and assignees when creating a project.
    ChooseProjectType,
    /// Move a project along the status pipeline.
    UpdateProjectStatus,
    /// Approve or reject a student proposal.
    ReviewProposal,
    /// Form groups and add or remove members.
    ManageMembers,
    /// Designate a group's project head.
    PromoteHead,
    /// Issue a new phase for a project.
    CreateTask,
    /// Submit work for an assigned phase.
    SubmitTask,
    /// Approve submitted phase work.
    ApproveTask,
    /// Post to a project channel.
    PostToChannel,
    /// Read project details, phases, and channel history.
    ViewProject,
    /// Pair students with supervisors.
    AssignSupervisor,
    /// List students awaiting a supervisor and supervisor loads.
    ViewAllocationPool,
    /// Act as the supervisor of any project.
    ActOnAnyProject,
}

impl Capability {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateProject => "create_project",
            Self::ChooseProjectType => "choose_project_type",
            Self::UpdateProjectStatus => "update_project_status",
            Self::ReviewProposal => "review_proposal",
            Self::ManageMembers => "manage_members",
            Self::PromoteHead => "promote_head",
            Self::CreateTask => "create_task",
            Self::SubmitTask => "submit_task",
            Self::ApproveTask => "approve_task",
            Self::PostToChannel => "post_to_channel",
            Self::ViewProject => "view_project",
            Self::AssignSupervisor => "assign_supervisor",
            Self::ViewAllocationPool => "view_allocation_pool",
            Self::ActOnAnyProject => "act_on_any_project",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const STUDENT: &[Capability] = &[
    Capability::CreateProject,
    Capability::SubmitTask,
    Capability::PostToChannel,
    Capability::ViewProject,
];

const SUPERVISOR: &[Capability] = &[
    Capability::CreateProject,
    Capability::ChooseProjectType,
    Capability::UpdateProjectStatus,
    Capability::ReviewProposal,
    Capability::ManageMembers,
    Capability::PromoteHead,
    Capability::CreateTask,
    Capability::ApproveTask,
    Capability::PostToChannel,
    Capability::ViewProject,
];

const SUPER_ADMIN_EXTRA: &[Capability] = &[
    Capability::AssignSupervisor,
    Capability::ViewAllocationPool,
    Capability::ActOnAnyProject,
];

/// The set of capabilities granted to a resolved actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    /// Returns a set granting nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// Resolves the capabilities of a role.
    ///
    /// An unresolvable role (`None`) yields the empty set.
    #[must_use]
    pub fn for_role(role: Option<Role>) -> Self {
        let granted: Vec<Capability> = match role {
            None => Vec::new(),
            Some(Role::Student) => STUDENT.to_vec(),
            Some(Role::Supervisor) => SUPERVISOR.to_vec(),
            Some(Role::SuperAdmin) => SUPERVISOR
                .iter()
                .chain(SUPER_ADMIN_EXTRA)
                .copied()
                .collect(),
        };
        Self(granted.into_iter().collect())
    }

    /// Returns whether the capability is granted.
    #[must_use]
    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    /// Returns whether no capability is granted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of granted capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over granted capabilities in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }
}
