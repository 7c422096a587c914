//! Configurable project policies.

use super::{ParsePolicyError, ProjectStatus};
use serde::{Deserialize, Serialize};

/// Rule applied when a supervisor selects a new pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTransitionPolicy {
    /// Any stage may be selected directly, including earlier ones.
    #[default]
    AnyToAny,
    /// Only later stages may be selected.
    ForwardOnly,
}

impl StatusTransitionPolicy {
    /// Returns whether moving from `from` to a different stage `to` is
    /// allowed.
    #[must_use]
    pub const fn permits(self, from: ProjectStatus, to: ProjectStatus) -> bool {
        match self {
            Self::AnyToAny => true,
            Self::ForwardOnly => to.index() > from.index(),
        }
    }
}

impl TryFrom<&str> for StatusTransitionPolicy {
    type Error = ParsePolicyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "any_to_any" | "any-to-any" | "open" => Ok(Self::AnyToAny),
            "forward_only" | "forward-only" | "forward" => Ok(Self::ForwardOnly),
            _ => Err(ParsePolicyError(value.to_owned())),
        }
    }
}

/// Rule applied when the current project head is removed from a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadRemovalPolicy {
    /// Remove the member and leave the group without a head until someone
    /// is promoted.
    #[default]
    ClearHead,
    /// Refuse the removal until another member has been promoted.
    Block,
}

impl TryFrom<&str> for HeadRemovalPolicy {
    type Error = ParsePolicyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "clear_head" | "clear-head" | "clear" => Ok(Self::ClearHead),
            "block" => Ok(Self::Block),
            _ => Err(ParsePolicyError(value.to_owned())),
        }
    }
}
