//! Individual and group project membership.

use super::ProjectDomainError;
use crate::identity::domain::ActorId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Project type as chosen at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectType {
    /// One student.
    Individual,
    /// Several students led by a project head.
    Group,
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Individual => "Individual",
            Self::Group => "Group",
        })
    }
}

/// Membership of a project.
///
/// Deserialized groups are checked for unique members and a head that is
/// one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "snake_case",
    try_from = "UncheckedProjectKind"
)]
pub enum ProjectKind {
    /// A single-student project.
    Individual {
        /// The student doing the work, if assigned.
        assigned_student: Option<ActorId>,
    },
    /// A group project.
    Group {
        /// Unique members in the order they joined.
        members: Vec<ActorId>,
        /// The member who submits and speaks for the group.
        head: Option<ActorId>,
    },
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum UncheckedProjectKind {
    Individual {
        assigned_student: Option<ActorId>,
    },
    Group {
        members: Vec<ActorId>,
        head: Option<ActorId>,
    },
}

impl TryFrom<UncheckedProjectKind> for ProjectKind {
    type Error = ProjectDomainError;

    fn try_from(raw: UncheckedProjectKind) -> Result<Self, Self::Error> {
        let kind = match raw {
            UncheckedProjectKind::Individual { assigned_student } => {
                Self::Individual { assigned_student }
            }
            UncheckedProjectKind::Group { members, head } => Self::Group { members, head },
        };
        kind.validate()?;
        Ok(kind)
    }
}

/// Outcome of removing a group member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRemoval {
    /// An ordinary member was removed.
    Removed,
    /// The project head was removed and the head is now unset.
    RemovedHead,
}

impl ProjectKind {
    /// Creates an individual project kind.
    #[must_use]
    pub const fn individual(student: ActorId) -> Self {
        Self::Individual {
            assigned_student: Some(student),
        }
    }

    /// Creates a group kind without a head.
    ///
    /// Duplicate identifiers are dropped, keeping first occurrences.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyMemberSet`] when no member is
    /// given.
    pub fn group(members: impl IntoIterator<Item = ActorId>) -> Result<Self, ProjectDomainError> {
        let mut unique: Vec<ActorId> = Vec::new();
        for member in members {
            if !unique.contains(&member) {
                unique.push(member);
            }
        }
        if unique.is_empty() {
            return Err(ProjectDomainError::EmptyMemberSet);
        }
        Ok(Self::Group {
            members: unique,
            head: None,
        })
    }

    /// Checks the group invariants: at least one member, no duplicates, and
    /// a head drawn from the members.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyMemberSet`],
    /// [`ProjectDomainError::DuplicateMember`], or
    /// [`ProjectDomainError::HeadOutsideGroup`].
    pub fn validate(&self) -> Result<(), ProjectDomainError> {
        let Self::Group { members, head } = self else {
            return Ok(());
        };
        if members.is_empty() {
            return Err(ProjectDomainError::EmptyMemberSet);
        }
        for (position, member) in members.iter().enumerate() {
            if members.iter().skip(position + 1).any(|other| other == member) {
                return Err(ProjectDomainError::DuplicateMember(*member));
            }
        }
        match head {
            Some(head_id) if !members.contains(head_id) => {
                Err(ProjectDomainError::HeadOutsideGroup(*head_id))
            }
            _ => Ok(()),
        }
    }

    /// Returns the project type.
    #[must_use]
    pub const fn project_type(&self) -> ProjectType {
        match self {
            Self::Individual { .. } => ProjectType::Individual,
            Self::Group { .. } => ProjectType::Group,
        }
    }

    /// Returns the actor responsible for phase deliverables: the assigned
    /// student, or the head of a group.
    #[must_use]
    pub const fn responsible_student(&self) -> Option<ActorId> {
        match self {
            Self::Individual { assigned_student } => *assigned_student,
            Self::Group { head, .. } => *head,
        }
    }

    /// Returns the assigned student of an individual project.
    #[must_use]
    pub const fn assigned_student(&self) -> Option<ActorId> {
        match self {
            Self::Individual { assigned_student } => *assigned_student,
            Self::Group { .. } => None,
        }
    }

    /// Returns the head of a group project.
    #[must_use]
    pub const fn head(&self) -> Option<ActorId> {
        match self {
            Self::Individual { .. } => None,
            Self::Group { head, .. } => *head,
        }
    }

    /// Returns group members, or an empty slice for individual projects.
    #[must_use]
    pub fn members(&self) -> &[ActorId] {
        match self {
            Self::Individual { .. } => &[],
            Self::Group { members, .. } => members,
        }
    }

    /// Returns every student attached to the project.
    #[must_use]
    pub fn students(&self) -> Vec<ActorId> {
        match self {
            Self::Individual { assigned_student } => assigned_student.iter().copied().collect(),
            Self::Group { members, .. } => members.clone(),
        }
    }

    /// Returns whether the student is attached to the project.
    #[must_use]
    pub fn includes_student(&self, actor_id: ActorId) -> bool {
        match self {
            Self::Individual { assigned_student } => *assigned_student == Some(actor_id),
            Self::Group { members, .. } => members.contains(&actor_id),
        }
    }
}
