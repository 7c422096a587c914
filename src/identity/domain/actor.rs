//! Actor records and supervisor capacity tracking.

use super::{ActorId, IdentityDomainError, Role};
use crate::revision::Revision;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Role-specific actor state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "kebab-case")]
pub enum ActorProfile {
    /// A student, optionally paired with a supervisor.
    Student {
        /// Supervisor allocated to this student, if any.
        supervisor: Option<ActorId>,
    },
    /// A supervisor with a bounded number of student slots.
    Supervisor {
        /// Maximum number of concurrently supervised students.
        capacity: u32,
        /// Number of students currently supervised.
        current_load: u32,
    },
    /// The super-administrator.
    SuperAdmin,
}

impl ActorProfile {
    /// Returns the role this profile belongs to.
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Student { .. } => Role::Student,
            Self::Supervisor { .. } => Role::Supervisor,
            Self::SuperAdmin => Role::SuperAdmin,
        }
    }
}

/// Directory record for a student, supervisor, or administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    id: ActorId,
    display_name: String,
    profile: ActorProfile,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    revision: Revision,
}

/// Parameter object for reconstructing a persisted actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedActorData {
    /// Persisted actor identifier.
    pub id: ActorId,
    /// Persisted display name.
    pub display_name: String,
    /// Persisted role-specific state.
    pub profile: ActorProfile,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted revision.
    pub revision: Revision,
}

impl Actor {
    /// Creates an unallocated student.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyDisplayName`] when the name is
    /// blank.
    pub fn student(
        display_name: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, IdentityDomainError> {
        Self::new(display_name, ActorProfile::Student { supervisor: None }, clock)
    }

    /// Creates a supervisor with no students.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyDisplayName`] when the name is
    /// blank or [`IdentityDomainError::InvalidCapacity`] when `capacity` is
    /// zero.
    pub fn supervisor(
        display_name: impl Into<String>,
        capacity: u32,
        clock: &impl Clock,
    ) -> Result<Self, IdentityDomainError> {
        if capacity == 0 {
            return Err(IdentityDomainError::InvalidCapacity(capacity));
        }
        Self::new(
            display_name,
            ActorProfile::Supervisor {
                capacity,
                current_load: 0,
            },
            clock,
        )
    }

    /// Creates a super-administrator.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyDisplayName`] when the name is
    /// blank.
    pub fn super_admin(
        display_name: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, IdentityDomainError> {
        Self::new(display_name, ActorProfile::SuperAdmin, clock)
    }

    fn new(
        display_name: impl Into<String>,
        profile: ActorProfile,
        clock: &impl Clock,
    ) -> Result<Self, IdentityDomainError> {
        let raw = display_name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentityDomainError::EmptyDisplayName);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: ActorId::new(),
            display_name: trimmed.to_owned(),
            profile,
            created_at: timestamp,
            updated_at: timestamp,
            revision: Revision::INITIAL,
        })
    }

    /// Reconstructs an actor from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedActorData) -> Self {
        Self {
            id: data.id,
            display_name: data.display_name,
            profile: data.profile,
            created_at: data.created_at,
            updated_at: data.updated_at,
            revision: data.revision,
        }
    }

    /// Returns the actor identifier.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the role-specific state.
    #[must_use]
    pub const fn profile(&self) -> &ActorProfile {
        &self.profile
    }

    /// Returns the actor role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.profile.role()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the revision this record was loaded at.
    #[must_use]
    pub const fn revision(&self) -> Revision {
        self.revision
    }

    /// Returns the allocated supervisor when this actor is a student.
    #[must_use]
    pub const fn supervisor_id(&self) -> Option<ActorId> {
        match self.profile {
            ActorProfile::Student { supervisor } => supervisor,
            ActorProfile::Supervisor { .. } | ActorProfile::SuperAdmin => None,
        }
    }

    /// Returns whether this actor is a student without a supervisor.
    #[must_use]
    pub const fn is_unassigned_student(&self) -> bool {
        matches!(self.profile, ActorProfile::Student { supervisor: None })
    }

    /// Returns `(capacity, current_load)` when this actor is a supervisor.
    #[must_use]
    pub const fn load(&self) -> Option<(u32, u32)> {
        match self.profile {
            ActorProfile::Supervisor {
                capacity,
                current_load,
            } => Some((capacity, current_load)),
            ActorProfile::Student { .. } | ActorProfile::SuperAdmin => None,
        }
    }

    /// Pairs this student with a supervisor.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::NotAStudent`] for non-students or
    /// [`IdentityDomainError::AlreadyAllocated`] when a supervisor is already
    /// set.
    pub(super) fn attach_supervisor(
        &mut self,
        supervisor_id: ActorId,
        clock: &impl Clock,
    ) -> Result<(), IdentityDomainError> {
        let ActorProfile::Student { supervisor } = &mut self.profile else {
            return Err(IdentityDomainError::NotAStudent(self.id));
        };
        if let Some(current) = *supervisor {
            return Err(IdentityDomainError::AlreadyAllocated {
                student_id: self.id,
                supervisor_id: current,
            });
        }
        *supervisor = Some(supervisor_id);
        self.touch(clock);
        Ok(())
    }

    /// Claims one supervision slot.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::NotASupervisor`] for non-supervisors or
    /// [`IdentityDomainError::CapacityExceeded`] when the load has reached
    /// capacity; the load is left unchanged in that case.
    pub(super) fn reserve_slot(&mut self, clock: &impl Clock) -> Result<(), IdentityDomainError> {
        let ActorProfile::Supervisor {
            capacity,
            current_load,
        } = &mut self.profile
        else {
            return Err(IdentityDomainError::NotASupervisor(self.id));
        };
        if *current_load >= *capacity {
            return Err(IdentityDomainError::CapacityExceeded {
                supervisor_id: self.id,
                capacity: *capacity,
                current_load: *current_load,
            });
        }
        *current_load += 1;
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.revision = self.revision.next();
    }
}
