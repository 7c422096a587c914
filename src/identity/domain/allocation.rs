//! Student-to-supervisor pairing.

use super::{Actor, IdentityDomainError, Role};
use crate::revision::Revision;
use mockable::Clock;

/// A validated pairing ready to be written atomically to the directory.
///
/// Holds both updated actor records together with the revisions they were
/// loaded at, so the directory can reject the write if either record moved
/// underneath the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    student: Actor,
    supervisor: Actor,
    student_revision: Revision,
    supervisor_revision: Revision,
}

impl Allocation {
    /// Pairs an unassigned student with a supervisor that has a free slot.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::NotAStudent`],
    /// [`IdentityDomainError::NotASupervisor`],
    /// [`IdentityDomainError::AlreadyAllocated`] or
    /// [`IdentityDomainError::CapacityExceeded`]. Both input records are
    /// consumed; nothing is persisted on error.
    pub fn pair(
        mut student: Actor,
        mut supervisor: Actor,
        clock: &impl Clock,
    ) -> Result<Self, IdentityDomainError> {
        let student_revision = student.revision();
        let supervisor_revision = supervisor.revision();
        if student.role() != Role::Student {
            return Err(IdentityDomainError::NotAStudent(student.id()));
        }
        if supervisor.load().is_none() {
            return Err(IdentityDomainError::NotASupervisor(supervisor.id()));
        }
        if let Some(current) = student.supervisor_id() {
            return Err(IdentityDomainError::AlreadyAllocated {
                student_id: student.id(),
                supervisor_id: current,
            });
        }
        supervisor.reserve_slot(clock)?;
        student.attach_supervisor(supervisor.id(), clock)?;
        Ok(Self {
            student,
            supervisor,
            student_revision,
            supervisor_revision,
        })
    }

    /// Returns the updated student record.
    #[must_use]
    pub const fn student(&self) -> &Actor {
        &self.student
    }

    /// Returns the updated supervisor record.
    #[must_use]
    pub const fn supervisor(&self) -> &Actor {
        &self.supervisor
    }

    /// Returns the revision the student record was loaded at.
    #[must_use]
    pub const fn student_revision(&self) -> Revision {
        self.student_revision
    }

    /// Returns the revision the supervisor record was loaded at.
    #[must_use]
    pub const fn supervisor_revision(&self) -> Revision {
        self.supervisor_revision
    }

    /// Consumes the pairing and returns `(student, supervisor)`.
    #[must_use]
    pub fn into_parts(self) -> (Actor, Actor) {
        (self.student, self.supervisor)
    }
}
