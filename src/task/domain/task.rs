//! Task aggregate root.

use super::{PhaseNumber, TaskDomainError, TaskId, TaskStatus};
use crate::identity::domain::ActorId;
use crate::project::domain::ProjectId;
use crate::revision::Revision;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A numbered phase issued against a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    phase: PhaseNumber,
    title: String,
    description: String,
    due_date: DateTime<Utc>,
    assigned_to: ActorId,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    revision: Revision,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted phase number.
    pub phase: PhaseNumber,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted due date.
    pub due_date: DateTime<Utc>,
    /// Student the phase was issued to.
    pub assigned_to: ActorId,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted revision.
    pub revision: Revision,
}

impl Task {
    /// Issues a pending phase.
    ///
    /// The title is derived from `phase`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyDescription`] when the description is
    /// blank.
    pub fn issue(
        project_id: ProjectId,
        phase: PhaseNumber,
        description: impl Into<String>,
        due_date: DateTime<Utc>,
        assigned_to: ActorId,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let raw = description.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyDescription);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            project_id,
            phase,
            title: phase.title(),
            description: trimmed.to_owned(),
            due_date,
            assigned_to,
            status: TaskStatus::Pending,
            created_at: timestamp,
            updated_at: timestamp,
            revision: Revision::INITIAL,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            phase: data.phase,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            assigned_to: data.assigned_to,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
            revision: data.revision,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the phase number.
    #[must_use]
    pub const fn phase(&self) -> PhaseNumber {
        self.phase
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the student the phase was issued to.
    #[must_use]
    pub const fn assigned_to(&self) -> ActorId {
        self.assigned_to
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
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

    /// Returns the revision this task was loaded at.
    #[must_use]
    pub const fn revision(&self) -> Revision {
        self.revision
    }

    /// Marks the phase as submitted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] unless the task is
    /// pending. Submitting twice is an error.
    pub fn submit(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.transition_to(TaskStatus::Submitted, clock)
    }

    /// Marks the phase as approved.
    ///
    /// Returns `false` without touching the task when it is already
    /// approved.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the task has not
    /// been submitted.
    pub fn approve(&mut self, clock: &impl Clock) -> Result<bool, TaskDomainError> {
        if self.status.is_terminal() {
            return Ok(false);
        }
        self.transition_to(TaskStatus::Approved, clock)?;
        Ok(true)
    }

    /// Hands an unapproved phase over to a new assignee.
    ///
    /// Returns `false` when the phase is approved or already assigned to
    /// `assignee`.
    pub fn hand_over(&mut self, assignee: ActorId, clock: &impl Clock) -> bool {
        if self.status.is_terminal() || self.assigned_to == assignee {
            return false;
        }
        self.assigned_to = assignee;
        self.touch(clock);
        true
    }

    fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.revision = self.revision.next();
    }
}
