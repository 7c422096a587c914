//! Project aggregate root.

use super::{
    ApprovalState, HeadRemovalPolicy, MemberRemoval, ProjectDetails, ProjectDomainError, ProjectId,
    ProjectKind, ProjectStatus, ProposalDecision, StatusTransitionPolicy,
};
use crate::identity::domain::{ActorId, AuthorizationError, Capability, ResolvedActor};
use crate::revision::Revision;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    details: ProjectDetails,
    kind: ProjectKind,
    status: ProjectStatus,
    approval: ApprovalState,
    supervisor: Option<ActorId>,
    phases_issued: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    revision: Revision,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted descriptive fields.
    pub details: ProjectDetails,
    /// Persisted membership.
    pub kind: ProjectKind,
    /// Persisted pipeline stage.
    pub status: ProjectStatus,
    /// Persisted approval state.
    pub approval: ApprovalState,
    /// Persisted supervisor, if any.
    pub supervisor: Option<ActorId>,
    /// Number of phases issued so far.
    pub phases_issued: u32,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted revision.
    pub revision: Revision,
}

impl Project {
    /// Creates a student proposal awaiting supervisor approval.
    #[must_use]
    pub fn propose(
        details: ProjectDetails,
        student: ActorId,
        supervisor: Option<ActorId>,
        clock: &impl Clock,
    ) -> Self {
        Self::new(
            details,
            ProjectKind::individual(student),
            supervisor,
            ApprovalState::AwaitingApproval,
            clock,
        )
    }

    /// Creates an already approved project set up by a supervisor or
    /// administrator.
    #[must_use]
    pub fn commission(
        details: ProjectDetails,
        kind: ProjectKind,
        supervisor: Option<ActorId>,
        clock: &impl Clock,
    ) -> Self {
        Self::new(details, kind, supervisor, ApprovalState::Active, clock)
    }

    fn new(
        details: ProjectDetails,
        kind: ProjectKind,
        supervisor: Option<ActorId>,
        approval: ApprovalState,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ProjectId::new(),
            details,
            kind,
            status: ProjectStatus::Pending,
            approval,
            supervisor,
            phases_issued: 0,
            created_at: timestamp,
            updated_at: timestamp,
            revision: Revision::INITIAL,
        }
    }

    /// Reconstructs a project from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns a [`ProjectDomainError`] when the persisted membership breaks
    /// the group invariants.
    pub fn from_persisted(data: PersistedProjectData) -> Result<Self, ProjectDomainError> {
        data.kind.validate()?;
        Ok(Self {
            id: data.id,
            details: data.details,
            kind: data.kind,
            status: data.status,
            approval: data.approval,
            supervisor: data.supervisor,
            phases_issued: data.phases_issued,
            created_at: data.created_at,
            updated_at: data.updated_at,
            revision: data.revision,
        })
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the descriptive fields.
    #[must_use]
    pub const fn details(&self) -> &ProjectDetails {
        &self.details
    }

    /// Returns the membership.
    #[must_use]
    pub const fn kind(&self) -> &ProjectKind {
        &self.kind
    }

    /// Returns the pipeline stage.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the coarse approval state.
    #[must_use]
    pub const fn approval(&self) -> ApprovalState {
        self.approval
    }

    /// Returns the supervisor, if assigned.
    #[must_use]
    pub const fn supervisor(&self) -> Option<ActorId> {
        self.supervisor
    }

    /// Returns how many phases have been issued.
    #[must_use]
    pub const fn phases_issued(&self) -> u32 {
        self.phases_issued
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

    /// Returns the revision this project was loaded at.
    #[must_use]
    pub const fn revision(&self) -> Revision {
        self.revision
    }

    /// Returns whether the actor supervises this project or may act on any
    /// project.
    #[must_use]
    pub fn is_authority(&self, actor: &ResolvedActor) -> bool {
        self.supervisor == Some(actor.id()) || actor.acts_on_any_project()
    }

    /// Returns whether the actor supervises, is assigned to, or is a member
    /// of this project.
    #[must_use]
    pub fn involves(&self, actor_id: ActorId) -> bool {
        self.supervisor == Some(actor_id) || self.kind.includes_student(actor_id)
    }

    /// Returns whether the actor may read the project.
    #[must_use]
    pub fn is_visible_to(&self, actor: &ResolvedActor) -> bool {
        self.is_authority(actor) || self.kind.includes_student(actor.id())
    }

    /// Returns the supervisor followed by every attached student.
    #[must_use]
    pub fn stakeholders(&self) -> Vec<ActorId> {
        self.supervisor
            .into_iter()
            .chain(self.kind.students())
            .collect()
    }

    /// Returns the stakeholders to notify about a change made by `actor_id`.
    #[must_use]
    pub fn audience(&self, actor_id: ActorId) -> Vec<ActorId> {
        self.stakeholders()
            .into_iter()
            .filter(|id| *id != actor_id)
            .collect()
    }

    /// Checks that the actor holds `capability` and is this project's
    /// authority.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError::MissingCapability`] when the role lacks
    /// the capability or [`AuthorizationError::OutsideScope`] when the actor
    /// does not supervise this project.
    pub fn authorize(
        &self,
        actor: &ResolvedActor,
        capability: Capability,
    ) -> Result<(), AuthorizationError> {
        actor.require(capability)?;
        if self.is_authority(actor) {
            return Ok(());
        }
        Err(actor.outside_scope(capability))
    }

    /// Checks that the actor may read this project.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError`] when the actor lacks
    /// [`Capability::ViewProject`] or is not a participant.
    pub fn authorize_viewer(&self, actor: &ResolvedActor) -> Result<(), AuthorizationError> {
        actor.require(Capability::ViewProject)?;
        if self.is_visible_to(actor) {
            return Ok(());
        }
        Err(actor.outside_scope(Capability::ViewProject))
    }

    /// Moves the project to a pipeline stage.
    ///
    /// Returns `false` when the project is already at `target`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidStatusTransition`] when `policy`
    /// forbids the move.
    pub fn update_status(
        &mut self,
        target: ProjectStatus,
        policy: StatusTransitionPolicy,
        clock: &impl Clock,
    ) -> Result<bool, ProjectDomainError> {
        if self.status == target {
            return Ok(false);
        }
        if !policy.permits(self.status, target) {
            return Err(ProjectDomainError::InvalidStatusTransition {
                project_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.touch(clock);
        Ok(true)
    }

    /// Records the supervisor's decision on a student proposal.
    ///
    /// Returns `false` when the same decision was already recorded.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::ProposalAlreadyDecided`] when a
    /// different decision was already recorded.
    pub fn review_proposal(
        &mut self,
        decision: ProposalDecision,
        clock: &impl Clock,
    ) -> Result<bool, ProjectDomainError> {
        let outcome = decision.outcome();
        if self.approval == outcome {
            return Ok(false);
        }
        if self.approval != ApprovalState::AwaitingApproval {
            return Err(ProjectDomainError::ProposalAlreadyDecided {
                project_id: self.id,
                state: self.approval,
                decision,
            });
        }
        self.approval = outcome;
        self.touch(clock);
        Ok(true)
    }

    /// Sets the supervisor when none is assigned.
    ///
    /// Returns `false` when a supervisor was already present.
    pub fn adopt_supervisor(&mut self, supervisor: ActorId, clock: &impl Clock) -> bool {
        if self.supervisor.is_some() {
            return false;
        }
        self.supervisor = Some(supervisor);
        self.touch(clock);
        true
    }

    /// Turns an individual project into a group project.
    ///
    /// The previously assigned student, if any, becomes the first member.
    /// The group starts without a head.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::AlreadyGroup`] for group projects or
    /// [`ProjectDomainError::EmptyMemberSet`] when `members` is empty.
    pub fn convert_to_group(
        &mut self,
        members: Vec<ActorId>,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        let ProjectKind::Individual { assigned_student } = self.kind else {
            return Err(ProjectDomainError::AlreadyGroup(self.id));
        };
        if members.is_empty() {
            return Err(ProjectDomainError::EmptyMemberSet);
        }
        self.kind = ProjectKind::group(assigned_student.into_iter().chain(members))?;
        self.touch(clock);
        Ok(())
    }

    /// Adds a student to a group.
    ///
    /// Returns `false` when the student is already a member.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::NotAGroup`] for individual projects.
    pub fn add_member(
        &mut self,
        member: ActorId,
        clock: &impl Clock,
    ) -> Result<bool, ProjectDomainError> {
        let ProjectKind::Group { members, .. } = &mut self.kind else {
            return Err(ProjectDomainError::NotAGroup(self.id));
        };
        if members.contains(&member) {
            return Ok(false);
        }
        members.push(member);
        self.touch(clock);
        Ok(true)
    }

    /// Removes a student from a group.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::NotAGroup`] for individual projects,
    /// [`ProjectDomainError::NotAMember`] when `member` is not in the group,
    /// [`ProjectDomainError::LastMember`] when the group would become empty,
    /// or [`ProjectDomainError::HeadRemovalBlocked`] when `member` is the
    /// head and `policy` is [`HeadRemovalPolicy::Block`].
    pub fn remove_member(
        &mut self,
        member: ActorId,
        policy: HeadRemovalPolicy,
        clock: &impl Clock,
    ) -> Result<MemberRemoval, ProjectDomainError> {
        let project_id = self.id;
        let ProjectKind::Group { members, head } = &mut self.kind else {
            return Err(ProjectDomainError::NotAGroup(project_id));
        };
        if !members.contains(&member) {
            return Err(ProjectDomainError::NotAMember {
                project_id,
                actor_id: member,
            });
        }
        let is_head = *head == Some(member);
        if is_head && policy == HeadRemovalPolicy::Block {
            return Err(ProjectDomainError::HeadRemovalBlocked {
                project_id,
                actor_id: member,
            });
        }
        if members.len() == 1 {
            return Err(ProjectDomainError::LastMember(project_id));
        }
        members.retain(|existing| *existing != member);
        if is_head {
            *head = None;
        }
        self.touch(clock);
        Ok(if is_head {
            MemberRemoval::RemovedHead
        } else {
            MemberRemoval::Removed
        })
    }

    /// Makes a member the project head, demoting any previous head.
    ///
    /// Returns `false` when the member already is the head.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::NotAGroup`] for individual projects or
    /// [`ProjectDomainError::NotAMember`] when `member` is not in the group.
    pub fn promote_to_head(
        &mut self,
        member: ActorId,
        clock: &impl Clock,
    ) -> Result<bool, ProjectDomainError> {
        let project_id = self.id;
        let ProjectKind::Group { members, head } = &mut self.kind else {
            return Err(ProjectDomainError::NotAGroup(project_id));
        };
        if !members.contains(&member) {
            return Err(ProjectDomainError::NotAMember {
                project_id,
                actor_id: member,
            });
        }
        if *head == Some(member) {
            return Ok(false);
        }
        *head = Some(member);
        self.touch(clock);
        Ok(true)
    }

    /// Reserves the next phase number.
    ///
    /// Numbers start at one and are never handed out twice for the same
    /// project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::ProjectRejected`] for rejected proposals
    /// or [`ProjectDomainError::PhaseCounterExhausted`] on overflow.
    pub fn issue_phase_number(&mut self, clock: &impl Clock) -> Result<u32, ProjectDomainError> {
        if self.approval == ApprovalState::Rejected {
            return Err(ProjectDomainError::ProjectRejected(self.id));
        }
        let next = self
            .phases_issued
            .checked_add(1)
            .ok_or(ProjectDomainError::PhaseCounterExhausted(self.id))?;
        self.phases_issued = next;
        self.touch(clock);
        Ok(next)
    }

    /// Gives back the most recently reserved phase number when its phase
    /// could not be stored.
    ///
    /// Returns `false` when `phase` is no longer the latest number issued.
    pub fn release_phase_number(&mut self, phase: u32, clock: &impl Clock) -> bool {
        if phase == 0 || self.phases_issued != phase {
            return false;
        }
        self.phases_issued = phase - 1;
        self.touch(clock);
        true
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.revision = self.revision.next();
    }
}
