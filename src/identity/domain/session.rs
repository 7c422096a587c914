//! Per-call identity context.

use super::{Actor, ActorId, AuthorizationError, Capability, CapabilitySet, Role};
use crate::project::domain::Project;

/// Authenticated caller context passed explicitly into every engine call.
///
/// The role claim comes from whatever issued the caller's credentials and is
/// only trusted once it agrees with the actor directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    actor_id: ActorId,
    role_claim: String,
}

impl Session {
    /// Creates a session from an authenticated actor identifier and the role
    /// carried by its credentials.
    #[must_use]
    pub fn new(actor_id: ActorId, role_claim: impl Into<String>) -> Self {
        Self {
            actor_id,
            role_claim: role_claim.into(),
        }
    }

    /// Creates a session whose claim matches the actor's directory role.
    #[must_use]
    pub fn for_actor(actor: &Actor) -> Self {
        Self::new(actor.id(), actor.role().as_str())
    }

    /// Returns the authenticated actor identifier.
    #[must_use]
    pub const fn actor_id(&self) -> ActorId {
        self.actor_id
    }

    /// Returns the raw role claim.
    #[must_use]
    pub fn role_claim(&self) -> &str {
        &self.role_claim
    }
}

/// An actor whose role has been checked against the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedActor {
    id: ActorId,
    role: Option<Role>,
    capabilities: CapabilitySet,
}

impl ResolvedActor {
    /// Creates a resolved actor; capabilities follow from the role.
    #[must_use]
    pub fn new(id: ActorId, role: Option<Role>) -> Self {
        Self {
            id,
            role,
            capabilities: CapabilitySet::for_role(role),
        }
    }

    /// Creates an actor that resolved to no role and may do nothing.
    #[must_use]
    pub const fn unresolved(id: ActorId) -> Self {
        Self {
            id,
            role: None,
            capabilities: CapabilitySet::empty(),
        }
    }

    /// Returns the actor identifier.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Returns the resolved role, if any.
    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        self.role
    }

    /// Returns the granted capabilities.
    #[must_use]
    pub const fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Returns whether the capability is granted.
    #[must_use]
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(capability)
    }

    /// Returns whether this actor may act as the supervisor of any project.
    #[must_use]
    pub fn acts_on_any_project(&self) -> bool {
        self.has(Capability::ActOnAnyProject)
    }

    /// Returns whether this actor supervises the project or may act on any
    /// project.
    #[must_use]
    pub fn is_project_authority(&self, project: &Project) -> bool {
        project.is_authority(self)
    }

    /// Fails unless the capability is granted.
    ///
    /// # Errors
    ///
    /// Returns [`AuthorizationError::MissingCapability`] when the actor's role
    /// does not grant `capability`.
    pub fn require(&self, capability: Capability) -> Result<(), AuthorizationError> {
        if self.has(capability) {
            return Ok(());
        }
        Err(AuthorizationError::MissingCapability {
            actor_id: self.id,
            capability,
        })
    }

    /// Builds the error for a capability held outside the actor's scope.
    #[must_use]
    pub const fn outside_scope(&self, capability: Capability) -> AuthorizationError {
        AuthorizationError::OutsideScope {
            actor_id: self.id,
            capability,
        }
    }
}
