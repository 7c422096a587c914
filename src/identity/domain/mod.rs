//! Domain model for actors and their capabilities.
//!
//! Roles form a closed set so the capability matrix is matched
//! exhaustively. Supervisor capacity and the student-to-supervisor pairing
//! live on the actor records themselves.

mod actor;
mod allocation;
mod capability;
mod error;
mod ids;
mod role;
mod session;

pub use actor::{Actor, ActorProfile, PersistedActorData};
pub use allocation::Allocation;
pub use capability::{Capability, CapabilitySet};
pub use error::{AuthorizationError, IdentityDomainError, ParseRoleError};
pub use ids::ActorId;
pub use role::Role;
pub use session::{ResolvedActor, Session};
