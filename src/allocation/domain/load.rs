//! Supervisor capacity snapshot.

use crate::identity::domain::{Actor, ActorId};
use serde::{Deserialize, Serialize};

/// A supervisor's capacity and how much of it is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisorLoad {
    supervisor_id: ActorId,
    display_name: String,
    capacity: u32,
    current_load: u32,
}

impl SupervisorLoad {
    /// Builds a snapshot from a supervisor record.
    ///
    /// Returns `None` for actors that are not supervisors.
    #[must_use]
    pub fn from_actor(actor: &Actor) -> Option<Self> {
        let (capacity, current_load) = actor.load()?;
        Some(Self {
            supervisor_id: actor.id(),
            display_name: actor.display_name().to_owned(),
            capacity,
            current_load,
        })
    }

    /// Returns the supervisor identifier.
    #[must_use]
    pub const fn supervisor_id(&self) -> ActorId {
        self.supervisor_id
    }

    /// Returns the supervisor's display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the maximum number of students.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the number of allocated students.
    #[must_use]
    pub const fn current_load(&self) -> u32 {
        self.current_load
    }

    /// Returns how many more students the supervisor can take.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.current_load)
    }

    /// Returns whether the supervisor is at capacity.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.remaining() == 0
    }
}
