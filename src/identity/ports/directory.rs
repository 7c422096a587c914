//! Actor directory port.

use crate::identity::domain::{Actor, ActorId, Allocation};
use crate::revision::Revision;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for actor directory operations.
pub type ActorDirectoryResult<T> = Result<T, ActorDirectoryError>;

/// Read and write access to actor records.
#[async_trait]
pub trait ActorDirectory: Send + Sync {
    /// Registers a new actor.
    ///
    /// # Errors
    ///
    /// Returns [`ActorDirectoryError::DuplicateActor`] when the identifier is
    /// already registered.
    async fn register(&self, actor: &Actor) -> ActorDirectoryResult<()>;

    /// Replaces an actor record loaded at `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`ActorDirectoryError::NotFound`] when the actor does not
    /// exist or [`ActorDirectoryError::Conflict`] when the stored revision
    /// differs from `expected`.
    async fn update(&self, actor: &Actor, expected: Revision) -> ActorDirectoryResult<()>;

    /// Finds an actor by identifier.
    ///
    /// Returns `None` when the actor does not exist.
    async fn find_by_id(&self, id: ActorId) -> ActorDirectoryResult<Option<Actor>>;

    /// Writes both sides of a student-to-supervisor pairing atomically.
    ///
    /// Either both records are replaced or neither is.
    ///
    /// # Errors
    ///
    /// Returns [`ActorDirectoryError::NotFound`] or
    /// [`ActorDirectoryError::Conflict`] for either record.
    async fn apply_allocation(&self, allocation: &Allocation) -> ActorDirectoryResult<()>;

    /// Returns students without a supervisor, in registration order.
    async fn list_unassigned_students(&self) -> ActorDirectoryResult<Vec<Actor>>;

    /// Returns every supervisor, in registration order.
    async fn list_supervisors(&self) -> ActorDirectoryResult<Vec<Actor>>;

    /// Returns the students paired with a supervisor, in registration order.
    async fn list_students_of(&self, supervisor_id: ActorId) -> ActorDirectoryResult<Vec<Actor>>;
}

/// Errors returned by actor directory implementations.
#[derive(Debug, Clone, Error)]
pub enum ActorDirectoryError {
    /// An actor with the same identifier already exists.
    #[error("duplicate actor identifier: {0}")]
    DuplicateActor(ActorId),

    /// The actor was not found.
    #[error("actor not found: {0}")]
    NotFound(ActorId),

    /// The actor changed since it was loaded.
    #[error("actor {actor_id} was modified concurrently (expected {expected}, found {actual})")]
    Conflict {
        /// Actor identifier.
        actor_id: ActorId,
        /// Revision the caller loaded.
        expected: Revision,
        /// Revision currently stored.
        actual: Revision,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActorDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
