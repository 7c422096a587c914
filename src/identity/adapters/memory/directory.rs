//! In-memory actor directory for tests and embedded use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{Actor, ActorId, Allocation},
    ports::{ActorDirectory, ActorDirectoryError, ActorDirectoryResult},
};
use crate::revision::Revision;

/// Thread-safe in-memory actor directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActorDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    actors: HashMap<ActorId, Actor>,
    registration_order: Vec<ActorId>,
}

impl InMemoryActorDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> ActorDirectoryError {
    ActorDirectoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Checks that the stored record is still at the revision the caller loaded.
fn check_revision(
    state: &InMemoryDirectoryState,
    id: ActorId,
    expected: Revision,
) -> ActorDirectoryResult<()> {
    let stored = state
        .actors
        .get(&id)
        .ok_or(ActorDirectoryError::NotFound(id))?;
    if stored.revision() != expected {
        return Err(ActorDirectoryError::Conflict {
            actor_id: id,
            expected,
            actual: stored.revision(),
        });
    }
    Ok(())
}

fn collect_where(state: &InMemoryDirectoryState, predicate: impl Fn(&Actor) -> bool) -> Vec<Actor> {
    state
        .registration_order
        .iter()
        .filter_map(|id| state.actors.get(id))
        .filter(|actor| predicate(actor))
        .cloned()
        .collect()
}

#[async_trait]
impl ActorDirectory for InMemoryActorDirectory {
    async fn register(&self, actor: &Actor) -> ActorDirectoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.actors.contains_key(&actor.id()) {
            return Err(ActorDirectoryError::DuplicateActor(actor.id()));
        }
        state.registration_order.push(actor.id());
        state.actors.insert(actor.id(), actor.clone());
        Ok(())
    }

    async fn update(&self, actor: &Actor, expected: Revision) -> ActorDirectoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        check_revision(&state, actor.id(), expected)?;
        state.actors.insert(actor.id(), actor.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ActorId) -> ActorDirectoryResult<Option<Actor>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.actors.get(&id).cloned())
    }

    async fn apply_allocation(&self, allocation: &Allocation) -> ActorDirectoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let student = allocation.student();
        let supervisor = allocation.supervisor();
        check_revision(&state, student.id(), allocation.student_revision())?;
        check_revision(&state, supervisor.id(), allocation.supervisor_revision())?;
        state.actors.insert(student.id(), student.clone());
        state.actors.insert(supervisor.id(), supervisor.clone());
        Ok(())
    }

    async fn list_unassigned_students(&self) -> ActorDirectoryResult<Vec<Actor>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(collect_where(&state, Actor::is_unassigned_student))
    }

    async fn list_supervisors(&self) -> ActorDirectoryResult<Vec<Actor>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(collect_where(&state, |actor| actor.load().is_some()))
    }

    async fn list_students_of(&self, supervisor_id: ActorId) -> ActorDirectoryResult<Vec<Actor>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(collect_where(&state, |actor| {
            actor.supervisor_id() == Some(supervisor_id)
        }))
    }
}
