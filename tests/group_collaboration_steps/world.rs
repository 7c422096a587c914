//! Shared world state for group collaboration BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use capstone::{
    WorkflowConfig, WorkflowError,
    allocation::services::AllocationService,
    chat::{adapters::memory::InMemoryChatChannel, services::ChatService},
    identity::{adapters::memory::InMemoryActorDirectory, domain::Session},
    notification::adapters::memory::InMemoryNotificationInbox,
    project::{
        adapters::memory::InMemoryProjectRepository,
        domain::ProjectId,
        services::{GroupFormationService, ProjectLifecycleService},
    },
    task::adapters::memory::InMemoryTaskRepository,
};
use mockable::DefaultClock;
use rstest::fixture;

type Projects = InMemoryProjectRepository;
type Directory = InMemoryActorDirectory;
type Inbox = InMemoryNotificationInbox;
type Tasks = InMemoryTaskRepository;

/// Scenario world for group collaboration behaviour tests.
pub struct GroupWorld {
    pub directory: Arc<Directory>,
    pub clock: DefaultClock,
    pub lifecycle: ProjectLifecycleService<Projects, Directory, Inbox, DefaultClock>,
    pub groups: GroupFormationService<Projects, Tasks, Directory, Inbox, DefaultClock>,
    pub allocation: AllocationService<Projects, Directory, Inbox, DefaultClock>,
    pub chat: ChatService<Projects, Directory, InMemoryChatChannel, DefaultClock>,
    pub people: HashMap<String, Session>,
    pub project_id: Option<ProjectId>,
    pub last_error: Option<WorkflowError>,
}

impl GroupWorld {
    /// Creates a world with fresh in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryActorDirectory::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let inbox = Arc::new(InMemoryNotificationInbox::new());
        let clock = Arc::new(DefaultClock);
        let lifecycle = ProjectLifecycleService::new(
            Arc::clone(&projects),
            Arc::clone(&directory),
            Arc::clone(&inbox),
            Arc::clone(&clock),
            WorkflowConfig::default(),
        );
        Self {
            groups: GroupFormationService::new(
                Arc::clone(&projects),
                Arc::new(InMemoryTaskRepository::new()),
                Arc::clone(&directory),
                inbox,
                Arc::clone(&clock),
                WorkflowConfig::default(),
            ),
            allocation: AllocationService::new(lifecycle.clone()),
            chat: ChatService::new(
                projects,
                Arc::clone(&directory),
                Arc::new(InMemoryChatChannel::new()),
                clock,
            ),
            lifecycle,
            directory,
            clock: DefaultClock,
            people: HashMap::new(),
            project_id: None,
            last_error: None,
        }
    }

    /// Returns the session of a named participant.
    ///
    /// # Errors
    ///
    /// Returns an error if nobody of that name was set up.
    pub fn person(&self, name: &str) -> Result<&Session, eyre::Report> {
        self.people
            .get(name)
            .ok_or_else(|| eyre::eyre!("missing participant {name} in scenario world"))
    }

    /// Returns the scenario's project.
    ///
    /// # Errors
    ///
    /// Returns an error if no project was set up.
    pub fn project_id(&self) -> Result<ProjectId, eyre::Report> {
        self.project_id
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Records the outcome of an operation whose failure is under test.
    pub fn record<T>(&mut self, result: Result<T, WorkflowError>) {
        self.last_error = result.err();
    }
}

impl Default for GroupWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Name under which the group supervisor is registered.
pub const SUPERVISOR: &str = "supervisor";

/// Name under which the administrator is registered.
pub const ADMIN: &str = "admin";

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> GroupWorld {
    GroupWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
