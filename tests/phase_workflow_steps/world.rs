//! Shared world state for phase workflow BDD scenarios.

use std::sync::Arc;

use capstone::{
    WorkflowConfig, WorkflowError,
    identity::{adapters::memory::InMemoryActorDirectory, domain::Session},
    notification::adapters::memory::InMemoryNotificationInbox,
    project::{
        adapters::memory::InMemoryProjectRepository, domain::ProjectId,
        services::ProjectLifecycleService,
    },
    task::{
        adapters::memory::InMemoryTaskRepository, domain::Task, services::TaskWorkflowService,
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Lifecycle service type used by the BDD world.
pub type TestLifecycle = ProjectLifecycleService<
    InMemoryProjectRepository,
    InMemoryActorDirectory,
    InMemoryNotificationInbox,
    DefaultClock,
>;

/// Workflow service type used by the BDD world.
pub type TestWorkflow = TaskWorkflowService<
    InMemoryTaskRepository,
    InMemoryProjectRepository,
    InMemoryActorDirectory,
    InMemoryNotificationInbox,
    DefaultClock,
>;

/// Scenario world for phase workflow behaviour tests.
pub struct PhaseWorld {
    pub directory: Arc<InMemoryActorDirectory>,
    pub projects: Arc<InMemoryProjectRepository>,
    pub clock: DefaultClock,
    pub lifecycle: TestLifecycle,
    pub workflow: TestWorkflow,
    pub supervisor: Option<Session>,
    pub student: Option<Session>,
    pub project_id: Option<ProjectId>,
    pub tasks: Vec<Task>,
    pub last_error: Option<WorkflowError>,
}

impl PhaseWorld {
    /// Creates a world with fresh in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryActorDirectory::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let inbox = Arc::new(InMemoryNotificationInbox::new());
        let clock = Arc::new(DefaultClock);
        Self {
            lifecycle: ProjectLifecycleService::new(
                Arc::clone(&projects),
                Arc::clone(&directory),
                Arc::clone(&inbox),
                Arc::clone(&clock),
                WorkflowConfig::default(),
            ),
            workflow: TaskWorkflowService::new(
                Arc::new(InMemoryTaskRepository::new()),
                Arc::clone(&projects),
                Arc::clone(&directory),
                inbox,
                clock,
            ),
            directory,
            projects,
            clock: DefaultClock,
            supervisor: None,
            student: None,
            project_id: None,
            tasks: Vec::new(),
            last_error: None,
        }
    }

    /// Returns the scenario's supervisor session.
    ///
    /// # Errors
    ///
    /// Returns an error if no supervisor was set up.
    pub fn supervisor(&self) -> Result<&Session, eyre::Report> {
        self.supervisor
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing supervisor in scenario world"))
    }

    /// Returns the scenario's student session.
    ///
    /// # Errors
    ///
    /// Returns an error if no student was set up.
    pub fn student(&self) -> Result<&Session, eyre::Report> {
        self.student
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing student in scenario world"))
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

    /// Returns the most recently issued phase.
    ///
    /// # Errors
    ///
    /// Returns an error if no phase was issued.
    pub fn latest_task(&self) -> Result<&Task, eyre::Report> {
        self.tasks
            .last()
            .ok_or_else(|| eyre::eyre!("missing issued phase in scenario world"))
    }
}

impl Default for PhaseWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PhaseWorld {
    PhaseWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
