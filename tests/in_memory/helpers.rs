//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use capstone::{
    WorkflowConfig,
    allocation::services::AllocationService,
    chat::{adapters::memory::InMemoryChatChannel, services::ChatService},
    identity::{
        adapters::memory::InMemoryActorDirectory,
        domain::{Actor, Session},
        ports::ActorDirectory,
    },
    notification::adapters::memory::InMemoryNotificationInbox,
    project::{
        adapters::memory::InMemoryProjectRepository,
        services::{GroupFormationService, ProjectLifecycleService},
    },
    task::{adapters::memory::InMemoryTaskRepository, services::TaskWorkflowService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Project lifecycle service over in-memory adapters.
pub type Lifecycle = ProjectLifecycleService<
    InMemoryProjectRepository,
    InMemoryActorDirectory,
    InMemoryNotificationInbox,
    DefaultClock,
>;

/// Every service of the engine sharing one set of in-memory stores.
pub struct Engine {
    pub directory: Arc<InMemoryActorDirectory>,
    pub inbox: Arc<InMemoryNotificationInbox>,
    pub channel: Arc<InMemoryChatChannel>,
    pub lifecycle: Lifecycle,
    pub groups: GroupFormationService<
        InMemoryProjectRepository,
        InMemoryTaskRepository,
        InMemoryActorDirectory,
        InMemoryNotificationInbox,
        DefaultClock,
    >,
    pub workflow: TaskWorkflowService<
        InMemoryTaskRepository,
        InMemoryProjectRepository,
        InMemoryActorDirectory,
        InMemoryNotificationInbox,
        DefaultClock,
    >,
    pub allocation: AllocationService<
        InMemoryProjectRepository,
        InMemoryActorDirectory,
        InMemoryNotificationInbox,
        DefaultClock,
    >,
    pub chat: ChatService<
        InMemoryProjectRepository,
        InMemoryActorDirectory,
        InMemoryChatChannel,
        DefaultClock,
    >,
}

impl Engine {
    /// Wires every service with the given configuration.
    #[must_use]
    pub fn new(config: WorkflowConfig) -> Self {
        let directory = Arc::new(InMemoryActorDirectory::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let inbox = Arc::new(InMemoryNotificationInbox::new());
        let channel = Arc::new(InMemoryChatChannel::new());
        let clock = Arc::new(DefaultClock);
        let lifecycle = ProjectLifecycleService::new(
            Arc::clone(&projects),
            Arc::clone(&directory),
            Arc::clone(&inbox),
            Arc::clone(&clock),
            config,
        );
        Self {
            groups: GroupFormationService::new(
                Arc::clone(&projects),
                Arc::clone(&tasks),
                Arc::clone(&directory),
                Arc::clone(&inbox),
                Arc::clone(&clock),
                config,
            ),
            workflow: TaskWorkflowService::new(
                tasks,
                Arc::clone(&projects),
                Arc::clone(&directory),
                Arc::clone(&inbox),
                Arc::clone(&clock),
            ),
            allocation: AllocationService::new(lifecycle.clone()),
            chat: ChatService::new(
                projects,
                Arc::clone(&directory),
                Arc::clone(&channel),
                clock,
            ),
            lifecycle,
            directory,
            inbox,
            channel,
        }
    }

    /// Registers an actor and returns a session carrying its role claim.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory rejects the actor.
    pub async fn enrol(&self, actor: &Actor) -> Result<Session, eyre::Report> {
        self.directory.register(actor).await?;
        Ok(Session::for_actor(actor))
    }
}

/// Provides a fresh engine with the default configuration.
#[fixture]
pub fn engine() -> Engine {
    Engine::new(WorkflowConfig::default())
}

/// Provides a clock for actor creation.
#[fixture]
pub fn clock() -> DefaultClock {
    DefaultClock
}
