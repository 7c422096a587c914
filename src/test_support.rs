//! Shared wiring for unit tests: every service over in-memory adapters.

use crate::allocation::services::AllocationService;
use crate::chat::{adapters::memory::InMemoryChatChannel, services::ChatService};
use crate::config::WorkflowConfig;
use crate::identity::{
    adapters::memory::InMemoryActorDirectory,
    domain::{Actor, ActorId, Session},
    ports::ActorDirectory,
};
use crate::notification::adapters::memory::InMemoryNotificationInbox;
use crate::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{Project, ProjectId, ProjectType},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
    services::{CreateProjectRequest, GroupFormationService, ProjectLifecycleService},
};
use crate::revision::Revision;
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    services::TaskWorkflowService,
};
use async_trait::async_trait;
use mockable::DefaultClock;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) type Lifecycle = ProjectLifecycleService<
    InMemoryProjectRepository,
    InMemoryActorDirectory,
    InMemoryNotificationInbox,
    DefaultClock,
>;
pub(crate) type Groups = GroupFormationService<
    InMemoryProjectRepository,
    InMemoryTaskRepository,
    InMemoryActorDirectory,
    InMemoryNotificationInbox,
    DefaultClock,
>;
pub(crate) type Workflow = TaskWorkflowService<
    InMemoryTaskRepository,
    InMemoryProjectRepository,
    InMemoryActorDirectory,
    InMemoryNotificationInbox,
    DefaultClock,
>;
pub(crate) type Allocations = AllocationService<
    InMemoryProjectRepository,
    InMemoryActorDirectory,
    InMemoryNotificationInbox,
    DefaultClock,
>;
pub(crate) type Chat = ChatService<
    InMemoryProjectRepository,
    InMemoryActorDirectory,
    InMemoryChatChannel,
    DefaultClock,
>;

pub(crate) struct Harness {
    pub(crate) projects: Arc<InMemoryProjectRepository>,
    pub(crate) directory: Arc<InMemoryActorDirectory>,
    pub(crate) inbox: Arc<InMemoryNotificationInbox>,
    pub(crate) channel: Arc<InMemoryChatChannel>,
    pub(crate) clock: Arc<DefaultClock>,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) groups: Groups,
    pub(crate) workflow: Workflow,
    pub(crate) allocation: Allocations,
    pub(crate) chat: Chat,
}

impl Harness {
    pub(crate) fn new(config: WorkflowConfig) -> Self {
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
                Arc::clone(&projects),
                Arc::clone(&directory),
                Arc::clone(&channel),
                Arc::clone(&clock),
            ),
            lifecycle,
            projects,
            directory,
            inbox,
            channel,
            clock,
        }
    }

    pub(crate) async fn register(&self, actor: &Actor) -> eyre::Result<Session> {
        self.directory.register(actor).await?;
        Ok(Session::for_actor(actor))
    }

    pub(crate) async fn student(&self, name: &str) -> eyre::Result<Session> {
        self.register(&Actor::student(name, &*self.clock)?).await
    }

    pub(crate) async fn supervisor(&self, name: &str, capacity: u32) -> eyre::Result<Session> {
        self.register(&Actor::supervisor(name, capacity, &*self.clock)?)
            .await
    }

    pub(crate) async fn admin(&self) -> eyre::Result<Session> {
        self.register(&Actor::super_admin("Registrar", &*self.clock)?)
            .await
    }

    /// Supervisor-created individual project for `student`.
    pub(crate) async fn individual_project(
        &self,
        supervisor: &Session,
        student: &Session,
    ) -> eyre::Result<Project> {
        let request = CreateProjectRequest::new("Thesis", "Capstone research")
            .with_assignees([student.actor_id()]);
        Ok(self.lifecycle.create_project(supervisor, request).await?)
    }

    /// Supervisor-created group project with the given members.
    pub(crate) async fn group_project(
        &self,
        supervisor: &Session,
        members: &[&Session],
    ) -> eyre::Result<Project> {
        let request = CreateProjectRequest::new("Group build", "Team capstone")
            .with_type(ProjectType::Group)
            .with_assignees(members.iter().map(|member| member.actor_id()));
        Ok(self.lifecycle.create_project(supervisor, request).await?)
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new(WorkflowConfig::default())
    }
}

/// Takes one from `remaining` and reports whether a failure was due.
fn fail_next(remaining: &AtomicUsize) -> bool {
    remaining
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
        .is_ok()
}

fn outage() -> std::io::Error {
    std::io::Error::other("storage unavailable")
}

/// Project store that fails a set number of updates or lookups.
pub(crate) struct FlakyProjectRepository {
    inner: Arc<InMemoryProjectRepository>,
    failing_updates: AtomicUsize,
    failing_finds: AtomicUsize,
}

impl FlakyProjectRepository {
    /// Fails the next `updates` updates and the next `finds` lookups.
    pub(crate) const fn new(
        inner: Arc<InMemoryProjectRepository>,
        updates: usize,
        finds: usize,
    ) -> Self {
        Self {
            inner,
            failing_updates: AtomicUsize::new(updates),
            failing_finds: AtomicUsize::new(finds),
        }
    }
}

#[async_trait]
impl ProjectRepository for FlakyProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        self.inner.store(project).await
    }

    async fn update(&self, project: &Project, expected: Revision) -> ProjectRepositoryResult<()> {
        if fail_next(&self.failing_updates) {
            return Err(ProjectRepositoryError::persistence(outage()));
        }
        self.inner.update(project, expected).await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        if fail_next(&self.failing_finds) {
            return Err(ProjectRepositoryError::persistence(outage()));
        }
        self.inner.find_by_id(id).await
    }

    async fn list_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.inner.list_all().await
    }

    async fn list_involving(&self, actor_id: ActorId) -> ProjectRepositoryResult<Vec<Project>> {
        self.inner.list_involving(actor_id).await
    }
}

/// Task store whose next `failures` inserts fail.
pub(crate) struct FlakyTaskRepository {
    inner: Arc<InMemoryTaskRepository>,
    failing_stores: AtomicUsize,
}

impl FlakyTaskRepository {
    pub(crate) const fn new(inner: Arc<InMemoryTaskRepository>, failures: usize) -> Self {
        Self {
            inner,
            failing_stores: AtomicUsize::new(failures),
        }
    }
}

#[async_trait]
impl TaskRepository for FlakyTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        if fail_next(&self.failing_stores) {
            return Err(TaskRepositoryError::persistence(outage()));
        }
        self.inner.store(task).await
    }

    async fn update(&self, task: &Task, expected: Revision) -> TaskRepositoryResult<()> {
        self.inner.update(task, expected).await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.inner.find_by_id(id).await
    }

    async fn list_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.list_by_project(project_id).await
    }

    async fn list_by_assignee(&self, actor_id: ActorId) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.list_by_assignee(actor_id).await
    }
}
