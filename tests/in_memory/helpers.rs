//! Shared wiring for in-memory integration tests.

use std::sync::{Arc, RwLock};

use burndown::identity::adapters::memory::InMemoryUserDirectory;
use burndown::identity::domain::UserId;
use burndown::project::{
    adapters::memory::InMemoryProjectRepository, domain::Project, ports::ProjectRepository,
};
use burndown::sprint::{
    adapters::memory::InMemorySprintRepository,
    domain::Sprint,
    services::{CreateSprintRequest, SprintSchedulerService},
};
use burndown::story::{
    adapters::memory::InMemoryStoryRepository,
    domain::{Priority, UserStory},
    services::{CreateStoryRequest, StoryLifecycleService, SubtaskService, TimeRecordingService},
};
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

/// Deterministic clock advanced explicitly by tests.
#[derive(Debug, Clone)]
pub struct TestClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl TestClock {
    /// Creates a clock frozen at a fixed workday morning.
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2025, 4, 2, 9, 0, 0)
            .single()
            .expect("valid instant");
        Self {
            now: Arc::new(RwLock::new(start)),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.write().expect("clock lock poisoned");
        *now += delta;
    }
}

impl Clock for TestClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.read().expect("clock lock poisoned")
    }
}

pub type Scheduler = SprintSchedulerService<
    InMemorySprintRepository,
    InMemoryProjectRepository,
    InMemoryStoryRepository,
    TestClock,
>;
pub type Lifecycle = StoryLifecycleService<
    InMemoryStoryRepository,
    InMemoryProjectRepository,
    InMemorySprintRepository,
    TestClock,
>;
pub type Subtasks = SubtaskService<InMemoryStoryRepository, InMemoryUserDirectory, TestClock>;
pub type Recording = TimeRecordingService<InMemoryStoryRepository, TestClock>;

/// Every engine service wired over shared in-memory adapters.
pub struct Engine {
    pub scheduler: Scheduler,
    pub lifecycle: Lifecycle,
    pub subtasks: Subtasks,
    pub recording: Recording,
    pub projects: Arc<InMemoryProjectRepository>,
    pub directory: Arc<InMemoryUserDirectory>,
    pub clock: TestClock,
}

impl Engine {
    pub fn new() -> Self {
        let projects = Arc::new(InMemoryProjectRepository::new());
        let sprints = Arc::new(InMemorySprintRepository::new());
        let stories = Arc::new(InMemoryStoryRepository::new());
        let directory = Arc::new(InMemoryUserDirectory::new());
        let clock = TestClock::new();
        let shared_clock = Arc::new(clock.clone());

        Self {
            scheduler: SprintSchedulerService::new(
                Arc::clone(&sprints),
                Arc::clone(&projects),
                Arc::clone(&stories),
                Arc::clone(&shared_clock),
            ),
            lifecycle: StoryLifecycleService::new(
                Arc::clone(&stories),
                Arc::clone(&projects),
                Arc::clone(&sprints),
                Arc::clone(&shared_clock),
            ),
            subtasks: SubtaskService::new(
                Arc::clone(&stories),
                Arc::clone(&directory),
                Arc::clone(&shared_clock),
            ),
            recording: TimeRecordingService::new(stories, shared_clock),
            projects,
            directory,
            clock,
        }
    }

    /// Stores a project and returns it.
    pub async fn seed_project(&self, name: &str) -> Project {
        let project = Project::new(name, "integration board").expect("valid project");
        self.projects.store(&project).await.expect("store succeeds");
        project
    }

    /// Creates a sprint through the scheduler.
    pub async fn seed_sprint(
        &self,
        project_name: &str,
        start: NaiveDate,
        end: NaiveDate,
        velocity: u32,
    ) -> Sprint {
        self.scheduler
            .create_sprint(CreateSprintRequest::new(project_name, start, end, velocity))
            .await
            .expect("sprint created")
    }

    /// Creates a story through the lifecycle service.
    pub async fn seed_story(&self, project: &Project, name: &str) -> UserStory {
        self.lifecycle
            .create_story(story_request(project, name))
            .await
            .expect("story created")
    }

    /// Registers a developer in the directory.
    pub fn seed_developer(&self, id: &str, display_name: &str) -> UserId {
        let user = user(id);
        self.directory
            .register(user.clone(), display_name)
            .expect("registration succeeds");
        user
    }
}

pub fn story_request(project: &Project, name: &str) -> CreateStoryRequest {
    CreateStoryRequest::new(
        project.id(),
        name,
        "As a user I want the feature",
        vec!["it behaves as specified".to_owned()],
        Priority::MustHave,
        400,
    )
}

pub fn user(id: &str) -> UserId {
    UserId::new(id).expect("valid user id")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
