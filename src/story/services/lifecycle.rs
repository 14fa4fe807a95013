//! Service layer for story creation, sprint assignment, and evaluation.

use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use crate::project::ports::{ProjectRepository, ProjectRepositoryError};
use crate::sprint::domain::SprintId;
use crate::sprint::ports::{SprintRepository, SprintRepositoryError};
use crate::story::{
    domain::{
        ParseStoryStatusError, Priority, StoryDomainError, StoryDraft, StoryId, StoryPoints,
        StoryStatus, UserStory,
    },
    ports::{StoryRepository, StoryRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a user story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStoryRequest {
    project_id: ProjectId,
    name: String,
    description: String,
    acceptance_criteria: Vec<String>,
    priority: Priority,
    business_value: u32,
    story_points: Option<u32>,
}

impl CreateStoryRequest {
    /// Creates a request with all required story fields.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        description: impl Into<String>,
        acceptance_criteria: impl IntoIterator<Item = String>,
        priority: Priority,
        business_value: u32,
    ) -> Self {
        Self {
            project_id,
            name: name.into(),
            description: description.into(),
            acceptance_criteria: acceptance_criteria.into_iter().collect(),
            priority,
            business_value,
            story_points: None,
        }
    }

    /// Sets an initial story-point estimate.
    ///
    /// Legal at creation time because a new story belongs to no sprint.
    #[must_use]
    pub const fn with_story_points(mut self, points: u32) -> Self {
        self.story_points = Some(points);
        self
    }
}

/// Request payload replacing a story's descriptive fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStoryRequest {
    name: String,
    description: String,
    acceptance_criteria: Vec<String>,
    priority: Priority,
    business_value: u32,
}

impl UpdateStoryRequest {
    /// Creates a full-replace request for the descriptive field group.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        acceptance_criteria: impl IntoIterator<Item = String>,
        priority: Priority,
        business_value: u32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            acceptance_criteria: acceptance_criteria.into_iter().collect(),
            priority,
            business_value,
        }
    }
}

/// Request payload for the acceptance evaluation of a story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluateStoryRequest {
    accepted: bool,
    comment: Option<String>,
    evaluated_by: UserId,
}

impl EvaluateStoryRequest {
    /// Creates an accepting evaluation.
    #[must_use]
    pub const fn accepted(evaluated_by: UserId) -> Self {
        Self {
            accepted: true,
            comment: None,
            evaluated_by,
        }
    }

    /// Creates a rejecting evaluation with its mandatory comment.
    #[must_use]
    pub fn rejected(evaluated_by: UserId, comment: impl Into<String>) -> Self {
        Self {
            accepted: false,
            comment: Some(comment.into()),
            evaluated_by,
        }
    }
}

/// Service-level errors for story lifecycle operations.
#[derive(Debug, Error)]
pub enum StoryLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] StoryDomainError),

    /// The status string is not a member of the closed status set.
    #[error(transparent)]
    InvalidStatus(#[from] ParseStoryStatusError),

    /// The owning project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The referenced sprint does not exist.
    #[error("sprint not found: {0}")]
    SprintNotFound(SprintId),

    /// The sprint belongs to a different project than the story.
    #[error("sprint {sprint} does not belong to the story's project")]
    SprintProjectMismatch {
        /// The sprint that was offered.
        sprint: SprintId,
        /// The story being assigned.
        story: StoryId,
    },

    /// Another story in the project already carries the name.
    #[error("a story named '{0}' already exists in the project")]
    DuplicateStoryName(String),

    /// The story does not exist.
    #[error("story not found: {0}")]
    StoryNotFound(StoryId),

    /// The story still belongs to a sprint and cannot be deleted.
    #[error("story {0} is assigned to a sprint and cannot be deleted")]
    StoryInSprint(StoryId),

    /// Story persistence failed.
    #[error(transparent)]
    Repository(#[from] StoryRepositoryError),

    /// Project lookup failed.
    #[error(transparent)]
    ProjectRepository(#[from] ProjectRepositoryError),

    /// Sprint lookup failed.
    #[error(transparent)]
    SprintRepository(#[from] SprintRepositoryError),
}

/// Result type for story lifecycle operations.
pub type StoryLifecycleResult<T> = Result<T, StoryLifecycleError>;

/// Story lifecycle orchestration service.
#[derive(Clone)]
pub struct StoryLifecycleService<S, P, R, C>
where
    S: StoryRepository,
    P: ProjectRepository,
    R: SprintRepository,
    C: Clock + Send + Sync,
{
    stories: Arc<S>,
    projects: Arc<P>,
    sprints: Arc<R>,
    clock: Arc<C>,
}

impl<S, P, R, C> StoryLifecycleService<S, P, R, C>
where
    S: StoryRepository,
    P: ProjectRepository,
    R: SprintRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new story lifecycle service.
    #[must_use]
    pub const fn new(stories: Arc<S>, projects: Arc<P>, sprints: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            stories,
            projects,
            sprints,
            clock,
        }
    }

    /// Creates a story after validating fields, project, and name.
    ///
    /// # Errors
    ///
    /// Returns [`StoryLifecycleError::ProjectNotFound`] when the project is
    /// unknown, [`StoryLifecycleError::DuplicateStoryName`] when another
    /// story in the project carries the name (case-insensitively), or a
    /// domain error for invalid fields.
    pub async fn create_story(
        &self,
        request: CreateStoryRequest,
    ) -> StoryLifecycleResult<UserStory> {
        let draft = StoryDraft::new(
            request.name,
            request.description,
            request.acceptance_criteria,
            request.priority,
            request.business_value,
        )?;
        if self
            .projects
            .find_by_id(request.project_id)
            .await?
            .is_none()
        {
            return Err(StoryLifecycleError::ProjectNotFound(request.project_id));
        }
        self.ensure_unique_name(request.project_id, draft.name(), None)
            .await?;

        let mut story = UserStory::new(request.project_id, draft, &*self.clock);
        if let Some(points) = request.story_points {
            story.set_story_points(StoryPoints::new(points)?, &*self.clock)?;
        }
        self.stories.store(&story).await?;
        Ok(story)
    }

    /// Replaces a story's descriptive fields after re-validation.
    ///
    /// The uniqueness scan excludes the story itself, so saving a form that
    /// keeps the name unchanged succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoryLifecycleError::StoryNotFound`],
    /// [`StoryLifecycleError::DuplicateStoryName`], or a domain error for
    /// invalid fields.
    pub async fn update_story(
        &self,
        story_id: StoryId,
        request: UpdateStoryRequest,
    ) -> StoryLifecycleResult<UserStory> {
        let mut story = self.require_story(story_id).await?;
        let draft = StoryDraft::new(
            request.name,
            request.description,
            request.acceptance_criteria,
            request.priority,
            request.business_value,
        )?;
        self.ensure_unique_name(story.project_id(), draft.name(), Some(story_id))
            .await?;
        story.replace_details(draft, &*self.clock);
        self.stories.update(&story).await?;
        Ok(story)
    }

    /// Assigns a story to a sprint, forcing its status to `ProductBacklog`.
    ///
    /// The sprint set accumulates: earlier assignments are kept. No velocity
    /// capacity check runs here; planning surfaces consult the scheduler's
    /// advisory check before calling.
    ///
    /// # Errors
    ///
    /// Returns [`StoryLifecycleError::SprintNotFound`] or
    /// [`StoryLifecycleError::SprintProjectMismatch`] when the sprint does
    /// not fit the story.
    pub async fn assign_to_sprint(
        &self,
        story_id: StoryId,
        sprint_id: SprintId,
    ) -> StoryLifecycleResult<UserStory> {
        let mut story = self.require_story(story_id).await?;
        let sprint = self
            .sprints
            .find_by_id(sprint_id)
            .await?
            .ok_or(StoryLifecycleError::SprintNotFound(sprint_id))?;
        if sprint.project_id() != story.project_id() {
            return Err(StoryLifecycleError::SprintProjectMismatch {
                sprint: sprint_id,
                story: story_id,
            });
        }
        story.assign_to_sprint(sprint_id, &*self.clock);
        self.stories.update(&story).await?;
        Ok(story)
    }

    /// Sets a story's status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns [`StoryLifecycleError::InvalidStatus`] for a string outside
    /// the closed status set.
    pub async fn update_status(
        &self,
        story_id: StoryId,
        status: &str,
    ) -> StoryLifecycleResult<UserStory> {
        let parsed = StoryStatus::try_from(status)?;
        let mut story = self.require_story(story_id).await?;
        story.set_status(parsed, &*self.clock);
        self.stories.update(&story).await?;
        Ok(story)
    }

    /// Records the acceptance evaluation of a story.
    ///
    /// Every sprint in the story's history must still exist; the domain then
    /// applies the verdict (acceptance completes the story, rejection
    /// demands a comment and clears the sprint set).
    ///
    /// # Errors
    ///
    /// Returns [`StoryLifecycleError::SprintNotFound`] when a referenced
    /// sprint is missing, or a domain error from the verdict rules.
    pub async fn evaluate(
        &self,
        story_id: StoryId,
        request: EvaluateStoryRequest,
    ) -> StoryLifecycleResult<UserStory> {
        let mut story = self.require_story(story_id).await?;
        for sprint_id in story.sprints() {
            if self.sprints.find_by_id(*sprint_id).await?.is_none() {
                return Err(StoryLifecycleError::SprintNotFound(*sprint_id));
            }
        }
        story.evaluate(
            request.accepted,
            request.comment.as_deref(),
            request.evaluated_by,
            &*self.clock,
        )?;
        self.stories.update(&story).await?;
        Ok(story)
    }

    /// Deletes a story that belongs to no sprint.
    ///
    /// # Errors
    ///
    /// Returns [`StoryLifecycleError::StoryInSprint`] while the sprint set
    /// is non-empty.
    pub async fn delete_story(&self, story_id: StoryId) -> StoryLifecycleResult<()> {
        let story = self.require_story(story_id).await?;
        if story.in_sprint() {
            return Err(StoryLifecycleError::StoryInSprint(story_id));
        }
        self.stories.delete(story_id).await?;
        Ok(())
    }

    /// Sets a story's point estimate.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the value falls outside 0..=99 or the
    /// story currently belongs to a sprint.
    pub async fn set_story_points(
        &self,
        story_id: StoryId,
        points: u32,
    ) -> StoryLifecycleResult<UserStory> {
        let mut story = self.require_story(story_id).await?;
        story.set_story_points(StoryPoints::new(points)?, &*self.clock)?;
        self.stories.update(&story).await?;
        Ok(story)
    }

    /// Retrieves a story by identifier.
    ///
    /// Returns `Ok(None)` when the story does not exist.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the lookup fails.
    pub async fn find_story(&self, story_id: StoryId) -> StoryLifecycleResult<Option<UserStory>> {
        Ok(self.stories.find_by_id(story_id).await?)
    }

    /// Lists a project's stories.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> StoryLifecycleResult<Vec<UserStory>> {
        Ok(self.stories.list_for_project(project_id).await?)
    }

    async fn require_story(&self, story_id: StoryId) -> StoryLifecycleResult<UserStory> {
        self.stories
            .find_by_id(story_id)
            .await?
            .ok_or(StoryLifecycleError::StoryNotFound(story_id))
    }

    async fn ensure_unique_name(
        &self,
        project_id: ProjectId,
        name: &str,
        exclude: Option<StoryId>,
    ) -> StoryLifecycleResult<()> {
        let needle = name.trim().to_lowercase();
        let siblings = self.stories.list_for_project(project_id).await?;
        for sibling in siblings {
            if Some(sibling.id()) == exclude {
                continue;
            }
            if sibling.name().trim().to_lowercase() == needle {
                return Err(StoryLifecycleError::DuplicateStoryName(
                    sibling.name().to_owned(),
                ));
            }
        }
        Ok(())
    }
}
