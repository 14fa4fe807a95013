//! Service layer for subtask creation, claiming, completion, and removal.

use crate::identity::domain::UserId;
use crate::identity::ports::{UserDirectory, UserDirectoryError};
use crate::story::{
    domain::{
        Assignee, ClaimOutcome, StoryDomainError, StoryId, SubtaskId, SubtaskUpdate, UserStory,
    },
    ports::{StoryRepository, StoryRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for adding a subtask to a story.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubtask {
    description: String,
    time_estimate_hours: f64,
    developer: Option<UserId>,
}

impl NewSubtask {
    /// Creates a request with the required subtask fields.
    #[must_use]
    pub fn new(description: impl Into<String>, time_estimate_hours: f64) -> Self {
        Self {
            description: description.into(),
            time_estimate_hours,
            developer: None,
        }
    }

    /// Sets an initial assignee.
    #[must_use]
    pub fn with_developer(mut self, developer: UserId) -> Self {
        self.developer = Some(developer);
        self
    }
}

/// Request payload for a partial subtask update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtaskUpdateRequest {
    description: Option<String>,
    time_estimate_hours: Option<f64>,
    developer: Option<UserId>,
}

impl SubtaskUpdateRequest {
    /// Creates an empty update request.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            description: None,
            time_estimate_hours: None,
            developer: None,
        }
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement effort estimate in hours.
    #[must_use]
    pub const fn with_time_estimate_hours(mut self, hours: f64) -> Self {
        self.time_estimate_hours = Some(hours);
        self
    }

    /// Sets the replacement assignee.
    #[must_use]
    pub fn with_developer(mut self, developer: UserId) -> Self {
        self.developer = Some(developer);
        self
    }
}

/// One story that could not be updated during a batch claim release.
#[derive(Debug, Clone)]
pub struct ReleaseFailure {
    /// The story whose write failed.
    pub story: StoryId,
    /// Human-readable description of the failure.
    pub reason: String,
}

/// Aggregate outcome of a batch claim release.
///
/// Each story's update is independent; one failed write never aborts the
/// rest of the batch.
#[derive(Debug, Clone, Default)]
pub struct ReleaseReport {
    /// Total subtasks released across all successfully updated stories.
    pub released: usize,
    /// Stories whose update failed, with reasons.
    pub failures: Vec<ReleaseFailure>,
}

/// Service-level errors for subtask operations.
#[derive(Debug, Error)]
pub enum SubtaskError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] StoryDomainError),

    /// The story does not exist.
    #[error("story not found: {0}")]
    StoryNotFound(StoryId),

    /// The identity provider does not know the developer.
    #[error("unknown developer: {0}")]
    UserNotFound(UserId),

    /// Story persistence failed.
    #[error(transparent)]
    Repository(#[from] StoryRepositoryError),

    /// Display-name resolution failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
}

/// Result type for subtask operations.
pub type SubtaskResult<T> = Result<T, SubtaskError>;

/// Subtask orchestration service.
#[derive(Clone)]
pub struct SubtaskService<S, D, C>
where
    S: StoryRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    stories: Arc<S>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<S, D, C> SubtaskService<S, D, C>
where
    S: StoryRepository,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new subtask service.
    #[must_use]
    pub const fn new(stories: Arc<S>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            stories,
            directory,
            clock,
        }
    }

    /// Adds a subtask to a story, reopening it when it was done.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the story has no sprint assignment or a
    /// field is invalid, or [`SubtaskError::UserNotFound`] when the initial
    /// assignee cannot be resolved.
    pub async fn add_subtask(
        &self,
        story_id: StoryId,
        request: NewSubtask,
    ) -> SubtaskResult<SubtaskId> {
        let mut story = self.require_story(story_id).await?;
        let assignee = match request.developer {
            Some(user) => Some(self.resolve_assignee(user).await?),
            None => None,
        };
        let subtask_id = story.add_subtask(
            request.description,
            request.time_estimate_hours,
            assignee,
            &*self.clock,
        )?;
        self.stories.update(&story).await?;
        Ok(subtask_id)
    }

    /// Toggles a developer's claim on a subtask.
    ///
    /// Claiming an unclaimed subtask (or one held by someone else) assigns
    /// the developer; claiming one's own subtask releases it. The story
    /// status is recomputed from the remaining claims.
    ///
    /// # Errors
    ///
    /// Returns [`SubtaskError::UserNotFound`] when the developer cannot be
    /// resolved, or a domain error when the subtask is unknown.
    pub async fn claim_subtask(
        &self,
        story_id: StoryId,
        subtask_id: SubtaskId,
        user: UserId,
    ) -> SubtaskResult<ClaimOutcome> {
        let mut story = self.require_story(story_id).await?;
        let assignee = self.resolve_assignee(user).await?;
        let outcome =
            story.claim_subtask(subtask_id, assignee.user, assignee.display_name, &*self.clock)?;
        self.stories.update(&story).await?;
        Ok(outcome)
    }

    /// Toggles a subtask's completion flag, recomputing the story status.
    ///
    /// Returns whether the subtask is now done.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the subtask is unknown.
    pub async fn complete_subtask(
        &self,
        story_id: StoryId,
        subtask_id: SubtaskId,
    ) -> SubtaskResult<bool> {
        let mut story = self.require_story(story_id).await?;
        let now_done = story.toggle_subtask_done(subtask_id, &*self.clock)?;
        self.stories.update(&story).await?;
        Ok(now_done)
    }

    /// Soft-deletes a subtask.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the story is done, the subtask is
    /// claimed, or it was already removed.
    pub async fn remove_subtask(
        &self,
        story_id: StoryId,
        subtask_id: SubtaskId,
    ) -> SubtaskResult<()> {
        let mut story = self.require_story(story_id).await?;
        story.remove_subtask(subtask_id, &*self.clock)?;
        self.stories.update(&story).await?;
        Ok(())
    }

    /// Applies a partial update to a subtask.
    ///
    /// # Errors
    ///
    /// Returns [`SubtaskError::UserNotFound`] when a replacement assignee
    /// cannot be resolved, or a domain error for invalid fields.
    pub async fn update_subtask(
        &self,
        story_id: StoryId,
        subtask_id: SubtaskId,
        request: SubtaskUpdateRequest,
    ) -> SubtaskResult<()> {
        let mut story = self.require_story(story_id).await?;
        let mut update = SubtaskUpdate::new();
        if let Some(description) = request.description {
            update = update.with_description(description);
        }
        if let Some(hours) = request.time_estimate_hours {
            update = update.with_time_estimate_hours(hours);
        }
        if let Some(user) = request.developer {
            update = update.with_assignee(self.resolve_assignee(user).await?);
        }
        story.update_subtask(subtask_id, update, &*self.clock)?;
        self.stories.update(&story).await?;
        Ok(())
    }

    /// Releases every claim held by a developer across all stories.
    ///
    /// Used when a developer leaves: their subtasks return to the unclaimed
    /// pool. Each story is written independently; failures are collected
    /// into the report instead of aborting the batch.
    ///
    /// # Errors
    ///
    /// Returns a repository error only when the initial story scan fails;
    /// per-story write failures are reported, not raised.
    pub async fn release_user_assignments(&self, user: &UserId) -> SubtaskResult<ReleaseReport> {
        let stories = self.stories.list_all().await?;
        let mut report = ReleaseReport::default();
        for mut story in stories {
            let released = story.release_assignments(user, &*self.clock);
            if released == 0 {
                continue;
            }
            match self.stories.update(&story).await {
                Ok(()) => report.released += released,
                Err(err) => report.failures.push(ReleaseFailure {
                    story: story.id(),
                    reason: err.to_string(),
                }),
            }
        }
        Ok(report)
    }

    async fn require_story(&self, story_id: StoryId) -> SubtaskResult<UserStory> {
        self.stories
            .find_by_id(story_id)
            .await?
            .ok_or(SubtaskError::StoryNotFound(story_id))
    }

    async fn resolve_assignee(&self, user: UserId) -> SubtaskResult<Assignee> {
        let display_name = self
            .directory
            .display_name(&user)
            .await?
            .ok_or_else(|| SubtaskError::UserNotFound(user.clone()))?;
        Ok(Assignee { user, display_name })
    }
}
