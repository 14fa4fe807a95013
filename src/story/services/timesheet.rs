//! Service layer for time recording and per-developer timesheets.

use crate::identity::domain::UserId;
use crate::story::{
    domain::{StoryDomainError, StoryId, SubtaskId, UserStory, WorkTime, WorkTimeUpdate},
    ports::{StoryRepository, StoryRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// One subtask in a developer's timesheet view.
///
/// Carries the stable subtask identifier so retroactive corrections can be
/// addressed later, and only the requesting developer's entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtaskTimesheet {
    /// Stable identifier for addressed updates.
    pub subtask: SubtaskId,
    /// Subtask description at read time.
    pub description: String,
    /// The developer's work-time entries, paired with their stored index.
    pub entries: Vec<(usize, WorkTime)>,
}

/// One story in a developer's timesheet view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryTimesheet {
    /// The story the effort was recorded on.
    pub story: StoryId,
    /// Story name at read time.
    pub name: String,
    /// Subtasks holding at least one of the developer's entries.
    pub subtasks: Vec<SubtaskTimesheet>,
}

/// Service-level errors for time recording operations.
#[derive(Debug, Error)]
pub enum TimeRecordingError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] StoryDomainError),

    /// The story does not exist.
    #[error("story not found: {0}")]
    StoryNotFound(StoryId),

    /// Story persistence failed.
    #[error(transparent)]
    Repository(#[from] StoryRepositoryError),
}

/// Result type for time recording operations.
pub type TimeRecordingResult<T> = Result<T, TimeRecordingError>;

/// Time recording orchestration service.
#[derive(Clone)]
pub struct TimeRecordingService<S, C>
where
    S: StoryRepository,
    C: Clock + Send + Sync,
{
    stories: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> TimeRecordingService<S, C>
where
    S: StoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new time recording service.
    #[must_use]
    pub const fn new(stories: Arc<S>, clock: Arc<C>) -> Self {
        Self { stories, clock }
    }

    /// Starts the stopwatch on a subtask.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the story's recording slot is already
    /// held or the subtask does not exist.
    pub async fn start_recording(
        &self,
        story_id: StoryId,
        subtask_id: SubtaskId,
    ) -> TimeRecordingResult<()> {
        let mut story = self.require_story(story_id).await?;
        story.start_recording(subtask_id, &*self.clock)?;
        self.stories.update(&story).await?;
        Ok(())
    }

    /// Stops the stopwatch and books the elapsed whole seconds.
    ///
    /// The duration is merged into the developer's entry for today's
    /// calendar date. Returns the booked seconds.
    ///
    /// # Errors
    ///
    /// Returns a domain error when no recording is active for the subtask.
    pub async fn stop_recording(
        &self,
        story_id: StoryId,
        subtask_id: SubtaskId,
        user: UserId,
    ) -> TimeRecordingResult<u64> {
        let mut story = self.require_story(story_id).await?;
        let seconds = story.stop_recording(subtask_id, user, &*self.clock)?;
        self.stories.update(&story).await?;
        Ok(seconds)
    }

    /// Applies a retroactive correction to one work-time entry.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the subtask or entry index does not
    /// resolve.
    pub async fn update_work_time(
        &self,
        story_id: StoryId,
        subtask_id: SubtaskId,
        entry_index: usize,
        update: WorkTimeUpdate,
    ) -> TimeRecordingResult<()> {
        let mut story = self.require_story(story_id).await?;
        story.update_work_time(subtask_id, entry_index, update, &*self.clock)?;
        self.stories.update(&story).await?;
        Ok(())
    }

    /// Sets the predicted finish estimate on a subtask.
    ///
    /// The estimate is one revisable field per subtask, not one per
    /// work-time entry.
    ///
    /// # Errors
    ///
    /// Returns a domain error for a non-finite or negative value or an
    /// unknown subtask.
    pub async fn update_predicted_time(
        &self,
        story_id: StoryId,
        subtask_id: SubtaskId,
        hours: f64,
    ) -> TimeRecordingResult<()> {
        let mut story = self.require_story(story_id).await?;
        story.set_predicted_time(subtask_id, hours, &*self.clock)?;
        self.stories.update(&story).await?;
        Ok(())
    }

    /// Builds a developer's timesheet across every story.
    ///
    /// Includes each story with at least one subtask holding one of the
    /// developer's entries; subtasks and entries are filtered to that
    /// developer. Soft-deleted subtasks stay visible — their recorded time
    /// is history, not garbage.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the story scan fails.
    pub async fn list_work_times(&self, user: &UserId) -> TimeRecordingResult<Vec<StoryTimesheet>> {
        let stories = self.stories.list_all().await?;
        let mut timesheets = Vec::new();
        for story in stories {
            let subtasks = Self::subtask_views(&story, user);
            if subtasks.is_empty() {
                continue;
            }
            timesheets.push(StoryTimesheet {
                story: story.id(),
                name: story.name().to_owned(),
                subtasks,
            });
        }
        Ok(timesheets)
    }

    fn subtask_views(story: &UserStory, user: &UserId) -> Vec<SubtaskTimesheet> {
        story
            .subtasks()
            .iter()
            .filter_map(|subtask| {
                let entries: Vec<(usize, WorkTime)> = subtask
                    .work_times()
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.developer() == user)
                    .map(|(index, entry)| (index, entry.clone()))
                    .collect();
                if entries.is_empty() {
                    return None;
                }
                Some(SubtaskTimesheet {
                    subtask: subtask.id(),
                    description: subtask.description().to_owned(),
                    entries,
                })
            })
            .collect()
    }

    async fn require_story(&self, story_id: StoryId) -> TimeRecordingResult<UserStory> {
        self.stories
            .find_by_id(story_id)
            .await?
            .ok_or(TimeRecordingError::StoryNotFound(story_id))
    }
}
