//! Repository port for story persistence, lookup, and scans.

use crate::project::domain::ProjectId;
use crate::sprint::domain::SprintId;
use crate::story::domain::{StoryId, UserStory};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for story repository operations.
pub type StoryRepositoryResult<T> = Result<T, StoryRepositoryError>;

/// Story persistence contract.
///
/// Each story is one document; `store` and `update` write the aggregate
/// whole, which is the per-document atomicity the backing store guarantees.
/// Cross-document scans (`list_all`) power the timesheet view and batch
/// claim-release, both of which iterate every story.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Stores a new story.
    ///
    /// # Errors
    ///
    /// Returns [`StoryRepositoryError::DuplicateStory`] when the story ID
    /// already exists.
    async fn store(&self, story: &UserStory) -> StoryRepositoryResult<()>;

    /// Persists changes to an existing story.
    ///
    /// # Errors
    ///
    /// Returns [`StoryRepositoryError::NotFound`] when the story does not
    /// exist.
    async fn update(&self, story: &UserStory) -> StoryRepositoryResult<()>;

    /// Deletes a story.
    ///
    /// # Errors
    ///
    /// Returns [`StoryRepositoryError::NotFound`] when the story does not
    /// exist.
    async fn delete(&self, id: StoryId) -> StoryRepositoryResult<()>;

    /// Finds a story by identifier.
    ///
    /// Returns `None` when the story does not exist.
    async fn find_by_id(&self, id: StoryId) -> StoryRepositoryResult<Option<UserStory>>;

    /// Returns all stories of the given project.
    async fn list_for_project(&self, project_id: ProjectId)
    -> StoryRepositoryResult<Vec<UserStory>>;

    /// Returns all stories currently assigned to the given sprint.
    async fn list_for_sprint(&self, sprint_id: SprintId) -> StoryRepositoryResult<Vec<UserStory>>;

    /// Returns every stored story.
    async fn list_all(&self) -> StoryRepositoryResult<Vec<UserStory>>;
}

/// Errors returned by story repository implementations.
#[derive(Debug, Clone, Error)]
pub enum StoryRepositoryError {
    /// A story with the same identifier already exists.
    #[error("duplicate story identifier: {0}")]
    DuplicateStory(StoryId),

    /// The story was not found.
    #[error("story not found: {0}")]
    NotFound(StoryId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
