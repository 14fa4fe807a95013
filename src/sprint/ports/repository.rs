//! Repository port for sprint persistence and per-project listing.

use crate::project::domain::ProjectId;
use crate::sprint::domain::{Sprint, SprintId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for sprint repository operations.
pub type SprintRepositoryResult<T> = Result<T, SprintRepositoryError>;

/// Sprint persistence contract.
#[async_trait]
pub trait SprintRepository: Send + Sync {
    /// Stores a new sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintRepositoryError::DuplicateSprint`] when the sprint ID
    /// already exists.
    async fn store(&self, sprint: &Sprint) -> SprintRepositoryResult<()>;

    /// Persists changes to an existing sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintRepositoryError::NotFound`] when the sprint does not
    /// exist.
    async fn update(&self, sprint: &Sprint) -> SprintRepositoryResult<()>;

    /// Deletes a sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintRepositoryError::NotFound`] when the sprint does not
    /// exist.
    async fn delete(&self, id: SprintId) -> SprintRepositoryResult<()>;

    /// Finds a sprint by identifier.
    ///
    /// Returns `None` when the sprint does not exist.
    async fn find_by_id(&self, id: SprintId) -> SprintRepositoryResult<Option<Sprint>>;

    /// Returns all sprints of the given project.
    async fn list_for_project(&self, project_id: ProjectId) -> SprintRepositoryResult<Vec<Sprint>>;
}

/// Errors returned by sprint repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SprintRepositoryError {
    /// A sprint with the same identifier already exists.
    #[error("duplicate sprint identifier: {0}")]
    DuplicateSprint(SprintId),

    /// The sprint was not found.
    #[error("sprint not found: {0}")]
    NotFound(SprintId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SprintRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
