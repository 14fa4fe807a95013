//! In-memory sprint repository for tests and local wiring.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::project::domain::ProjectId;
use crate::sprint::{
    domain::{Sprint, SprintId},
    ports::{SprintRepository, SprintRepositoryError, SprintRepositoryResult},
};

/// Thread-safe in-memory sprint repository.
#[derive(Debug, Clone, Default)]
pub struct InMemorySprintRepository {
    state: Arc<RwLock<HashMap<SprintId, Sprint>>>,
}

impl InMemorySprintRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_err(err: impl std::fmt::Display) -> SprintRepositoryError {
        SprintRepositoryError::persistence(std::io::Error::other(err.to_string()))
    }
}

#[async_trait]
impl SprintRepository for InMemorySprintRepository {
    async fn store(&self, sprint: &Sprint) -> SprintRepositoryResult<()> {
        let mut state = self.state.write().map_err(Self::lock_err)?;
        if state.contains_key(&sprint.id()) {
            return Err(SprintRepositoryError::DuplicateSprint(sprint.id()));
        }
        state.insert(sprint.id(), sprint.clone());
        Ok(())
    }

    async fn update(&self, sprint: &Sprint) -> SprintRepositoryResult<()> {
        let mut state = self.state.write().map_err(Self::lock_err)?;
        if !state.contains_key(&sprint.id()) {
            return Err(SprintRepositoryError::NotFound(sprint.id()));
        }
        state.insert(sprint.id(), sprint.clone());
        Ok(())
    }

    async fn delete(&self, id: SprintId) -> SprintRepositoryResult<()> {
        let mut state = self.state.write().map_err(Self::lock_err)?;
        if state.remove(&id).is_none() {
            return Err(SprintRepositoryError::NotFound(id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: SprintId) -> SprintRepositoryResult<Option<Sprint>> {
        let state = self.state.read().map_err(Self::lock_err)?;
        Ok(state.get(&id).cloned())
    }

    async fn list_for_project(&self, project_id: ProjectId) -> SprintRepositoryResult<Vec<Sprint>> {
        let state = self.state.read().map_err(Self::lock_err)?;
        let mut sprints: Vec<Sprint> = state
            .values()
            .filter(|sprint| sprint.project_id() == project_id)
            .cloned()
            .collect();
        sprints.sort_by_key(Sprint::start_date);
        Ok(sprints)
    }
}
