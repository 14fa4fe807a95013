//! In-memory story repository for tests and local wiring.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::project::domain::ProjectId;
use crate::sprint::domain::SprintId;
use crate::story::{
    domain::{StoryId, UserStory},
    ports::{StoryRepository, StoryRepositoryError, StoryRepositoryResult},
};

/// Thread-safe in-memory story repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoryRepository {
    state: Arc<RwLock<HashMap<StoryId, UserStory>>>,
}

impl InMemoryStoryRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_err(err: impl std::fmt::Display) -> StoryRepositoryError {
        StoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
    }

    fn collect_sorted<F>(&self, keep: F) -> StoryRepositoryResult<Vec<UserStory>>
    where
        F: Fn(&UserStory) -> bool,
    {
        let state = self.state.read().map_err(Self::lock_err)?;
        let mut stories: Vec<UserStory> = state.values().filter(|s| keep(s)).cloned().collect();
        stories.sort_by_key(|story| (story.created_at(), story.id()));
        Ok(stories)
    }
}

#[async_trait]
impl StoryRepository for InMemoryStoryRepository {
    async fn store(&self, story: &UserStory) -> StoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(Self::lock_err)?;
        if state.contains_key(&story.id()) {
            return Err(StoryRepositoryError::DuplicateStory(story.id()));
        }
        state.insert(story.id(), story.clone());
        Ok(())
    }

    async fn update(&self, story: &UserStory) -> StoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(Self::lock_err)?;
        if !state.contains_key(&story.id()) {
            return Err(StoryRepositoryError::NotFound(story.id()));
        }
        state.insert(story.id(), story.clone());
        Ok(())
    }

    async fn delete(&self, id: StoryId) -> StoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(Self::lock_err)?;
        if state.remove(&id).is_none() {
            return Err(StoryRepositoryError::NotFound(id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: StoryId) -> StoryRepositoryResult<Option<UserStory>> {
        let state = self.state.read().map_err(Self::lock_err)?;
        Ok(state.get(&id).cloned())
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> StoryRepositoryResult<Vec<UserStory>> {
        self.collect_sorted(|story| story.project_id() == project_id)
    }

    async fn list_for_sprint(&self, sprint_id: SprintId) -> StoryRepositoryResult<Vec<UserStory>> {
        self.collect_sorted(|story| story.sprints().contains(&sprint_id))
    }

    async fn list_all(&self) -> StoryRepositoryResult<Vec<UserStory>> {
        self.collect_sorted(|_| true)
    }
}
