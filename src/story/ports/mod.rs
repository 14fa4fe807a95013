//! Port contracts for user-story lifecycle management.

pub mod repository;

pub use repository::{StoryRepository, StoryRepositoryError, StoryRepositoryResult};
