//! Port contracts for sprint scheduling.

pub mod repository;

pub use repository::{SprintRepository, SprintRepositoryError, SprintRepositoryResult};
