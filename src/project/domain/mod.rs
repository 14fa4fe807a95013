//! Domain model for projects.

mod error;
mod ids;
mod project;

pub use error::ProjectDomainError;
pub use ids::ProjectId;
pub use project::{Project, ProjectRoles};
