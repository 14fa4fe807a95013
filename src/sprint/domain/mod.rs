//! Domain model for sprint scheduling.
//!
//! A sprint is a dated capacity window inside a project. The domain enforces
//! the ordering of its inclusive date range locally; the cross-sprint
//! no-overlap invariant needs the project's other sprints and therefore lives
//! in the scheduling service.

mod error;
mod ids;
mod sprint;

pub use error::SprintDomainError;
pub use ids::SprintId;
pub use sprint::{Sprint, SprintUpdate};
