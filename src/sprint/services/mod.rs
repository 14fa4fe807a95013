//! Application services for sprint scheduling.

mod scheduler;

pub use scheduler::{
    CreateSprintRequest, SprintSchedulerError, SprintSchedulerResult, SprintSchedulerService,
};
