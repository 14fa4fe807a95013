//! Domain model for user-story lifecycle management.
//!
//! The story aggregate embeds its subtasks and their work-time entries, so
//! every lifecycle rule — claim toggling, completion recomputation, the
//! single active-recording slot — is enforced in one place and persisted with
//! one document write.

mod error;
mod evaluation;
mod ids;
mod points;
mod priority;
mod status;
mod story;
mod subtask;
mod worktime;

pub use error::{ParsePriorityError, ParseStoryStatusError, StoryDomainError};
pub use evaluation::{AcceptanceVerdict, Evaluation};
pub use ids::{StoryId, SubtaskId};
pub use points::StoryPoints;
pub use priority::Priority;
pub use status::StoryStatus;
pub use story::{ClaimOutcome, StoryDraft, UserStory};
pub use subtask::{Assignee, Subtask, SubtaskUpdate};
pub use worktime::{RecordingSession, WorkTime, WorkTimeUpdate};
