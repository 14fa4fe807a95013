//! Error types for story domain validation and parsing.

use super::SubtaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating story domain values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoryDomainError {
    /// The story name is empty after trimming.
    #[error("story name must not be empty")]
    EmptyStoryName,

    /// The story description is empty after trimming.
    #[error("story description must not be empty")]
    EmptyDescription,

    /// The acceptance criteria list is empty.
    #[error("at least one acceptance criterion is required")]
    EmptyAcceptanceCriteria,

    /// An acceptance criterion is blank.
    #[error("acceptance criterion {0} must not be blank")]
    BlankAcceptanceCriterion(usize),

    /// The subtask description is empty after trimming.
    #[error("subtask description must not be empty")]
    EmptySubtaskDescription,

    /// An hour quantity is negative, NaN, or infinite.
    #[error("expected a finite, non-negative number of hours, got {0}")]
    InvalidHours(f64),

    /// Story points fall outside the allowed 0..=99 range.
    #[error("story points must lie in 0..=99, got {0}")]
    StoryPointsOutOfRange(u32),

    /// Story points may only change while the story is in no sprint.
    #[error("story points cannot change while the story is assigned to a sprint")]
    StoryPointsWhileInSprint,

    /// Subtasks require at least one sprint assignment.
    #[error("subtasks cannot be added before the story joins a sprint")]
    SubtaskBeforeSprint,

    /// No live subtask carries the identifier.
    #[error("unknown subtask: {0}")]
    UnknownSubtask(SubtaskId),

    /// The subtask is claimed and cannot be removed.
    #[error("subtask {0} is claimed and cannot be removed")]
    SubtaskClaimed(SubtaskId),

    /// A recording session holds the subtask; it cannot be removed.
    #[error("subtask {0} has an active recording and cannot be removed")]
    SubtaskRecording(SubtaskId),

    /// The subtask was already soft-deleted.
    #[error("subtask {0} is already deleted")]
    SubtaskAlreadyDeleted(SubtaskId),

    /// The story is done; its subtasks can no longer be removed.
    #[error("subtasks cannot be removed from a done story")]
    StoryAlreadyDone,

    /// Evaluation requires at least one sprint assignment.
    #[error("the story has never been assigned to a sprint")]
    EvaluationWithoutSprint,

    /// A rejection requires an explanatory comment.
    #[error("a rejection comment is required")]
    MissingRejectionComment,

    /// Another recording session is already active on the story.
    #[error("a recording is already active on subtask {0}")]
    RecordingAlreadyActive(SubtaskId),

    /// No recording session is active for the subtask.
    #[error("no active recording on subtask {0}")]
    NoActiveRecording(SubtaskId),

    /// No work-time entry exists at the index on the subtask.
    #[error("subtask {subtask} has no work-time entry {index}")]
    UnknownWorkTime {
        /// The addressed subtask.
        subtask: SubtaskId,
        /// The out-of-range entry index.
        index: usize,
    },
}

/// Error returned while parsing story statuses from callers or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown story status: {0}")]
pub struct ParseStoryStatusError(pub String);

/// Error returned while parsing story priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown story priority: {0}")]
pub struct ParsePriorityError(pub String);
