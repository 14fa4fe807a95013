//! Application services for the story lifecycle engine.

mod lifecycle;
mod subtask;
mod timesheet;

pub use lifecycle::{
    CreateStoryRequest, EvaluateStoryRequest, StoryLifecycleError, StoryLifecycleResult,
    StoryLifecycleService, UpdateStoryRequest,
};
pub use subtask::{
    NewSubtask, ReleaseFailure, ReleaseReport, SubtaskError, SubtaskResult, SubtaskService,
    SubtaskUpdateRequest,
};
pub use timesheet::{
    StoryTimesheet, SubtaskTimesheet, TimeRecordingError, TimeRecordingResult,
    TimeRecordingService,
};
