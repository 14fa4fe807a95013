//! Shared builders for story unit tests.

use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use crate::sprint::domain::SprintId;
use crate::story::domain::{Priority, StoryDraft, UserStory};
use crate::testing::ManualClock;

pub fn draft(name: &str) -> StoryDraft {
    StoryDraft::new(
        name,
        "As a user I want to sign in",
        vec!["session cookie issued".to_owned()],
        Priority::MustHave,
        500,
    )
    .expect("valid draft")
}

pub fn user(id: &str) -> UserId {
    UserId::new(id).expect("valid user id")
}

/// A freshly created story, not yet in any sprint.
pub fn backlog_story(clock: &ManualClock) -> UserStory {
    UserStory::new(ProjectId::new(), draft("Login"), clock)
}

/// A story already assigned to a sprint, so subtask operations are legal.
pub fn sprint_story(clock: &ManualClock) -> UserStory {
    let mut story = backlog_story(clock);
    story.assign_to_sprint(SprintId::new(), clock);
    story
}
