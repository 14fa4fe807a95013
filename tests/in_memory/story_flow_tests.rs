//! Integration tests for the story lifecycle across all services.

use super::helpers::{Engine, date, story_request, user};
use burndown::story::domain::{ClaimOutcome, StoryDomainError, StoryStatus};
use burndown::story::services::{
    EvaluateStoryRequest, NewSubtask, StoryLifecycleError, SubtaskError,
};
use rstest::{fixture, rstest};

#[fixture]
fn engine() -> Engine {
    Engine::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn story_names_are_unique_per_project_ignoring_case(engine: Engine) {
    let project = engine.seed_project("Apollo").await;
    engine.seed_story(&project, "Login").await;

    let result = engine
        .lifecycle
        .create_story(story_request(&project, "login"))
        .await;
    assert!(matches!(
        result,
        Err(StoryLifecycleError::DuplicateStoryName(name)) if name == "Login"
    ));

    // A different project is a different namespace.
    let other = engine.seed_project("Gemini").await;
    engine.seed_story(&other, "login").await;
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subtasks_require_a_sprint_assignment_first(engine: Engine) {
    let project = engine.seed_project("Apollo").await;
    let story = engine.seed_story(&project, "Login").await;

    let result = engine
        .subtasks
        .add_subtask(story.id(), NewSubtask::new("write form", 4.0))
        .await;
    assert!(matches!(
        result,
        Err(SubtaskError::Domain(StoryDomainError::SubtaskBeforeSprint))
    ));

    let sprint = engine
        .seed_sprint("Apollo", date(2025, 4, 1), date(2025, 4, 14), 20)
        .await;
    engine
        .lifecycle
        .assign_to_sprint(story.id(), sprint.id())
        .await
        .expect("assignment succeeds");
    engine
        .subtasks
        .add_subtask(story.id(), NewSubtask::new("write form", 4.0))
        .await
        .expect("subtask added");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn claiming_is_an_involution(engine: Engine) {
    let project = engine.seed_project("Apollo").await;
    let sprint = engine
        .seed_sprint("Apollo", date(2025, 4, 1), date(2025, 4, 14), 20)
        .await;
    let story = engine.seed_story(&project, "Login").await;
    engine
        .lifecycle
        .assign_to_sprint(story.id(), sprint.id())
        .await
        .expect("assignment succeeds");
    let alice = engine.seed_developer("alice", "Alice Martin");
    let subtask = engine
        .subtasks
        .add_subtask(story.id(), NewSubtask::new("write form", 4.0))
        .await
        .expect("subtask added");

    let claimed = engine
        .subtasks
        .claim_subtask(story.id(), subtask, alice.clone())
        .await
        .expect("claim succeeds");
    assert_eq!(claimed, ClaimOutcome::Claimed);
    let during = engine
        .lifecycle
        .find_story(story.id())
        .await
        .expect("lookup succeeds")
        .expect("story exists");
    assert_eq!(during.status(), StoryStatus::InProgress);

    let released = engine
        .subtasks
        .claim_subtask(story.id(), subtask, alice)
        .await
        .expect("claim succeeds");
    assert_eq!(released, ClaimOutcome::Released);
    let after = engine
        .lifecycle
        .find_story(story.id())
        .await
        .expect("lookup succeeds")
        .expect("story exists");
    assert_eq!(after.status(), StoryStatus::ProductBacklog);
    assert!(
        after
            .subtask(subtask)
            .expect("subtask exists")
            .assignee()
            .is_none()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn the_story_is_done_exactly_when_all_live_subtasks_are(engine: Engine) {
    let project = engine.seed_project("Apollo").await;
    let sprint = engine
        .seed_sprint("Apollo", date(2025, 4, 1), date(2025, 4, 14), 20)
        .await;
    let story = engine.seed_story(&project, "Login").await;
    engine
        .lifecycle
        .assign_to_sprint(story.id(), sprint.id())
        .await
        .expect("assignment succeeds");

    let first = engine
        .subtasks
        .add_subtask(story.id(), NewSubtask::new("write form", 4.0))
        .await
        .expect("subtask added");
    let second = engine
        .subtasks
        .add_subtask(story.id(), NewSubtask::new("wire backend", 6.0))
        .await
        .expect("subtask added");

    engine
        .subtasks
        .complete_subtask(story.id(), first)
        .await
        .expect("toggle succeeds");
    let partial = engine
        .lifecycle
        .find_story(story.id())
        .await
        .expect("lookup succeeds")
        .expect("story exists");
    assert_ne!(partial.status(), StoryStatus::Done);

    engine
        .subtasks
        .complete_subtask(story.id(), second)
        .await
        .expect("toggle succeeds");
    let done = engine
        .lifecycle
        .find_story(story.id())
        .await
        .expect("lookup succeeds")
        .expect("story exists");
    assert_eq!(done.status(), StoryStatus::Done);

    // Toggling one back re-opens the story.
    engine
        .subtasks
        .complete_subtask(story.id(), first)
        .await
        .expect("toggle succeeds");
    let reopened = engine
        .lifecycle
        .find_story(story.id())
        .await
        .expect("lookup succeeds")
        .expect("story exists");
    assert_eq!(reopened.status(), StoryStatus::InProgress);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removal_keeps_the_entry_as_a_soft_deleted_record(engine: Engine) {
    let project = engine.seed_project("Apollo").await;
    let sprint = engine
        .seed_sprint("Apollo", date(2025, 4, 1), date(2025, 4, 14), 20)
        .await;
    let story = engine.seed_story(&project, "Login").await;
    engine
        .lifecycle
        .assign_to_sprint(story.id(), sprint.id())
        .await
        .expect("assignment succeeds");

    let done = engine
        .subtasks
        .add_subtask(story.id(), NewSubtask::new("write form", 4.0))
        .await
        .expect("subtask added");
    let straggler = engine
        .subtasks
        .add_subtask(story.id(), NewSubtask::new("polish", 1.0))
        .await
        .expect("subtask added");
    engine
        .subtasks
        .complete_subtask(story.id(), done)
        .await
        .expect("toggle succeeds");

    engine
        .subtasks
        .remove_subtask(story.id(), straggler)
        .await
        .expect("removal succeeds");
    let stored = engine
        .lifecycle
        .find_story(story.id())
        .await
        .expect("lookup succeeds")
        .expect("story exists");
    assert!(
        stored
            .subtask(straggler)
            .expect("entry retained")
            .is_deleted()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn evaluation_closes_or_recycles_the_story(engine: Engine) {
    let project = engine.seed_project("Apollo").await;
    let sprint = engine
        .seed_sprint("Apollo", date(2025, 4, 1), date(2025, 4, 14), 20)
        .await;
    let po = user("po");

    let accepted = engine.seed_story(&project, "Login").await;
    engine
        .lifecycle
        .assign_to_sprint(accepted.id(), sprint.id())
        .await
        .expect("assignment succeeds");
    let evaluated = engine
        .lifecycle
        .evaluate(accepted.id(), EvaluateStoryRequest::accepted(po.clone()))
        .await
        .expect("evaluation succeeds");
    assert_eq!(evaluated.status(), StoryStatus::Completed);
    assert!(evaluated.in_sprint());

    let rejected = engine.seed_story(&project, "Search").await;
    engine
        .lifecycle
        .assign_to_sprint(rejected.id(), sprint.id())
        .await
        .expect("assignment succeeds");
    let evaluated = engine
        .lifecycle
        .evaluate(
            rejected.id(),
            EvaluateStoryRequest::rejected(po, "pagination missing"),
        )
        .await
        .expect("evaluation succeeds");
    assert_eq!(evaluated.status(), StoryStatus::Rejected);
    assert!(!evaluated.in_sprint());

    // Back in the pool, the rejected story can now be deleted.
    engine
        .lifecycle
        .delete_story(evaluated.id())
        .await
        .expect("deletion succeeds");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_departing_developer_releases_claims_across_stories(engine: Engine) {
    let project = engine.seed_project("Apollo").await;
    let sprint = engine
        .seed_sprint("Apollo", date(2025, 4, 1), date(2025, 4, 14), 20)
        .await;
    let alice = engine.seed_developer("alice", "Alice Martin");
    let bob = engine.seed_developer("bob", "Bob Stone");

    let mut stories = Vec::new();
    for name in ["Login", "Search"] {
        let story = engine.seed_story(&project, name).await;
        engine
            .lifecycle
            .assign_to_sprint(story.id(), sprint.id())
            .await
            .expect("assignment succeeds");
        let subtask = engine
            .subtasks
            .add_subtask(story.id(), NewSubtask::new("build it", 4.0))
            .await
            .expect("subtask added");
        engine
            .subtasks
            .claim_subtask(story.id(), subtask, alice.clone())
            .await
            .expect("claim succeeds");
        stories.push(story.id());
    }
    let third = engine.seed_story(&project, "Export").await;
    engine
        .lifecycle
        .assign_to_sprint(third.id(), sprint.id())
        .await
        .expect("assignment succeeds");
    let kept = engine
        .subtasks
        .add_subtask(third.id(), NewSubtask::new("keep me", 2.0))
        .await
        .expect("subtask added");
    engine
        .subtasks
        .claim_subtask(third.id(), kept, bob.clone())
        .await
        .expect("claim succeeds");

    let report = engine
        .subtasks
        .release_user_assignments(&alice)
        .await
        .expect("release succeeds");
    assert_eq!(report.released, 2);
    assert!(report.failures.is_empty());

    for story_id in stories {
        let story = engine
            .lifecycle
            .find_story(story_id)
            .await
            .expect("lookup succeeds")
            .expect("story exists");
        assert_eq!(story.status(), StoryStatus::ProductBacklog);
    }
    let untouched = engine
        .lifecycle
        .find_story(third.id())
        .await
        .expect("lookup succeeds")
        .expect("story exists");
    assert_eq!(
        untouched
            .subtask(kept)
            .expect("subtask exists")
            .assignee()
            .map(|a| a.user.clone()),
        Some(bob)
    );
}
