//! Integration tests for stopwatch recording and timesheets.

use super::helpers::{Engine, date};
use burndown::identity::domain::UserId;
use burndown::story::domain::{StoryDomainError, StoryId, SubtaskId, WorkTimeUpdate};
use burndown::story::services::{NewSubtask, TimeRecordingError};
use chrono::Duration;
use rstest::{fixture, rstest};

#[fixture]
fn engine() -> Engine {
    Engine::new()
}

async fn seed_story_with_subtask(engine: &Engine) -> (StoryId, SubtaskId) {
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
    let subtask = engine
        .subtasks
        .add_subtask(story.id(), NewSubtask::new("write form", 4.0))
        .await
        .expect("subtask added");
    (story.id(), subtask)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_session_books_exactly_the_elapsed_seconds(engine: Engine) {
    let (story, subtask) = seed_story_with_subtask(&engine).await;
    let alice = engine.seed_developer("alice", "Alice Martin");

    engine
        .recording
        .start_recording(story, subtask)
        .await
        .expect("recording starts");
    engine.clock.advance(Duration::seconds(3725));
    let booked = engine
        .recording
        .stop_recording(story, subtask, alice.clone())
        .await
        .expect("recording stops");
    assert_eq!(booked, 3725);

    let timesheets = engine
        .recording
        .list_work_times(&alice)
        .await
        .expect("read succeeds");
    let entry_seconds: u64 = timesheets
        .iter()
        .flat_map(|sheet| &sheet.subtasks)
        .flat_map(|sub| &sub.entries)
        .map(|(_, entry)| entry.seconds())
        .sum();
    assert_eq!(entry_seconds, 3725);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_one_stopwatch_runs_per_story(engine: Engine) {
    let (story, first) = seed_story_with_subtask(&engine).await;
    let second = engine
        .subtasks
        .add_subtask(story, NewSubtask::new("wire backend", 2.0))
        .await
        .expect("subtask added");

    engine
        .recording
        .start_recording(story, first)
        .await
        .expect("recording starts");
    let blocked = engine.recording.start_recording(story, second).await;
    assert!(matches!(
        blocked,
        Err(TimeRecordingError::Domain(
            StoryDomainError::RecordingAlreadyActive(held)
        )) if held == first
    ));

    // Stopping frees the slot for the next session.
    engine.clock.advance(Duration::minutes(5));
    engine
        .recording
        .stop_recording(story, first, engine.seed_developer("alice", "Alice Martin"))
        .await
        .expect("recording stops");
    engine
        .recording
        .start_recording(story, second)
        .await
        .expect("slot is free again");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn same_day_sessions_merge_and_corrections_overwrite(engine: Engine) {
    let (story, subtask) = seed_story_with_subtask(&engine).await;
    let alice = engine.seed_developer("alice", "Alice Martin");

    for minutes in [25, 35] {
        engine
            .recording
            .start_recording(story, subtask)
            .await
            .expect("recording starts");
        engine.clock.advance(Duration::minutes(minutes));
        engine
            .recording
            .stop_recording(story, subtask, alice.clone())
            .await
            .expect("recording stops");
    }

    let timesheets = engine
        .recording
        .list_work_times(&alice)
        .await
        .expect("read succeeds");
    let sheet = timesheets.first().expect("timesheet exists");
    let entries = &sheet.subtasks.first().expect("subtask sheet exists").entries;
    assert_eq!(entries.len(), 1);
    let (index, entry) = entries.first().expect("entry exists");
    assert_eq!(entry.seconds(), 3600);

    engine
        .recording
        .update_work_time(
            story,
            subtask,
            *index,
            WorkTimeUpdate::new().with_seconds(1800),
        )
        .await
        .expect("correction succeeds");
    let timesheets = engine
        .recording
        .list_work_times(&alice)
        .await
        .expect("read succeeds");
    let (_, corrected) = timesheets
        .first()
        .expect("timesheet exists")
        .subtasks
        .first()
        .expect("subtask sheet exists")
        .entries
        .first()
        .expect("entry exists")
        .clone();
    assert_eq!(corrected.seconds(), 1800);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sessions_on_different_days_create_separate_entries(engine: Engine) {
    let (story, subtask) = seed_story_with_subtask(&engine).await;
    let alice = engine.seed_developer("alice", "Alice Martin");

    for _ in 0..2 {
        engine
            .recording
            .start_recording(story, subtask)
            .await
            .expect("recording starts");
        engine.clock.advance(Duration::minutes(30));
        engine
            .recording
            .stop_recording(story, subtask, alice.clone())
            .await
            .expect("recording stops");
        engine.clock.advance(Duration::days(1));
    }

    let timesheets = engine
        .recording
        .list_work_times(&alice)
        .await
        .expect("read succeeds");
    let entries = &timesheets
        .first()
        .expect("timesheet exists")
        .subtasks
        .first()
        .expect("subtask sheet exists")
        .entries;
    assert_eq!(entries.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn timesheets_are_scoped_to_the_requesting_developer(engine: Engine) {
    let (story, subtask) = seed_story_with_subtask(&engine).await;
    let alice = engine.seed_developer("alice", "Alice Martin");
    let bob = engine.seed_developer("bob", "Bob Stone");

    for dev in [&alice, &bob] {
        engine
            .recording
            .start_recording(story, subtask)
            .await
            .expect("recording starts");
        engine.clock.advance(Duration::minutes(15));
        engine
            .recording
            .stop_recording(story, subtask, dev.clone())
            .await
            .expect("recording stops");
    }

    for dev in [&alice, &bob] {
        let timesheets = engine
            .recording
            .list_work_times(dev)
            .await
            .expect("read succeeds");
        let developers: Vec<&UserId> = timesheets
            .iter()
            .flat_map(|sheet| &sheet.subtasks)
            .flat_map(|sub| &sub.entries)
            .map(|(_, entry)| entry.developer())
            .collect();
        assert_eq!(developers, vec![dev]);
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn predicted_time_survives_revision_and_rejects_bad_values(engine: Engine) {
    let (story, subtask) = seed_story_with_subtask(&engine).await;

    engine
        .recording
        .update_predicted_time(story, subtask, 5.0)
        .await
        .expect("estimate accepted");
    engine
        .recording
        .update_predicted_time(story, subtask, 3.5)
        .await
        .expect("estimate revised");

    let result = engine
        .recording
        .update_predicted_time(story, subtask, f64::NAN)
        .await;
    assert!(matches!(
        result,
        Err(TimeRecordingError::Domain(StoryDomainError::InvalidHours(_)))
    ));
}
