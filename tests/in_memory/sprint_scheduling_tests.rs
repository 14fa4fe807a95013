//! Integration tests for sprint scheduling against in-memory adapters.

use super::helpers::{Engine, date};
use burndown::sprint::domain::SprintUpdate;
use burndown::sprint::services::{CreateSprintRequest, SprintSchedulerError};
use rstest::{fixture, rstest};

#[fixture]
fn engine() -> Engine {
    Engine::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_second_sprint_cannot_overlap_the_first(engine: Engine) {
    engine.seed_project("Apollo").await;
    let first = engine
        .seed_sprint("Apollo", date(2025, 4, 1), date(2025, 4, 7), 20)
        .await;

    let result = engine
        .scheduler
        .create_sprint(CreateSprintRequest::new(
            "Apollo",
            date(2025, 4, 5),
            date(2025, 4, 10),
            20,
        ))
        .await;
    match result {
        Err(SprintSchedulerError::OverlappingSprint {
            existing,
            start,
            end,
        }) => {
            assert_eq!(existing, first.id());
            assert_eq!(start, date(2025, 4, 1));
            assert_eq!(end, date(2025, 4, 7));
        }
        other => panic!("expected overlap conflict, got {other:?}"),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn back_to_back_sprints_are_legal(engine: Engine) {
    engine.seed_project("Apollo").await;
    engine
        .seed_sprint("Apollo", date(2025, 4, 1), date(2025, 4, 7), 20)
        .await;
    engine
        .seed_sprint("Apollo", date(2025, 4, 8), date(2025, 4, 14), 20)
        .await;
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_started_sprint_cannot_be_deleted(engine: Engine) {
    engine.seed_project("Apollo").await;
    // The test clock reads 2025-04-02; this sprint is underway.
    let sprint = engine
        .seed_sprint("Apollo", date(2025, 4, 1), date(2025, 4, 7), 20)
        .await;

    let result = engine.scheduler.delete_sprint(sprint.id()).await;
    assert!(matches!(
        result,
        Err(SprintSchedulerError::SprintAlreadyStarted(id)) if id == sprint.id()
    ));

    let future = engine
        .seed_sprint("Apollo", date(2025, 5, 1), date(2025, 5, 7), 20)
        .await;
    engine
        .scheduler
        .delete_sprint(future.id())
        .await
        .expect("future sprint deletes");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rescheduling_a_sprint_revalidates_against_siblings(engine: Engine) {
    engine.seed_project("Apollo").await;
    let first = engine
        .seed_sprint("Apollo", date(2025, 4, 1), date(2025, 4, 7), 20)
        .await;
    let second = engine
        .seed_sprint("Apollo", date(2025, 4, 8), date(2025, 4, 14), 20)
        .await;

    // Extending into the neighbour is refused.
    let blocked = engine
        .scheduler
        .update_sprint(
            first.id(),
            SprintUpdate::new().with_end_date(date(2025, 4, 8)),
        )
        .await;
    assert!(matches!(
        blocked,
        Err(SprintSchedulerError::OverlappingSprint { existing, .. }) if existing == second.id()
    ));

    // Shrinking inside its own range is fine.
    let updated = engine
        .scheduler
        .update_sprint(
            first.id(),
            SprintUpdate::new().with_end_date(date(2025, 4, 6)),
        )
        .await
        .expect("update succeeds");
    assert_eq!(updated.end_date(), date(2025, 4, 6));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn capacity_is_advisory_and_never_blocks_assignment(engine: Engine) {
    let project = engine.seed_project("Apollo").await;
    let sprint = engine
        .seed_sprint("Apollo", date(2025, 4, 1), date(2025, 4, 14), 10)
        .await;

    let story = engine.seed_story(&project, "Login").await;
    engine
        .lifecycle
        .set_story_points(story.id(), 8)
        .await
        .expect("points accepted");
    engine
        .lifecycle
        .assign_to_sprint(story.id(), sprint.id())
        .await
        .expect("assignment succeeds");

    // The advisory check now refuses anything beyond the remaining budget,
    // yet a second over-budget story can still be assigned.
    let committed = engine
        .scheduler
        .committed_points(sprint.id())
        .await
        .expect("scan succeeds");
    assert_eq!(committed, 8);
    assert!(matches!(
        engine.scheduler.check_capacity(sprint.id(), 5).await,
        Err(SprintSchedulerError::CapacityExceeded {
            committed: 8,
            requested: 5,
            velocity: 10,
            ..
        })
    ));

    let second = engine.seed_story(&project, "Search").await;
    engine
        .lifecycle
        .set_story_points(second.id(), 5)
        .await
        .expect("points accepted");
    engine
        .lifecycle
        .assign_to_sprint(second.id(), sprint.id())
        .await
        .expect("assignment is not blocked by capacity");

    let committed = engine
        .scheduler
        .committed_points(sprint.id())
        .await
        .expect("scan succeeds");
    assert_eq!(committed, 13);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn the_active_sprint_tracks_the_clock(engine: Engine) {
    let project = engine.seed_project("Apollo").await;
    let current = engine
        .seed_sprint("Apollo", date(2025, 4, 1), date(2025, 4, 7), 20)
        .await;
    let next = engine
        .seed_sprint("Apollo", date(2025, 4, 8), date(2025, 4, 14), 20)
        .await;

    let active = engine
        .scheduler
        .active_sprint(project.id())
        .await
        .expect("lookup succeeds");
    assert_eq!(active.map(|s| s.id()), Some(current.id()));

    engine.clock.advance(chrono::Duration::days(7));
    let active = engine
        .scheduler
        .active_sprint(project.id())
        .await
        .expect("lookup succeeds");
    assert_eq!(active.map(|s| s.id()), Some(next.id()));
}
