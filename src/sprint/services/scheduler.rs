//! Service layer for sprint creation, maintenance, and capacity checks.

use crate::project::domain::ProjectId;
use crate::project::ports::{ProjectRepository, ProjectRepositoryError};
use crate::sprint::{
    domain::{Sprint, SprintDomainError, SprintId, SprintUpdate},
    ports::{SprintRepository, SprintRepositoryError},
};
use crate::story::ports::{StoryRepository, StoryRepositoryError};
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a sprint inside a project.
///
/// The project is addressed by its unique name, matching the planning
/// surface's create form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSprintRequest {
    project_name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    velocity: u32,
}

impl CreateSprintRequest {
    /// Creates a request with all required sprint fields.
    #[must_use]
    pub fn new(
        project_name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        velocity: u32,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            start_date,
            end_date,
            velocity,
        }
    }
}

/// Service-level errors for sprint scheduling operations.
#[derive(Debug, Error)]
pub enum SprintSchedulerError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] SprintDomainError),

    /// No project carries the requested name.
    #[error("no project named '{0}'")]
    ProjectNotFound(String),

    /// The sprint does not exist.
    #[error("sprint not found: {0}")]
    SprintNotFound(SprintId),

    /// The requested range intersects an existing sprint of the project.
    #[error("dates overlap sprint {existing} ({start}..{end})")]
    OverlappingSprint {
        /// The conflicting sprint.
        existing: SprintId,
        /// Start of the conflicting sprint's inclusive range.
        start: NaiveDate,
        /// End of the conflicting sprint's inclusive range.
        end: NaiveDate,
    },

    /// The sprint has already started and can no longer be deleted.
    #[error("sprint {0} has already started")]
    SprintAlreadyStarted(SprintId),

    /// Committed story points plus the requested points exceed velocity.
    #[error(
        "sprint {sprint} capacity exceeded: velocity {velocity}, \
         committed {committed}, requested {requested}"
    )]
    CapacityExceeded {
        /// The sprint whose capacity would be exceeded.
        sprint: SprintId,
        /// The sprint's story-point capacity.
        velocity: u32,
        /// Points already committed by bound stories.
        committed: u32,
        /// Additional points requested.
        requested: u32,
    },

    /// Sprint persistence failed.
    #[error(transparent)]
    SprintRepository(#[from] SprintRepositoryError),

    /// Project lookup failed.
    #[error(transparent)]
    ProjectRepository(#[from] ProjectRepositoryError),

    /// Story lookup for the capacity scan failed.
    #[error(transparent)]
    StoryRepository(#[from] StoryRepositoryError),
}

/// Result type for sprint scheduling operations.
pub type SprintSchedulerResult<T> = Result<T, SprintSchedulerError>;

/// Sprint scheduling orchestration service.
#[derive(Clone)]
pub struct SprintSchedulerService<R, P, S, C>
where
    R: SprintRepository,
    P: ProjectRepository,
    S: StoryRepository,
    C: Clock + Send + Sync,
{
    sprints: Arc<R>,
    projects: Arc<P>,
    stories: Arc<S>,
    clock: Arc<C>,
}

impl<R, P, S, C> SprintSchedulerService<R, P, S, C>
where
    R: SprintRepository,
    P: ProjectRepository,
    S: StoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new sprint scheduling service.
    #[must_use]
    pub const fn new(sprints: Arc<R>, projects: Arc<P>, stories: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            sprints,
            projects,
            stories,
            clock,
        }
    }

    /// Checks a candidate date range against the project's existing sprints.
    ///
    /// The sprint named by `exclude` is skipped, so an update does not
    /// conflict with its own stored range.
    ///
    /// # Errors
    ///
    /// Returns [`SprintSchedulerError::OverlappingSprint`] naming the first
    /// conflicting sprint, or a repository error when the scan fails.
    pub async fn validate_dates(
        &self,
        project_id: ProjectId,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<SprintId>,
    ) -> SprintSchedulerResult<()> {
        let existing = self.sprints.list_for_project(project_id).await?;
        for sprint in existing {
            if Some(sprint.id()) == exclude {
                continue;
            }
            if sprint.overlaps(start, end) {
                return Err(SprintSchedulerError::OverlappingSprint {
                    existing: sprint.id(),
                    start: sprint.start_date(),
                    end: sprint.end_date(),
                });
            }
        }
        Ok(())
    }

    /// Creates a sprint inside the project carrying the given unique name.
    ///
    /// # Errors
    ///
    /// Returns [`SprintSchedulerError::ProjectNotFound`] when the name does
    /// not resolve, a domain error for an inverted date range, or
    /// [`SprintSchedulerError::OverlappingSprint`] when the range intersects
    /// an existing sprint.
    pub async fn create_sprint(
        &self,
        request: CreateSprintRequest,
    ) -> SprintSchedulerResult<Sprint> {
        let project = self
            .projects
            .find_by_name(&request.project_name)
            .await?
            .ok_or(SprintSchedulerError::ProjectNotFound(request.project_name))?;

        let sprint = Sprint::new(
            project.id(),
            request.start_date,
            request.end_date,
            request.velocity,
            &*self.clock,
        )?;
        self.validate_dates(project.id(), sprint.start_date(), sprint.end_date(), None)
            .await?;
        self.sprints.store(&sprint).await?;
        Ok(sprint)
    }

    /// Deletes a sprint that has not yet started.
    ///
    /// # Errors
    ///
    /// Returns [`SprintSchedulerError::SprintAlreadyStarted`] when today is
    /// on or after the sprint's start date.
    pub async fn delete_sprint(&self, id: SprintId) -> SprintSchedulerResult<()> {
        let sprint = self.require_sprint(id).await?;
        let today = self.clock.utc().date_naive();
        if sprint.started_by(today) {
            return Err(SprintSchedulerError::SprintAlreadyStarted(id));
        }
        self.sprints.delete(id).await?;
        Ok(())
    }

    /// Applies a typed partial update, re-validating range and overlap.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the merged range is inverted, or
    /// [`SprintSchedulerError::OverlappingSprint`] when the merged range
    /// intersects another sprint of the project.
    pub async fn update_sprint(
        &self,
        id: SprintId,
        update: SprintUpdate,
    ) -> SprintSchedulerResult<Sprint> {
        let mut sprint = self.require_sprint(id).await?;
        sprint.apply(update)?;
        self.validate_dates(
            sprint.project_id(),
            sprint.start_date(),
            sprint.end_date(),
            Some(id),
        )
        .await?;
        self.sprints.update(&sprint).await?;
        Ok(sprint)
    }

    /// Retrieves a sprint by identifier.
    ///
    /// Returns `Ok(None)` when the sprint does not exist.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the lookup fails.
    pub async fn find_sprint(&self, id: SprintId) -> SprintSchedulerResult<Option<Sprint>> {
        Ok(self.sprints.find_by_id(id).await?)
    }

    /// Lists a project's sprints ordered by start date.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> SprintSchedulerResult<Vec<Sprint>> {
        Ok(self.sprints.list_for_project(project_id).await?)
    }

    /// Returns the sprint whose inclusive range contains today, if any.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn active_sprint(
        &self,
        project_id: ProjectId,
    ) -> SprintSchedulerResult<Option<Sprint>> {
        let today = self.clock.utc().date_naive();
        let sprints = self.sprints.list_for_project(project_id).await?;
        Ok(sprints.into_iter().find(|sprint| sprint.contains(today)))
    }

    /// Sums the story points of stories currently bound to the sprint.
    ///
    /// Stories without an estimate contribute zero.
    ///
    /// # Errors
    ///
    /// Returns [`SprintSchedulerError::SprintNotFound`] when the sprint does
    /// not exist, or a repository error when the story scan fails.
    pub async fn committed_points(&self, id: SprintId) -> SprintSchedulerResult<u32> {
        let sprint = self.require_sprint(id).await?;
        let stories = self.stories.list_for_sprint(sprint.id()).await?;
        Ok(stories
            .iter()
            .filter_map(|story| story.story_points())
            .map(|points| u32::from(points.value()))
            .sum())
    }

    /// Advisory capacity check for planning surfaces.
    ///
    /// Assigning a story to a sprint does not run this check server-side;
    /// callers that want the velocity budget respected consult it before
    /// assigning.
    ///
    /// # Errors
    ///
    /// Returns [`SprintSchedulerError::CapacityExceeded`] when committed
    /// points plus the requested points exceed the sprint's velocity.
    pub async fn check_capacity(
        &self,
        id: SprintId,
        additional_points: u32,
    ) -> SprintSchedulerResult<()> {
        let sprint = self.require_sprint(id).await?;
        let committed = self.committed_points(id).await?;
        if committed.saturating_add(additional_points) > sprint.velocity() {
            return Err(SprintSchedulerError::CapacityExceeded {
                sprint: id,
                velocity: sprint.velocity(),
                committed,
                requested: additional_points,
            });
        }
        Ok(())
    }

    async fn require_sprint(&self, id: SprintId) -> SprintSchedulerResult<Sprint> {
        self.sprints
            .find_by_id(id)
            .await?
            .ok_or(SprintSchedulerError::SprintNotFound(id))
    }
}
