//! Sprint aggregate root and its typed update command.

use super::{SprintDomainError, SprintId};
use crate::project::domain::ProjectId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Sprint aggregate root.
///
/// Both range boundaries are inclusive calendar dates. The owning project is
/// immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    id: SprintId,
    project_id: ProjectId,
    start_date: NaiveDate,
    end_date: NaiveDate,
    velocity: u32,
    created_at: DateTime<Utc>,
}

impl Sprint {
    /// Creates a sprint with a validated date range.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidDateRange`] when `end` precedes
    /// `start`.
    pub fn new(
        project_id: ProjectId,
        start: NaiveDate,
        end: NaiveDate,
        velocity: u32,
        clock: &impl Clock,
    ) -> Result<Self, SprintDomainError> {
        validate_range(start, end)?;
        Ok(Self {
            id: SprintId::new(),
            project_id,
            start_date: start,
            end_date: end,
            velocity,
            created_at: clock.utc(),
        })
    }

    /// Returns the sprint identifier.
    #[must_use]
    pub const fn id(&self) -> SprintId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the inclusive start date.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the inclusive end date.
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Returns the story-point capacity.
    #[must_use]
    pub const fn velocity(&self) -> u32 {
        self.velocity
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reports whether this sprint's inclusive range intersects another.
    ///
    /// Two inclusive ranges overlap iff `start1 <= end2 && start2 <= end1`.
    #[must_use]
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }

    /// Reports whether the given day falls inside the inclusive range.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    /// Reports whether the sprint has started on or before the given day.
    #[must_use]
    pub fn started_by(&self, day: NaiveDate) -> bool {
        self.start_date <= day
    }

    /// Merges a typed partial update, re-validating the date range.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidDateRange`] when the merged range
    /// would end before it starts; the sprint is left unmodified in that
    /// case.
    pub fn apply(&mut self, update: SprintUpdate) -> Result<(), SprintDomainError> {
        let start = update.start_date.unwrap_or(self.start_date);
        let end = update.end_date.unwrap_or(self.end_date);
        validate_range(start, end)?;
        self.start_date = start;
        self.end_date = end;
        if let Some(velocity) = update.velocity {
            self.velocity = velocity;
        }
        Ok(())
    }
}

/// Typed partial-update command for sprint fields.
///
/// Only the named field groups can change; the owning project and creation
/// timestamp never leak through a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SprintUpdate {
    /// Replacement start date, when present.
    pub start_date: Option<NaiveDate>,
    /// Replacement end date, when present.
    pub end_date: Option<NaiveDate>,
    /// Replacement velocity, when present.
    pub velocity: Option<u32>,
}

impl SprintUpdate {
    /// Creates an empty update command.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            start_date: None,
            end_date: None,
            velocity: None,
        }
    }

    /// Sets the replacement start date.
    #[must_use]
    pub const fn with_start_date(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Sets the replacement end date.
    #[must_use]
    pub const fn with_end_date(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Sets the replacement velocity.
    #[must_use]
    pub const fn with_velocity(mut self, velocity: u32) -> Self {
        self.velocity = Some(velocity);
        self
    }
}

fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<(), SprintDomainError> {
    if end < start {
        return Err(SprintDomainError::InvalidDateRange { start, end });
    }
    Ok(())
}
