//! Subtask entries embedded in the story aggregate.

use super::{StoryDomainError, SubtaskId, WorkTime};
use crate::identity::domain::UserId;
use serde::{Deserialize, Serialize};

/// Developer assignment on a subtask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    /// The claiming developer.
    pub user: UserId,
    /// Display name resolved through the identity directory at claim time.
    pub display_name: String,
}

/// A unit of work inside a user story.
///
/// Subtasks are soft-deleted: a removed entry stays in the story with its
/// recorded time, keeping both addressing and timesheet history stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    id: SubtaskId,
    description: String,
    time_estimate_hours: f64,
    assignee: Option<Assignee>,
    done: bool,
    deleted: bool,
    predicted_finish_hours: Option<f64>,
    work_times: Vec<WorkTime>,
}

impl Subtask {
    pub(crate) fn new(
        description: impl Into<String>,
        time_estimate_hours: f64,
        assignee: Option<Assignee>,
    ) -> Result<Self, StoryDomainError> {
        let description = validate_description(description)?;
        validate_hours(time_estimate_hours)?;
        Ok(Self {
            id: SubtaskId::new(),
            description,
            time_estimate_hours,
            assignee,
            done: false,
            deleted: false,
            predicted_finish_hours: None,
            work_times: Vec::new(),
        })
    }

    /// Returns the stable subtask identifier.
    #[must_use]
    pub const fn id(&self) -> SubtaskId {
        self.id
    }

    /// Returns the subtask description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the estimated effort in hours.
    #[must_use]
    pub const fn time_estimate_hours(&self) -> f64 {
        self.time_estimate_hours
    }

    /// Returns the current assignment, if claimed.
    #[must_use]
    pub const fn assignee(&self) -> Option<&Assignee> {
        self.assignee.as_ref()
    }

    /// Reports whether the subtask is marked done.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Reports whether the subtask has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Returns the revisable predicted finish estimate in hours, if set.
    #[must_use]
    pub const fn predicted_finish_hours(&self) -> Option<f64> {
        self.predicted_finish_hours
    }

    /// Returns the recorded work-time entries in append order.
    #[must_use]
    pub fn work_times(&self) -> &[WorkTime] {
        &self.work_times
    }

    pub(crate) fn is_claimed_by(&self, user: &UserId) -> bool {
        self.assignee
            .as_ref()
            .is_some_and(|assignee| assignee.user == *user)
    }

    pub(crate) fn set_assignee(&mut self, assignee: Option<Assignee>) {
        self.assignee = assignee;
    }

    pub(crate) const fn toggle_done(&mut self) -> bool {
        self.done = !self.done;
        self.done
    }

    pub(crate) const fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    pub(crate) const fn set_predicted_finish(&mut self, hours: f64) {
        self.predicted_finish_hours = Some(hours);
    }

    pub(crate) fn apply(&mut self, update: SubtaskUpdate) -> Result<(), StoryDomainError> {
        if let Some(description) = update.description {
            self.description = validate_description(description)?;
        }
        if let Some(estimate) = update.time_estimate_hours {
            validate_hours(estimate)?;
            self.time_estimate_hours = estimate;
        }
        if let Some(assignee) = update.assignee {
            self.assignee = Some(assignee);
        }
        Ok(())
    }

    pub(crate) fn work_time_mut(&mut self, index: usize) -> Option<&mut WorkTime> {
        self.work_times.get_mut(index)
    }

    pub(crate) fn work_time_for_mut(
        &mut self,
        developer: &UserId,
        day: chrono::NaiveDate,
    ) -> Option<&mut WorkTime> {
        self.work_times
            .iter_mut()
            .find(|entry| entry.is_for(developer, day))
    }

    pub(crate) fn push_work_time(&mut self, entry: WorkTime) {
        self.work_times.push(entry);
    }
}

/// Typed partial-update command for subtask fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtaskUpdate {
    /// Replacement description, when present.
    pub description: Option<String>,
    /// Replacement effort estimate in hours, when present.
    pub time_estimate_hours: Option<f64>,
    /// Replacement assignment, when present.
    pub assignee: Option<Assignee>,
}

impl SubtaskUpdate {
    /// Creates an empty update command.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            description: None,
            time_estimate_hours: None,
            assignee: None,
        }
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement effort estimate in hours.
    #[must_use]
    pub const fn with_time_estimate_hours(mut self, hours: f64) -> Self {
        self.time_estimate_hours = Some(hours);
        self
    }

    /// Sets the replacement assignment.
    #[must_use]
    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.assignee = Some(assignee);
        self
    }
}

fn validate_description(description: impl Into<String>) -> Result<String, StoryDomainError> {
    let raw = description.into();
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Err(StoryDomainError::EmptySubtaskDescription);
    }
    Ok(normalized.to_owned())
}

pub(crate) fn validate_hours(hours: f64) -> Result<(), StoryDomainError> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(StoryDomainError::InvalidHours(hours));
    }
    Ok(())
}
