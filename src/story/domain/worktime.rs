//! Recorded work time and the active-recording token.

use super::SubtaskId;
use crate::identity::domain::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Aggregated effort of one developer on one subtask for one calendar day.
///
/// Entries are append-only within a subtask, so their positional index is a
/// stable address for retroactive corrections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkTime {
    developer: UserId,
    seconds: u64,
    recorded_on: NaiveDate,
    updated_at: DateTime<Utc>,
}

impl WorkTime {
    pub(crate) const fn new(
        developer: UserId,
        seconds: u64,
        recorded_on: NaiveDate,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            developer,
            seconds,
            recorded_on,
            updated_at,
        }
    }

    /// Returns the developer who recorded the effort.
    #[must_use]
    pub const fn developer(&self) -> &UserId {
        &self.developer
    }

    /// Returns the aggregated duration in whole seconds.
    #[must_use]
    pub const fn seconds(&self) -> u64 {
        self.seconds
    }

    /// Returns the calendar day the effort belongs to.
    #[must_use]
    pub const fn recorded_on(&self) -> NaiveDate {
        self.recorded_on
    }

    /// Returns the timestamp of the last edit to this entry.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub(crate) fn is_for(&self, developer: &UserId, day: NaiveDate) -> bool {
        self.developer == *developer && self.recorded_on == day
    }

    pub(crate) fn add_seconds(&mut self, seconds: u64, now: DateTime<Utc>) {
        self.seconds = self.seconds.saturating_add(seconds);
        self.updated_at = now;
    }

    pub(crate) fn apply(&mut self, update: WorkTimeUpdate, now: DateTime<Utc>) {
        if let Some(seconds) = update.seconds {
            self.seconds = seconds;
        }
        self.updated_at = now;
    }
}

/// Typed partial-update command for one work-time entry.
///
/// Used for retroactive duration corrections; ownership of the entry is not
/// re-validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkTimeUpdate {
    /// Replacement aggregated duration in whole seconds, when present.
    pub seconds: Option<u64>,
}

impl WorkTimeUpdate {
    /// Creates an empty update command.
    #[must_use]
    pub const fn new() -> Self {
        Self { seconds: None }
    }

    /// Sets the replacement duration in whole seconds.
    #[must_use]
    pub const fn with_seconds(mut self, seconds: u64) -> Self {
        self.seconds = Some(seconds);
        self
    }
}

/// Single-slot token for the story's active recording session.
///
/// At most one session exists per story; acquiring it is the only way to
/// start the stopwatch and stopping the session is the only way to release
/// it, which replaces the legacy scan over per-subtask start timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingSession {
    subtask: SubtaskId,
    started_at: DateTime<Utc>,
}

impl RecordingSession {
    pub(crate) const fn new(subtask: SubtaskId, started_at: DateTime<Utc>) -> Self {
        Self {
            subtask,
            started_at,
        }
    }

    /// Returns the subtask being recorded.
    #[must_use]
    pub const fn subtask(&self) -> SubtaskId {
        self.subtask
    }

    /// Returns when the stopwatch started.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
