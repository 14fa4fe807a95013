//! Error types for sprint domain validation.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or updating sprint domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SprintDomainError {
    /// The end date precedes the start date.
    #[error("sprint end date {end} precedes start date {start}")]
    InvalidDateRange {
        /// Requested start of the inclusive range.
        start: NaiveDate,
        /// Requested end of the inclusive range.
        end: NaiveDate,
    },
}
