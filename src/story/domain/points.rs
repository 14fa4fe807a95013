//! Validated story-point estimate.

use super::StoryDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative sizing estimate consumed against sprint velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryPoints(u8);

impl StoryPoints {
    /// Largest assignable estimate.
    pub const MAX: u8 = 99;

    /// Creates a validated story-point estimate.
    ///
    /// # Errors
    ///
    /// Returns [`StoryDomainError::StoryPointsOutOfRange`] when the value
    /// exceeds [`Self::MAX`].
    pub fn new(value: u32) -> Result<Self, StoryDomainError> {
        match u8::try_from(value) {
            Ok(points) if points <= Self::MAX => Ok(Self(points)),
            _ => Err(StoryDomainError::StoryPointsOutOfRange(value)),
        }
    }

    /// Returns the underlying estimate.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for StoryPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
