//! MoSCoW story priority.

use super::ParsePriorityError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// MoSCoW prioritisation of a user story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Non-negotiable for the release.
    MustHave,
    /// Important but not vital.
    ShouldHave,
    /// Desirable when capacity allows.
    CouldHave,
    /// Explicitly deferred from this delivery.
    WontHaveThisTime,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MustHave => "must_have",
            Self::ShouldHave => "should_have",
            Self::CouldHave => "could_have",
            Self::WontHaveThisTime => "wont_have_this_time",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Accept board spellings such as "must have" and
        // "won't-have-this-time" alongside the canonical form.
        let normalized: String = value
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| *c != '\'')
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        match normalized.as_str() {
            "must_have" => Ok(Self::MustHave),
            "should_have" => Ok(Self::ShouldHave),
            "could_have" => Ok(Self::CouldHave),
            "wont_have_this_time" => Ok(Self::WontHaveThisTime),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}
