//! Acceptance evaluation outcome recorded on a story.

use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict recorded when a product owner evaluates a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptanceVerdict {
    /// The delivered story met its acceptance criteria.
    Accepted,
    /// The delivered story was rejected and returned to the backlog pool.
    Rejected,
}

impl AcceptanceVerdict {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for AcceptanceVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluation record stamped onto a story by the acceptance flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    verdict: AcceptanceVerdict,
    rejection_comment: Option<String>,
    evaluated_at: DateTime<Utc>,
    evaluated_by: UserId,
}

impl Evaluation {
    pub(crate) const fn new(
        verdict: AcceptanceVerdict,
        rejection_comment: Option<String>,
        evaluated_at: DateTime<Utc>,
        evaluated_by: UserId,
    ) -> Self {
        Self {
            verdict,
            rejection_comment,
            evaluated_at,
            evaluated_by,
        }
    }

    /// Returns the recorded verdict.
    #[must_use]
    pub const fn verdict(&self) -> AcceptanceVerdict {
        self.verdict
    }

    /// Returns the rejection comment, present only on rejected stories.
    #[must_use]
    pub fn rejection_comment(&self) -> Option<&str> {
        self.rejection_comment.as_deref()
    }

    /// Returns when the evaluation was recorded.
    #[must_use]
    pub const fn evaluated_at(&self) -> DateTime<Utc> {
        self.evaluated_at
    }

    /// Returns who recorded the evaluation.
    #[must_use]
    pub const fn evaluated_by(&self) -> &UserId {
        &self.evaluated_by
    }
}
