//! Story lifecycle status.

use super::ParseStoryStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a user story.
///
/// The set is closed — any other value is rejected at the parsing boundary —
/// but the transition graph is deliberately flat: any listed status may be
/// set directly. The workflow order shown by planning boards is advisory;
/// the engine never enforced adjacency and recomputed statuses (claiming,
/// completion, evaluation) jump freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryStatus {
    /// Newly created; not yet groomed into the product backlog.
    Backlog,
    /// Groomed and ready for sprint planning.
    ProductBacklog,
    /// Planned into a sprint.
    SprintBacklog,
    /// Analysis and design underway.
    AnalysisAndDesign,
    /// Implementation underway.
    Coding,
    /// Being tested.
    Testing,
    /// Being integrated.
    Integration,
    /// Being documented.
    Documentation,
    /// Ready for acceptance review.
    AcceptanceReady,
    /// Under acceptance review.
    Acceptance,
    /// At least one subtask is claimed (recomputed).
    InProgress,
    /// Every live subtask is done (recomputed).
    Done,
    /// Accepted at evaluation; terminal.
    Completed,
    /// Rejected at evaluation and returned to the backlog pool; terminal.
    Rejected,
}

impl StoryStatus {
    /// Every member of the closed status set.
    pub const ALL: [Self; 14] = [
        Self::Backlog,
        Self::ProductBacklog,
        Self::SprintBacklog,
        Self::AnalysisAndDesign,
        Self::Coding,
        Self::Testing,
        Self::Integration,
        Self::Documentation,
        Self::AcceptanceReady,
        Self::Acceptance,
        Self::InProgress,
        Self::Done,
        Self::Completed,
        Self::Rejected,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::ProductBacklog => "product_backlog",
            Self::SprintBacklog => "sprint_backlog",
            Self::AnalysisAndDesign => "analysis_and_design",
            Self::Coding => "coding",
            Self::Testing => "testing",
            Self::Integration => "integration",
            Self::Documentation => "documentation",
            Self::AcceptanceReady => "acceptance_ready",
            Self::Acceptance => "acceptance",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for StoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for StoryStatus {
    type Error = ParseStoryStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized: String = value
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        match normalized.as_str() {
            "backlog" => Ok(Self::Backlog),
            "product_backlog" => Ok(Self::ProductBacklog),
            "sprint_backlog" => Ok(Self::SprintBacklog),
            "analysis_and_design" | "analysis_&_design" => Ok(Self::AnalysisAndDesign),
            "coding" => Ok(Self::Coding),
            "testing" => Ok(Self::Testing),
            "integration" => Ok(Self::Integration),
            "documentation" => Ok(Self::Documentation),
            "acceptance_ready" => Ok(Self::AcceptanceReady),
            "acceptance" => Ok(Self::Acceptance),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            "completed" => Ok(Self::Completed),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseStoryStatusError(value.to_owned())),
        }
    }
}
