//! User-story aggregate root and its lifecycle behaviour.

use super::{
    AcceptanceVerdict, Assignee, Evaluation, Priority, RecordingSession, StoryDomainError, StoryId,
    StoryPoints, StoryStatus, Subtask, SubtaskId, SubtaskUpdate, WorkTime, WorkTimeUpdate,
    subtask::validate_hours,
};
use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use crate::sprint::domain::SprintId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Validated descriptive field group of a user story.
///
/// Creation and full update both funnel through this draft, so the same
/// validation runs on either path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryDraft {
    name: String,
    description: String,
    acceptance_criteria: Vec<String>,
    priority: Priority,
    business_value: u32,
}

impl StoryDraft {
    /// Validates the descriptive fields of a story.
    ///
    /// # Errors
    ///
    /// Returns a [`StoryDomainError`] when the name or description is blank,
    /// the acceptance criteria list is empty, or any criterion is blank.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        acceptance_criteria: impl IntoIterator<Item = String>,
        priority: Priority,
        business_value: u32,
    ) -> Result<Self, StoryDomainError> {
        let name = non_blank(name, StoryDomainError::EmptyStoryName)?;
        let description = non_blank(description, StoryDomainError::EmptyDescription)?;
        let criteria: Vec<String> = acceptance_criteria
            .into_iter()
            .map(|criterion| criterion.trim().to_owned())
            .collect();
        if criteria.is_empty() {
            return Err(StoryDomainError::EmptyAcceptanceCriteria);
        }
        if let Some(position) = criteria.iter().position(String::is_empty) {
            return Err(StoryDomainError::BlankAcceptanceCriterion(position));
        }
        Ok(Self {
            name,
            description,
            acceptance_criteria: criteria,
            priority,
            business_value,
        })
    }

    /// Returns the story name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Outcome of a claim toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The subtask is now assigned to the claiming developer.
    Claimed,
    /// The subtask was already claimed by the developer and is now free.
    Released,
}

/// User-story aggregate root.
///
/// The aggregate embeds its subtasks, their work-time entries, and the
/// single-slot recording token, so each lifecycle operation reads one
/// document, mutates it, and writes it back whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStory {
    id: StoryId,
    project_id: ProjectId,
    name: String,
    description: String,
    acceptance_criteria: Vec<String>,
    priority: Priority,
    business_value: u32,
    story_points: Option<StoryPoints>,
    sprints: BTreeSet<SprintId>,
    status: StoryStatus,
    subtasks: Vec<Subtask>,
    evaluation: Option<Evaluation>,
    recording: Option<RecordingSession>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserStory {
    /// Creates a story in the `Backlog` status with an empty sprint set.
    #[must_use]
    pub fn new(project_id: ProjectId, draft: StoryDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: StoryId::new(),
            project_id,
            name: draft.name,
            description: draft.description,
            acceptance_criteria: draft.acceptance_criteria,
            priority: draft.priority,
            business_value: draft.business_value,
            story_points: None,
            sprints: BTreeSet::new(),
            status: StoryStatus::Backlog,
            subtasks: Vec::new(),
            evaluation: None,
            recording: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the story identifier.
    #[must_use]
    pub const fn id(&self) -> StoryId {
        self.id
    }

    /// Returns the owning project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the story name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the story description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the ordered acceptance criteria.
    #[must_use]
    pub fn acceptance_criteria(&self) -> &[String] {
        &self.acceptance_criteria
    }

    /// Returns the MoSCoW priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the business value.
    #[must_use]
    pub const fn business_value(&self) -> u32 {
        self.business_value
    }

    /// Returns the story-point estimate, if set.
    #[must_use]
    pub const fn story_points(&self) -> Option<StoryPoints> {
        self.story_points
    }

    /// Returns every sprint the story has ever been assigned to.
    #[must_use]
    pub const fn sprints(&self) -> &BTreeSet<SprintId> {
        &self.sprints
    }

    /// Reports whether the story currently belongs to any sprint.
    #[must_use]
    pub fn in_sprint(&self) -> bool {
        !self.sprints.is_empty()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> StoryStatus {
        self.status
    }

    /// Returns all subtasks in creation order, soft-deleted entries included.
    #[must_use]
    pub fn subtasks(&self) -> &[Subtask] {
        &self.subtasks
    }

    /// Returns the evaluation record, present once the story was evaluated.
    #[must_use]
    pub const fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    /// Returns the active recording session, if the slot is held.
    #[must_use]
    pub const fn recording(&self) -> Option<&RecordingSession> {
        self.recording.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Looks up a subtask by identifier, soft-deleted entries included.
    #[must_use]
    pub fn subtask(&self, id: SubtaskId) -> Option<&Subtask> {
        self.subtasks.iter().find(|subtask| subtask.id() == id)
    }

    /// Replaces the descriptive field group with a freshly validated draft.
    ///
    /// Lifecycle state — status, sprints, subtasks, evaluation, recording —
    /// is untouched.
    pub fn replace_details(&mut self, draft: StoryDraft, clock: &impl Clock) {
        self.name = draft.name;
        self.description = draft.description;
        self.acceptance_criteria = draft.acceptance_criteria;
        self.priority = draft.priority;
        self.business_value = draft.business_value;
        self.touch(clock);
    }

    /// Sets the story-point estimate.
    ///
    /// # Errors
    ///
    /// Returns [`StoryDomainError::StoryPointsWhileInSprint`] while the story
    /// belongs to any sprint.
    pub fn set_story_points(
        &mut self,
        points: StoryPoints,
        clock: &impl Clock,
    ) -> Result<(), StoryDomainError> {
        if self.in_sprint() {
            return Err(StoryDomainError::StoryPointsWhileInSprint);
        }
        self.story_points = Some(points);
        self.touch(clock);
        Ok(())
    }

    /// Adds the story to a sprint and forces the status to `ProductBacklog`.
    ///
    /// The sprint set is a union: assigning the same sprint twice is a no-op
    /// for the set, and earlier assignments are never displaced.
    pub fn assign_to_sprint(&mut self, sprint: SprintId, clock: &impl Clock) {
        self.sprints.insert(sprint);
        self.status = StoryStatus::ProductBacklog;
        self.touch(clock);
    }

    /// Sets the lifecycle status directly.
    ///
    /// The status set is closed but the transition graph is flat; callers
    /// parse the status at the boundary and any member may follow any other.
    pub fn set_status(&mut self, status: StoryStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Records an acceptance evaluation.
    ///
    /// Acceptance completes the story and clears any earlier rejection
    /// comment. Rejection demands a non-blank comment, moves the story to
    /// `Rejected`, and removes it from every sprint, returning it to the
    /// backlog pool.
    ///
    /// # Errors
    ///
    /// Returns [`StoryDomainError::EvaluationWithoutSprint`] when the story
    /// has no sprint assignment, or
    /// [`StoryDomainError::MissingRejectionComment`] when a rejection lacks
    /// a comment.
    pub fn evaluate(
        &mut self,
        accepted: bool,
        comment: Option<&str>,
        evaluated_by: UserId,
        clock: &impl Clock,
    ) -> Result<(), StoryDomainError> {
        if !self.in_sprint() {
            return Err(StoryDomainError::EvaluationWithoutSprint);
        }
        let now = clock.utc();
        if accepted {
            self.status = StoryStatus::Completed;
            self.evaluation = Some(Evaluation::new(
                AcceptanceVerdict::Accepted,
                None,
                now,
                evaluated_by,
            ));
        } else {
            let comment = comment
                .map(str::trim)
                .filter(|comment| !comment.is_empty())
                .ok_or(StoryDomainError::MissingRejectionComment)?;
            self.status = StoryStatus::Rejected;
            self.evaluation = Some(Evaluation::new(
                AcceptanceVerdict::Rejected,
                Some(comment.to_owned()),
                now,
                evaluated_by,
            ));
            self.sprints.clear();
        }
        self.touch(clock);
        Ok(())
    }

    /// Appends a subtask, reopening a done story.
    ///
    /// # Errors
    ///
    /// Returns [`StoryDomainError::SubtaskBeforeSprint`] while the story has
    /// no sprint assignment, or a validation error from the subtask fields.
    pub fn add_subtask(
        &mut self,
        description: impl Into<String>,
        time_estimate_hours: f64,
        assignee: Option<Assignee>,
        clock: &impl Clock,
    ) -> Result<SubtaskId, StoryDomainError> {
        if !self.in_sprint() {
            return Err(StoryDomainError::SubtaskBeforeSprint);
        }
        let subtask = Subtask::new(description, time_estimate_hours, assignee)?;
        let id = subtask.id();
        if self.status == StoryStatus::Done {
            self.status = StoryStatus::InProgress;
        }
        self.subtasks.push(subtask);
        self.touch(clock);
        Ok(id)
    }

    /// Toggles a developer's claim on a subtask.
    ///
    /// Claiming a subtask already held by the same developer releases it;
    /// any other state assigns the developer. The story status is then
    /// recomputed from claims: any claimed live subtask means `InProgress`,
    /// none means `ProductBacklog`.
    ///
    /// # Errors
    ///
    /// Returns [`StoryDomainError::UnknownSubtask`] when no live subtask
    /// carries the identifier.
    pub fn claim_subtask(
        &mut self,
        id: SubtaskId,
        user: UserId,
        display_name: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<ClaimOutcome, StoryDomainError> {
        let subtask = self.live_subtask_mut(id)?;
        let outcome = if subtask.is_claimed_by(&user) {
            subtask.set_assignee(None);
            ClaimOutcome::Released
        } else {
            subtask.set_assignee(Some(Assignee {
                user,
                display_name: display_name.into(),
            }));
            ClaimOutcome::Claimed
        };
        self.refresh_claim_status();
        self.touch(clock);
        Ok(outcome)
    }

    /// Toggles a subtask's completion flag and recomputes the story status.
    ///
    /// When every live subtask is done (and at least one exists) the story
    /// becomes `Done`; when a previously done story loses that property it
    /// drops back to `InProgress`.
    ///
    /// # Errors
    ///
    /// Returns [`StoryDomainError::UnknownSubtask`] when no live subtask
    /// carries the identifier.
    pub fn toggle_subtask_done(
        &mut self,
        id: SubtaskId,
        clock: &impl Clock,
    ) -> Result<bool, StoryDomainError> {
        let subtask = self.live_subtask_mut(id)?;
        let now_done = subtask.toggle_done();
        self.refresh_completion_status();
        self.touch(clock);
        Ok(now_done)
    }

    /// Soft-deletes a subtask, keeping its position and history.
    ///
    /// # Errors
    ///
    /// Returns [`StoryDomainError::StoryAlreadyDone`] when the story is done,
    /// [`StoryDomainError::SubtaskClaimed`] when the subtask is assigned,
    /// [`StoryDomainError::SubtaskRecording`] when the recording slot is held
    /// for it, [`StoryDomainError::SubtaskAlreadyDeleted`] when it was
    /// removed before, or [`StoryDomainError::UnknownSubtask`] when it never
    /// existed.
    pub fn remove_subtask(
        &mut self,
        id: SubtaskId,
        clock: &impl Clock,
    ) -> Result<(), StoryDomainError> {
        if self.status == StoryStatus::Done {
            return Err(StoryDomainError::StoryAlreadyDone);
        }
        if self.recording.is_some_and(|session| session.subtask() == id) {
            return Err(StoryDomainError::SubtaskRecording(id));
        }
        let subtask = self
            .subtasks
            .iter_mut()
            .find(|subtask| subtask.id() == id)
            .ok_or(StoryDomainError::UnknownSubtask(id))?;
        if subtask.is_deleted() {
            return Err(StoryDomainError::SubtaskAlreadyDeleted(id));
        }
        if subtask.assignee().is_some() {
            return Err(StoryDomainError::SubtaskClaimed(id));
        }
        subtask.mark_deleted();
        self.touch(clock);
        Ok(())
    }

    /// Applies a typed partial update to a subtask.
    ///
    /// # Errors
    ///
    /// Returns [`StoryDomainError::UnknownSubtask`] when no live subtask
    /// carries the identifier, or a validation error from the updated
    /// fields; the subtask is left unmodified on failure.
    pub fn update_subtask(
        &mut self,
        id: SubtaskId,
        update: SubtaskUpdate,
        clock: &impl Clock,
    ) -> Result<(), StoryDomainError> {
        let subtask = self.live_subtask_mut(id)?;
        subtask.apply(update)?;
        self.touch(clock);
        Ok(())
    }

    /// Releases every claim held by one developer across the story.
    ///
    /// Returns the number of released subtasks; the claim-derived status is
    /// recomputed when anything was released.
    pub fn release_assignments(&mut self, user: &UserId, clock: &impl Clock) -> usize {
        let mut released = 0_usize;
        for subtask in &mut self.subtasks {
            if !subtask.is_deleted() && subtask.is_claimed_by(user) {
                subtask.set_assignee(None);
                released += 1;
            }
        }
        if released > 0 {
            self.refresh_claim_status();
            self.touch(clock);
        }
        released
    }

    /// Acquires the story's recording slot for a subtask.
    ///
    /// # Errors
    ///
    /// Returns [`StoryDomainError::RecordingAlreadyActive`] naming the
    /// subtask currently holding the slot, or
    /// [`StoryDomainError::UnknownSubtask`] when the target does not exist.
    pub fn start_recording(
        &mut self,
        id: SubtaskId,
        clock: &impl Clock,
    ) -> Result<(), StoryDomainError> {
        if let Some(session) = self.recording {
            return Err(StoryDomainError::RecordingAlreadyActive(session.subtask()));
        }
        let _ = self.live_subtask_mut(id)?;
        self.recording = Some(RecordingSession::new(id, clock.utc()));
        self.touch(clock);
        Ok(())
    }

    /// Releases the recording slot and books the elapsed time.
    ///
    /// The elapsed duration is truncated to whole seconds and merged into
    /// the developer's entry for today's calendar date, creating the entry
    /// when none exists. Returns the booked seconds.
    ///
    /// # Errors
    ///
    /// Returns [`StoryDomainError::NoActiveRecording`] when the slot is free
    /// or held for a different subtask.
    pub fn stop_recording(
        &mut self,
        id: SubtaskId,
        user: UserId,
        clock: &impl Clock,
    ) -> Result<u64, StoryDomainError> {
        let session = self
            .recording
            .filter(|session| session.subtask() == id)
            .ok_or(StoryDomainError::NoActiveRecording(id))?;
        let now = clock.utc();
        let elapsed = now.signed_duration_since(session.started_at());
        let seconds = u64::try_from(elapsed.num_seconds()).unwrap_or(0);
        let today = now.date_naive();

        let subtask = self.live_subtask_mut(id)?;
        match subtask.work_time_for_mut(&user, today) {
            Some(entry) => entry.add_seconds(seconds, now),
            None => subtask.push_work_time(WorkTime::new(user, seconds, today, now)),
        }
        self.recording = None;
        self.touch(clock);
        Ok(seconds)
    }

    /// Applies a typed correction to one work-time entry.
    ///
    /// Soft-deleted subtasks stay addressable here: their history remains
    /// correctable.
    ///
    /// # Errors
    ///
    /// Returns [`StoryDomainError::UnknownSubtask`] or
    /// [`StoryDomainError::UnknownWorkTime`] when the address does not
    /// resolve.
    pub fn update_work_time(
        &mut self,
        id: SubtaskId,
        index: usize,
        update: WorkTimeUpdate,
        clock: &impl Clock,
    ) -> Result<(), StoryDomainError> {
        let now = clock.utc();
        let subtask = self
            .subtasks
            .iter_mut()
            .find(|subtask| subtask.id() == id)
            .ok_or(StoryDomainError::UnknownSubtask(id))?;
        let entry = subtask
            .work_time_mut(index)
            .ok_or(StoryDomainError::UnknownWorkTime { subtask: id, index })?;
        entry.apply(update, now);
        self.touch(clock);
        Ok(())
    }

    /// Sets the predicted finish estimate on a subtask.
    ///
    /// # Errors
    ///
    /// Returns [`StoryDomainError::InvalidHours`] for a non-finite or
    /// negative value, or [`StoryDomainError::UnknownSubtask`] when the
    /// subtask does not exist.
    pub fn set_predicted_time(
        &mut self,
        id: SubtaskId,
        hours: f64,
        clock: &impl Clock,
    ) -> Result<(), StoryDomainError> {
        validate_hours(hours)?;
        let subtask = self.live_subtask_mut(id)?;
        subtask.set_predicted_finish(hours);
        self.touch(clock);
        Ok(())
    }

    fn live_subtask_mut(&mut self, id: SubtaskId) -> Result<&mut Subtask, StoryDomainError> {
        self.subtasks
            .iter_mut()
            .find(|subtask| subtask.id() == id && !subtask.is_deleted())
            .ok_or(StoryDomainError::UnknownSubtask(id))
    }

    fn live_subtasks(&self) -> impl Iterator<Item = &Subtask> {
        self.subtasks.iter().filter(|subtask| !subtask.is_deleted())
    }

    fn refresh_claim_status(&mut self) {
        let any_claimed = self
            .live_subtasks()
            .any(|subtask| subtask.assignee().is_some());
        self.status = if any_claimed {
            StoryStatus::InProgress
        } else {
            StoryStatus::ProductBacklog
        };
    }

    fn refresh_completion_status(&mut self) {
        let all_done = {
            let mut live = self.live_subtasks().peekable();
            live.peek().is_some() && live.all(Subtask::is_done)
        };
        if all_done {
            self.status = StoryStatus::Done;
        } else if self.status == StoryStatus::Done {
            self.status = StoryStatus::InProgress;
        }
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn non_blank(
    value: impl Into<String>,
    error: StoryDomainError,
) -> Result<String, StoryDomainError> {
    let raw = value.into();
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Err(error);
    }
    Ok(normalized.to_owned())
}
