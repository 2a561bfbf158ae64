//! Task aggregate root and the lifecycle state machine.

use super::{
    ParseTaskStateError, Priority, TaskDescription, TaskDomainError, TaskId, TaskTitle, UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// Task has been created but work has not started.
    Todo,
    /// Task is being worked on.
    InProgress,
    /// Task work has finished.
    Done,
    /// Task has been abandoned before completion.
    Cancelled,
}

impl TaskState {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns `true` when `to` is a legal transition target from `self`.
    ///
    /// Same-state requests are not transitions; [`Task::transition_to`]
    /// accepts them as reaffirmations without consulting this table.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Todo, Self::InProgress)
                | (Self::InProgress, Self::Done)
                | (Self::InProgress, Self::Cancelled)
        )
    }

    /// Returns `true` when no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }
}

impl TryFrom<&str> for TaskState {
    type Error = ParseTaskStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStateError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task aggregate root.
///
/// All mutation goes through the methods on this type; the lifecycle
/// timestamps are stamped at most once and never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: TaskDescription,
    priority: Priority,
    state: TaskState,
    assigned_user_id: Option<UserId>,
    assigned_at: Option<DateTime<Utc>>,
    progress_started_at: Option<DateTime<Utc>>,
    done_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: TaskDescription,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted lifecycle state.
    pub state: TaskState,
    /// Persisted assignee, if any.
    pub assigned_user_id: Option<UserId>,
    /// Persisted first-assignment timestamp, if any.
    pub assigned_at: Option<DateTime<Utc>>,
    /// Persisted work-start timestamp, if any.
    pub progress_started_at: Option<DateTime<Utc>>,
    /// Persisted completion timestamp, if any.
    pub done_at: Option<DateTime<Utc>>,
    /// Persisted cancellation timestamp, if any.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in the `todo` state.
    ///
    /// When an assignee is supplied, `assigned_at` is stamped with the
    /// creation instant.
    #[must_use]
    pub fn new(
        id: TaskId,
        title: TaskTitle,
        description: TaskDescription,
        priority: Priority,
        assignee: Option<UserId>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            title,
            description,
            priority,
            state: TaskState::Todo,
            assigned_user_id: assignee,
            assigned_at: assignee.map(|_| timestamp),
            progress_started_at: None,
            done_at: None,
            cancelled_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            state: data.state,
            assigned_user_id: data.assigned_user_id,
            assigned_at: data.assigned_at,
            progress_started_at: data.progress_started_at,
            done_at: data.done_at,
            cancelled_at: data.cancelled_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub const fn description(&self) -> &TaskDescription {
        &self.description
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the task lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Returns the current assignee, if any.
    #[must_use]
    pub const fn assigned_user_id(&self) -> Option<UserId> {
        self.assigned_user_id
    }

    /// Returns the instant the task was first assigned, if ever.
    #[must_use]
    pub const fn assigned_at(&self) -> Option<DateTime<Utc>> {
        self.assigned_at
    }

    /// Returns the instant work first started, if ever.
    #[must_use]
    pub const fn progress_started_at(&self) -> Option<DateTime<Utc>> {
        self.progress_started_at
    }

    /// Returns the instant the task was completed, if ever.
    #[must_use]
    pub const fn done_at(&self) -> Option<DateTime<Utc>> {
        self.done_at
    }

    /// Returns the instant the task was cancelled, if ever.
    #[must_use]
    pub const fn cancelled_at(&self) -> Option<DateTime<Utc>> {
        self.cancelled_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the task title.
    pub fn rename(&mut self, title: TaskTitle, clock: &impl Clock) {
        self.title = title;
        self.touch(clock);
    }

    /// Replaces the task description.
    pub fn set_description(&mut self, description: TaskDescription, clock: &impl Clock) {
        self.description = description;
        self.touch(clock);
    }

    /// Replaces the task priority.
    pub fn set_priority(&mut self, priority: Priority, clock: &impl Clock) {
        self.priority = priority;
        self.touch(clock);
    }

    /// Assigns the task to a user.
    ///
    /// `assigned_at` records the first assignment only; changing the
    /// assignee afterwards leaves it untouched.
    pub fn assign(&mut self, user: UserId, clock: &impl Clock) {
        let now = clock.utc();
        stamp_once(&mut self.assigned_at, now);
        self.assigned_user_id = Some(user);
        self.updated_at = now;
    }

    /// Applies a requested lifecycle transition.
    ///
    /// Requesting the current state is an idempotent reaffirmation: it
    /// refreshes `updated_at` but never re-stamps an already-set lifecycle
    /// timestamp. A legal transition stamps the matching lifecycle instant
    /// the first time the state is entered. On any error the aggregate is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AssignmentRequired`] when `in_progress`
    /// is requested without an assignee, or
    /// [`TaskDomainError::InvalidStateTransition`] for any request outside
    /// the lifecycle table.
    pub fn transition_to(
        &mut self,
        requested: TaskState,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if requested == self.state {
            self.touch(clock);
            return Ok(());
        }
        if !self.state.can_transition_to(requested) {
            return Err(TaskDomainError::InvalidStateTransition {
                task_id: self.id,
                from: self.state,
                to: requested,
            });
        }
        if requested == TaskState::InProgress && self.assigned_user_id.is_none() {
            return Err(TaskDomainError::AssignmentRequired(self.id));
        }

        let now = clock.utc();
        match requested {
            TaskState::InProgress => stamp_once(&mut self.progress_started_at, now),
            TaskState::Done => stamp_once(&mut self.done_at, now),
            TaskState::Cancelled => stamp_once(&mut self.cancelled_at, now),
            TaskState::Todo => {}
        }
        self.state = requested;
        self.updated_at = now;
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Sets a timestamp field the first time only; later calls are no-ops.
fn stamp_once(field: &mut Option<DateTime<Utc>>, now: DateTime<Utc>) {
    if field.is_none() {
        *field = Some(now);
    }
}
