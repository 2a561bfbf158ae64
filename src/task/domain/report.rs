//! Period-bounded productivity report aggregation.

use super::{Task, TaskState, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive creation-time window a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl ReportPeriod {
    /// Creates an inclusive period from both bounds.
    #[must_use]
    pub const fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// Returns the inclusive lower bound.
    #[must_use]
    pub const fn from(&self) -> DateTime<Utc> {
        self.from
    }

    /// Returns the inclusive upper bound.
    #[must_use]
    pub const fn to(&self) -> DateTime<Utc> {
        self.to
    }

    /// Returns `true` when the instant falls within the window.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant <= self.to
    }
}

/// Selection criteria for a report: a period, optionally one assignee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportScope {
    assigned_user_id: Option<UserId>,
    period: ReportPeriod,
}

impl ReportScope {
    /// Creates a scope over the given period with no assignee filter.
    #[must_use]
    pub const fn new(period: ReportPeriod) -> Self {
        Self {
            assigned_user_id: None,
            period,
        }
    }

    /// Narrows the scope to one assignee.
    #[must_use]
    pub const fn with_assignee(mut self, user: UserId) -> Self {
        self.assigned_user_id = Some(user);
        self
    }

    /// Returns the assignee filter, if present.
    #[must_use]
    pub const fn assigned_user_id(&self) -> Option<UserId> {
        self.assigned_user_id
    }

    /// Returns the creation-time window.
    #[must_use]
    pub const fn period(&self) -> ReportPeriod {
        self.period
    }

    /// Returns `true` when the task falls within the scope.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.period.contains(task.created_at())
            && self
                .assigned_user_id
                .is_none_or(|user| task.assigned_user_id() == Some(user))
    }
}

/// Snapshot of task health over a creation-time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskReport {
    /// Number of tasks completed within the scope.
    pub done_tasks_count: u64,
    /// Mean wall-clock completion time of the done tasks, in whole
    /// minutes rounded to nearest. Zero when no tasks are done.
    pub average_completion_time_min: i64,
    /// Number of tasks currently being worked on.
    pub in_progress_count: u64,
    /// Number of tasks not yet started.
    pub todo_count: u64,
}

/// Computes a report over the tasks falling within the scope.
///
/// Cancelled tasks count in no bucket; the report measures active and
/// completed throughput only. Completion time is `done_at` minus
/// `progress_started_at`.
#[must_use]
pub fn aggregate_report(tasks: &[Task], scope: &ReportScope) -> TaskReport {
    let mut done_tasks_count: u64 = 0;
    let mut in_progress_count: u64 = 0;
    let mut todo_count: u64 = 0;
    let mut total_completion_ms: i64 = 0;

    for task in tasks.iter().filter(|task| scope.matches(task)) {
        match task.state() {
            TaskState::Done => {
                done_tasks_count += 1;
                if let Some((done_at, started_at)) =
                    task.done_at().zip(task.progress_started_at())
                {
                    total_completion_ms += (done_at - started_at).num_milliseconds();
                }
            }
            TaskState::InProgress => in_progress_count += 1,
            TaskState::Todo => todo_count += 1,
            TaskState::Cancelled => {}
        }
    }

    TaskReport {
        done_tasks_count,
        average_completion_time_min: mean_minutes(
            total_completion_ms,
            i64::try_from(done_tasks_count).unwrap_or(i64::MAX),
        ),
        in_progress_count,
        todo_count,
    }
}

/// Mean of `count` durations totalling `total_ms`, in whole minutes
/// rounded to nearest with ties away from zero. Zero when `count` is zero.
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "exact round-half-up over integer milliseconds, no float drift"
)]
fn mean_minutes(total_ms: i64, count: i64) -> i64 {
    if count == 0 {
        return 0;
    }
    let minute_ms = count.saturating_mul(60_000);
    (total_ms + minute_ms / 2) / minute_ms
}
