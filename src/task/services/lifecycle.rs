//! Service layer orchestrating task creation, mutation, listing, and
//! reporting over a storage collaborator.

use crate::task::{
    domain::{
        Priority, ReportPeriod, ReportScope, Task, TaskDescription, TaskDomainError, TaskId,
        TaskPage, TaskQuery, TaskReport, TaskState, TaskTitle, UserId, aggregate_report,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    priority: u8,
    assign_to: Option<UserId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>, priority: u8) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority,
            assign_to: None,
        }
    }

    /// Assigns the task on creation.
    #[must_use]
    pub const fn with_assignee(mut self, user: UserId) -> Self {
        self.assign_to = Some(user);
        self
    }
}

/// Request payload for updating a task.
///
/// Every field is optional; at most one state transition is applied per
/// call. An assignee supplied alongside an `in_progress` transition
/// satisfies the assignment precondition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    priority: Option<u8>,
    assigned_user_id: Option<UserId>,
    state: Option<TaskState>,
}

impl UpdateTaskRequest {
    /// Creates an empty update request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Assigns the task to a user.
    #[must_use]
    pub const fn with_assignee(mut self, user: UserId) -> Self {
        self.assigned_user_id = Some(user);
        self
    }

    /// Requests a state transition.
    #[must_use]
    pub const fn with_state(mut self, state: TaskState) -> Self {
        self.state = Some(state);
        self
    }
}

/// Request payload for a productivity report.
///
/// The period defaults to all of history up to now; either bound may be
/// narrowed, and the report may be scoped to one assignee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportRequest {
    assigned_user_id: Option<UserId>,
    period_from: Option<DateTime<Utc>>,
    period_to: Option<DateTime<Utc>>,
}

impl ReportRequest {
    /// Creates a report request over all of history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scopes the report to one assignee.
    #[must_use]
    pub const fn with_assignee(mut self, user: UserId) -> Self {
        self.assigned_user_id = Some(user);
        self
    }

    /// Sets the inclusive lower creation-time bound.
    #[must_use]
    pub const fn with_period_from(mut self, from: DateTime<Utc>) -> Self {
        self.period_from = Some(from);
        self
    }

    /// Sets the inclusive upper creation-time bound.
    #[must_use]
    pub const fn with_period_to(mut self, to: DateTime<Utc>) -> Self {
        self.period_to = Some(to);
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Domain validation or a lifecycle rule failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
///
/// Composes the lifecycle state machine, the query model, and the report
/// aggregator with a storage collaborator. Each call is one read-modify-
/// write cycle; nothing is persisted until every step of a mutation has
/// succeeded.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a new task in the `todo` state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when a field fails validation
    /// or [`TaskServiceError::Repository`] when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let title = TaskTitle::new(request.title)?;
        let description = TaskDescription::new(request.description)?;
        let priority = Priority::new(request.priority)?;

        let id = self.repository.next_task_id().await?;
        let task = Task::new(
            id,
            title,
            description,
            priority,
            request.assign_to,
            &*self.clock,
        );
        self.repository.insert(&task).await?;
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not
    /// exist.
    pub async fn read(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }

    /// Applies field edits and at most one state transition to a task.
    ///
    /// The assignment is applied before the transition so an assignee
    /// supplied in the same call satisfies the `in_progress`
    /// precondition. On any failure nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not
    /// exist, [`TaskServiceError::Domain`] when validation or the
    /// lifecycle table rejects the update, or
    /// [`TaskServiceError::Repository`] when persistence fails.
    pub async fn update(&self, id: TaskId, request: UpdateTaskRequest) -> TaskServiceResult<Task> {
        let mut task = self.read(id).await?;

        if let Some(title) = request.title {
            task.rename(TaskTitle::new(title)?, &*self.clock);
        }
        if let Some(description) = request.description {
            task.set_description(TaskDescription::new(description)?, &*self.clock);
        }
        if let Some(priority) = request.priority {
            task.set_priority(Priority::new(priority)?, &*self.clock);
        }
        if let Some(user) = request.assigned_user_id {
            task.assign(user, &*self.clock);
        }
        if let Some(state) = request.state {
            task.transition_to(state, &*self.clock)?;
        }

        self.repository.update(&task).await?;
        Ok(task)
    }

    /// Hard-deletes a task. Its identifier is never reused.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not
    /// exist.
    pub async fn remove(&self, id: TaskId) -> TaskServiceResult<()> {
        let task = self.read(id).await?;
        self.repository.delete(task.id()).await?;
        Ok(())
    }

    /// Returns one page of tasks matching the query, plus the total
    /// match count before pagination.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the storage lookup
    /// fails. Pages beyond the available rows are empty results, not
    /// errors.
    pub async fn list(&self, query: &TaskQuery) -> TaskServiceResult<TaskPage> {
        Ok(self.repository.query(query).await?)
    }

    /// Computes a productivity report over a creation-time window.
    ///
    /// Missing period bounds default to the Unix epoch and the current
    /// clock time, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the storage lookup
    /// fails.
    pub async fn report(&self, request: ReportRequest) -> TaskServiceResult<TaskReport> {
        let period = ReportPeriod::new(
            request.period_from.unwrap_or(DateTime::UNIX_EPOCH),
            request.period_to.unwrap_or_else(|| self.clock.utc()),
        );
        let tasks = self
            .repository
            .find_created_between(&period, request.assigned_user_id)
            .await?;

        let mut scope = ReportScope::new(period);
        if let Some(user) = request.assigned_user_id {
            scope = scope.with_assignee(user);
        }
        Ok(aggregate_report(&tasks, &scope))
    }
}
