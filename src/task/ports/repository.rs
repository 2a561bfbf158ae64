//! Repository port for task persistence, lookup, querying, and reporting.

use crate::task::domain::{ReportPeriod, Task, TaskId, TaskPage, TaskQuery, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Allocates the next task identifier.
    ///
    /// Identifiers increase monotonically and are never reallocated, even
    /// after the task they were issued for is deleted.
    async fn next_task_id(&self) -> TaskRepositoryResult<TaskId>;

    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (field edits, state,
    /// timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Hard-deletes a task. The identifier is retired, never reused.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Returns one page of tasks matching the query filters, plus the
    /// total match count before pagination.
    ///
    /// A page beyond the available rows yields an empty page, never an
    /// error. Without a requested sort the row order is the adapter's
    /// natural storage order.
    async fn query(&self, query: &TaskQuery) -> TaskRepositoryResult<TaskPage>;

    /// Returns all tasks created within the inclusive period, optionally
    /// narrowed to one assignee.
    async fn find_created_between(
        &self,
        period: &ReportPeriod,
        assignee: Option<UserId>,
    ) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
