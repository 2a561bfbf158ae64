//! Error types for task domain validation and parsing.

use super::{TaskId, TaskState};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is outside the permitted length range.
    #[error("task title must be between 2 and 35 characters, got {0}")]
    InvalidTitleLength(usize),

    /// The task description is outside the permitted length range.
    #[error("task description must be between 10 and 150 characters, got {0}")]
    InvalidDescriptionLength(usize),

    /// The priority is outside the ordered severity range.
    #[error("task priority must be between 1 (low) and 3 (high), got {0}")]
    InvalidPriority(u8),

    /// The requested page number is below the first page.
    #[error("page number must be at least 1, got {0}")]
    InvalidPage(u32),

    /// The requested page size is empty.
    #[error("page limit must be at least 1, got {0}")]
    InvalidPageLimit(u32),

    /// A transition to `in_progress` was requested without an assignee.
    #[error("task {0} must be assigned before moving to in_progress")]
    AssignmentRequired(TaskId),

    /// The requested transition is not in the lifecycle table.
    #[error("invalid state transition for task {task_id}: {from} -> {to}")]
    InvalidStateTransition {
        /// Identifier of the task being transitioned.
        task_id: TaskId,
        /// Lifecycle state the task is currently in.
        from: TaskState,
        /// Lifecycle state that was requested.
        to: TaskState,
    },
}

/// Error returned while parsing task states from persistence or the edge.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task state: {0}")]
pub struct ParseTaskStateError(pub String);

/// Error returned while parsing sortable field names at the edge.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort field: {0}")]
pub struct ParseSortFieldError(pub String);

/// Error returned while parsing sort directions at the edge.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort order: {0}")]
pub struct ParseSortOrderError(pub String);
