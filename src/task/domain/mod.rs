//! Domain model for task lifecycle management.
//!
//! The task domain models validated task fields, the lifecycle state
//! machine with its set-once timestamps, the query model for list views,
//! and the productivity report aggregation, while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod fields;
mod ids;
mod query;
mod report;
mod task;

pub use error::{
    ParseSortFieldError, ParseSortOrderError, ParseTaskStateError, TaskDomainError,
};
pub use fields::{Priority, TaskDescription, TaskTitle};
pub use ids::{TaskId, UserId};
pub use query::{PageRequest, SortField, SortOrder, TaskFilter, TaskPage, TaskQuery, TaskSort};
pub use report::{ReportPeriod, ReportScope, TaskReport, aggregate_report};
pub use task::{PersistedTaskData, Task, TaskState};
