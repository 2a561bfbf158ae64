//! Query model for filtered, sorted, paginated task list views.

use super::{
    ParseSortFieldError, ParseSortOrderError, Priority, Task, TaskDomainError, TaskState, UserId,
};
use std::cmp::Ordering;

/// Validated pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Creates a validated page request.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPage`] or
    /// [`TaskDomainError::InvalidPageLimit`] when either value is zero.
    pub const fn new(page: u32, limit: u32) -> Result<Self, TaskDomainError> {
        if page == 0 {
            return Err(TaskDomainError::InvalidPage(page));
        }
        if limit == 0 {
            return Err(TaskDomainError::InvalidPageLimit(limit));
        }
        Ok(Self { page, limit })
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Returns the maximum number of rows per page.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Returns the number of rows to skip before the requested page.
    #[must_use]
    pub const fn offset(self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

impl Default for PageRequest {
    /// First page of ten rows.
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

/// Closed set of fields a list view may sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Sort by task identifier.
    Id,
    /// Sort by priority severity.
    Priority,
}

impl TryFrom<&str> for SortField {
    type Error = ParseSortFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "id" => Ok(Self::Id),
            "priority" => Ok(Self::Priority),
            _ => Err(ParseSortFieldError(value.to_owned())),
        }
    }
}

/// Sort direction for a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending order, the default when only a field is given.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl TryFrom<&str> for SortOrder {
    type Error = ParseSortOrderError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseSortOrderError(value.to_owned())),
        }
    }
}

/// Requested ordering over the filtered task set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSort {
    field: SortField,
    order: SortOrder,
}

impl TaskSort {
    /// Creates a sort over the given field and direction.
    #[must_use]
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Creates an ascending sort over the given field.
    #[must_use]
    pub const fn ascending(field: SortField) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    /// Returns the sorted field.
    #[must_use]
    pub const fn field(self) -> SortField {
        self.field
    }

    /// Returns the sort direction.
    #[must_use]
    pub const fn order(self) -> SortOrder {
        self.order
    }

    /// Totally orders two tasks by the chosen field and direction.
    ///
    /// Ties between equal field values are left to the underlying sort;
    /// no secondary ordering is guaranteed.
    #[must_use]
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        let ordering = match self.field {
            SortField::Id => a.id().cmp(&b.id()),
            SortField::Priority => a.priority().cmp(&b.priority()),
        };
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Exact-match filters combined with logical AND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskFilter {
    priority: Option<Priority>,
    state: Option<TaskState>,
    assigned_user_id: Option<UserId>,
}

impl TaskFilter {
    /// Creates a filter matching every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrows the filter to one priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Narrows the filter to one lifecycle state.
    #[must_use]
    pub const fn with_state(mut self, state: TaskState) -> Self {
        self.state = Some(state);
        self
    }

    /// Narrows the filter to one assignee.
    #[must_use]
    pub const fn with_assignee(mut self, user: UserId) -> Self {
        self.assigned_user_id = Some(user);
        self
    }

    /// Returns the priority filter, if present.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the state filter, if present.
    #[must_use]
    pub const fn state(&self) -> Option<TaskState> {
        self.state
    }

    /// Returns the assignee filter, if present.
    #[must_use]
    pub const fn assigned_user_id(&self) -> Option<UserId> {
        self.assigned_user_id
    }

    /// Returns `true` when the task satisfies every present filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.priority.is_none_or(|priority| task.priority() == priority)
            && self.state.is_none_or(|state| task.state() == state)
            && self
                .assigned_user_id
                .is_none_or(|user| task.assigned_user_id() == Some(user))
    }
}

/// A complete page request over the task collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskQuery {
    filter: TaskFilter,
    sort: Option<TaskSort>,
    page: PageRequest,
}

impl TaskQuery {
    /// Creates a query for the given page with no filters and no sort.
    #[must_use]
    pub fn new(page: PageRequest) -> Self {
        Self {
            filter: TaskFilter::new(),
            sort: None,
            page,
        }
    }

    /// Sets the filter set.
    #[must_use]
    pub const fn with_filter(mut self, filter: TaskFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the requested ordering.
    #[must_use]
    pub const fn with_sort(mut self, sort: TaskSort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Returns the filter set.
    #[must_use]
    pub const fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Returns the requested ordering, if any.
    #[must_use]
    pub const fn sort(&self) -> Option<TaskSort> {
        self.sort
    }

    /// Returns the pagination request.
    #[must_use]
    pub const fn page(&self) -> PageRequest {
        self.page
    }
}

/// One page of matching tasks plus the total match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPage {
    /// The rows within the requested page, in the active ordering.
    pub tasks: Vec<Task>,
    /// The number of rows matching the filters before pagination.
    pub total_count: u64,
}
