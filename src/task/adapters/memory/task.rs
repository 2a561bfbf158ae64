//! In-memory repository for task lifecycle tests and embedding.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{ReportPeriod, Task, TaskId, TaskPage, TaskQuery, UserId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Rows iterate in identifier order, which is the adapter's natural
/// storage order when a query requests no sort.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    next_id: i64,
}

impl Default for InMemoryTaskState {
    fn default() -> Self {
        Self {
            tasks: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn next_task_id(&self) -> TaskRepositoryResult<TaskId> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        // The counter only ever grows, so deleted identifiers stay retired.
        let id = TaskId::new(state.next_id);
        state.next_id += 1;
        Ok(id)
    }

    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn query(&self, query: &TaskQuery) -> TaskRepositoryResult<TaskPage> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut matching: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| query.filter().matches(task))
            .cloned()
            .collect();
        let total_count = u64::try_from(matching.len()).unwrap_or(u64::MAX);

        if let Some(sort) = query.sort() {
            matching.sort_by(|a, b| sort.compare(a, b));
        }

        let offset = usize::try_from(query.page().offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.page().limit()).unwrap_or(usize::MAX);
        let tasks = matching.into_iter().skip(offset).take(limit).collect();

        Ok(TaskPage { tasks, total_count })
    }

    async fn find_created_between(
        &self,
        period: &ReportPeriod,
        assignee: Option<UserId>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .tasks
            .values()
            .filter(|task| period.contains(task.created_at()))
            .filter(|task| assignee.is_none_or(|user| task.assigned_user_id() == Some(user)))
            .cloned()
            .collect())
    }
}
