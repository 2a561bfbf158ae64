//! In-memory integration tests for list view queries.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{
        PageRequest, Priority, SortField, SortOrder, TaskFilter, TaskQuery, TaskSort, TaskState,
        UserId,
    },
    services::{CreateTaskRequest, TaskService, UpdateTaskRequest},
};

type TestService = TaskService<InMemoryTaskRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    TaskService::new(Arc::new(InMemoryTaskRepository::new()), Arc::new(DefaultClock))
}

/// Seeds twelve tasks: priorities cycle 1, 2, 3; every third task is
/// assigned to user 5 and moved to `in_progress`.
async fn seed_tasks(service: &TestService) -> eyre::Result<()> {
    for index in 0_u8..12 {
        let priority = (index % 3) + 1;
        let mut request = CreateTaskRequest::new(
            format!("Seeded task {index}"),
            "Fixture row for query integration",
            priority,
        );
        if index % 3 == 0 {
            request = request.with_assignee(UserId::new(5));
        }
        let created = service.create(request).await?;
        if index % 3 == 0 {
            service
                .update(
                    created.id(),
                    UpdateTaskRequest::new().with_state(TaskState::InProgress),
                )
                .await?;
        }
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pagination_slices_rows_and_keeps_total(service: TestService) -> eyre::Result<()> {
    seed_tasks(&service).await?;

    let query = TaskQuery::new(PageRequest::new(2, 5)?)
        .with_sort(TaskSort::ascending(SortField::Id));
    let page = service.list(&query).await?;

    eyre::ensure!(page.tasks.len() == 5);
    eyre::ensure!(page.total_count == 12);
    let ids: Vec<i64> = page.tasks.iter().map(|task| task.id().value()).collect();
    eyre::ensure!(ids == vec![6, 7, 8, 9, 10]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filters_combine_and_narrow_the_population(service: TestService) -> eyre::Result<()> {
    seed_tasks(&service).await?;

    let query = TaskQuery::new(PageRequest::default()).with_filter(
        TaskFilter::new()
            .with_state(TaskState::InProgress)
            .with_assignee(UserId::new(5)),
    );
    let page = service.list(&query).await?;

    eyre::ensure!(page.total_count == 4);
    eyre::ensure!(
        page.tasks
            .iter()
            .all(|task| task.state() == TaskState::InProgress)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn descending_priority_sort_orders_the_page(service: TestService) -> eyre::Result<()> {
    seed_tasks(&service).await?;

    let query = TaskQuery::new(PageRequest::new(1, 12)?)
        .with_sort(TaskSort::new(SortField::Priority, SortOrder::Desc));
    let page = service.list(&query).await?;

    let priorities: Vec<Priority> = page.tasks.iter().map(|task| task.priority()).collect();
    let mut expected = priorities.clone();
    expected.sort();
    expected.reverse();
    eyre::ensure!(priorities == expected);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filter_matching_nothing_is_an_empty_result(service: TestService) -> eyre::Result<()> {
    seed_tasks(&service).await?;

    let query = TaskQuery::new(PageRequest::default())
        .with_filter(TaskFilter::new().with_state(TaskState::Cancelled));
    let page = service.list(&query).await?;

    eyre::ensure!(page.tasks.is_empty());
    eyre::ensure!(page.total_count == 0);
    Ok(())
}
