//! In-memory integration tests for task lifecycle operations.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskDomainError, TaskState, UserId},
    services::{CreateTaskRequest, TaskService, TaskServiceError, UpdateTaskRequest},
};

type TestService = TaskService<InMemoryTaskRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    TaskService::new(Arc::new(InMemoryTaskRepository::new()), Arc::new(DefaultClock))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_from_creation_to_done(service: TestService) -> eyre::Result<()> {
    let created = service
        .create(
            CreateTaskRequest::new(
                "Harden the login flow",
                "Add lockout after repeated failed sign-in attempts",
                3,
            )
            .with_assignee(UserId::new(11)),
        )
        .await?;
    eyre::ensure!(created.state() == TaskState::Todo);

    let started = service
        .update(
            created.id(),
            UpdateTaskRequest::new().with_state(TaskState::InProgress),
        )
        .await?;
    eyre::ensure!(started.state() == TaskState::InProgress);
    eyre::ensure!(started.progress_started_at().is_some());

    let finished = service
        .update(
            created.id(),
            UpdateTaskRequest::new().with_state(TaskState::Done),
        )
        .await?;
    eyre::ensure!(finished.state() == TaskState::Done);
    eyre::ensure!(finished.done_at() >= finished.progress_started_at());

    let fetched = service.read(created.id()).await?;
    eyre::ensure!(fetched == finished);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn terminal_task_accepts_only_reaffirmation(service: TestService) -> eyre::Result<()> {
    let created = service
        .create(
            CreateTaskRequest::new(
                "Retire the old API",
                "Shut down the deprecated v1 endpoints",
                1,
            )
            .with_assignee(UserId::new(4)),
        )
        .await?;
    service
        .update(
            created.id(),
            UpdateTaskRequest::new().with_state(TaskState::InProgress),
        )
        .await?;
    service
        .update(
            created.id(),
            UpdateTaskRequest::new().with_state(TaskState::Cancelled),
        )
        .await?;

    let reaffirmed = service
        .update(
            created.id(),
            UpdateTaskRequest::new().with_state(TaskState::Cancelled),
        )
        .await?;
    eyre::ensure!(reaffirmed.state() == TaskState::Cancelled);

    let reopened = service
        .update(
            created.id(),
            UpdateTaskRequest::new().with_state(TaskState::InProgress),
        )
        .await;
    eyre::ensure!(matches!(
        reopened,
        Err(TaskServiceError::Domain(
            TaskDomainError::InvalidStateTransition { .. }
        ))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_update_is_fully_discarded(service: TestService) -> eyre::Result<()> {
    let created = service
        .create(CreateTaskRequest::new(
            "Tune the slow query",
            "Profile and index the reporting query",
            2,
        ))
        .await?;

    // A field edit bundled with an illegal transition must not survive.
    let result = service
        .update(
            created.id(),
            UpdateTaskRequest::new()
                .with_priority(3)
                .with_state(TaskState::Done),
        )
        .await;
    eyre::ensure!(matches!(
        result,
        Err(TaskServiceError::Domain(
            TaskDomainError::InvalidStateTransition { .. }
        ))
    ));

    let fetched = service.read(created.id()).await?;
    eyre::ensure!(fetched == created);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removed_task_is_gone_and_its_id_is_retired(service: TestService) -> eyre::Result<()> {
    let first = service
        .create(CreateTaskRequest::new(
            "Collect stale branches",
            "Delete merged branches older than a month",
            1,
        ))
        .await?;
    service.remove(first.id()).await?;

    let read_back = service.read(first.id()).await;
    eyre::ensure!(matches!(read_back, Err(TaskServiceError::NotFound(_))));

    let replacement = service
        .create(CreateTaskRequest::new(
            "Collect stale branches",
            "Delete merged branches older than a month",
            1,
        ))
        .await?;
    eyre::ensure!(replacement.id() > first.id());
    Ok(())
}
