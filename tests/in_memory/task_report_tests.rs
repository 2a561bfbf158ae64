//! In-memory integration tests for productivity reports.

use std::sync::Arc;

use chrono::{Duration, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskState, UserId},
    services::{CreateTaskRequest, ReportRequest, TaskService, UpdateTaskRequest},
};

type TestService = TaskService<InMemoryTaskRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    TaskService::new(Arc::new(InMemoryTaskRepository::new()), Arc::new(DefaultClock))
}

async fn seed_report_population(service: &TestService) -> eyre::Result<()> {
    let worker = UserId::new(21);

    for _ in 0..2 {
        let task = service
            .create(
                CreateTaskRequest::new(
                    "Close out the sprint",
                    "Verify and archive the finished work",
                    2,
                )
                .with_assignee(worker),
            )
            .await?;
        service
            .update(
                task.id(),
                UpdateTaskRequest::new().with_state(TaskState::InProgress),
            )
            .await?;
        service
            .update(task.id(), UpdateTaskRequest::new().with_state(TaskState::Done))
            .await?;
    }

    let active = service
        .create(
            CreateTaskRequest::new(
                "Draft the quarterly plan",
                "Collect themes and sketch the roadmap",
                3,
            )
            .with_assignee(worker),
        )
        .await?;
    service
        .update(
            active.id(),
            UpdateTaskRequest::new().with_state(TaskState::InProgress),
        )
        .await?;

    let abandoned = service
        .create(
            CreateTaskRequest::new(
                "Evaluate the beta tool",
                "Trial the vendor offering with one team",
                1,
            )
            .with_assignee(worker),
        )
        .await?;
    service
        .update(
            abandoned.id(),
            UpdateTaskRequest::new().with_state(TaskState::InProgress),
        )
        .await?;
    service
        .update(
            abandoned.id(),
            UpdateTaskRequest::new().with_state(TaskState::Cancelled),
        )
        .await?;

    service
        .create(CreateTaskRequest::new(
            "Refresh the runbooks",
            "Bring the incident runbooks up to date",
            1,
        ))
        .await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn default_report_covers_all_history(service: TestService) -> eyre::Result<()> {
    seed_report_population(&service).await?;

    let report = service.report(ReportRequest::new()).await?;

    eyre::ensure!(report.done_tasks_count == 2);
    eyre::ensure!(report.in_progress_count == 1);
    eyre::ensure!(report.todo_count == 1);
    // Cancelled work is absent from every bucket.
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_scope_drops_unassigned_tasks(service: TestService) -> eyre::Result<()> {
    seed_report_population(&service).await?;

    let report = service
        .report(ReportRequest::new().with_assignee(UserId::new(21)))
        .await?;

    eyre::ensure!(report.done_tasks_count == 2);
    eyre::ensure!(report.in_progress_count == 1);
    eyre::ensure!(report.todo_count == 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn future_window_matches_no_tasks(service: TestService) -> eyre::Result<()> {
    seed_report_population(&service).await?;

    let report = service
        .report(
            ReportRequest::new()
                .with_period_from(Utc::now() + Duration::days(1))
                .with_period_to(Utc::now() + Duration::days(2)),
        )
        .await?;

    eyre::ensure!(report.done_tasks_count == 0);
    eyre::ensure!(report.average_completion_time_min == 0);
    eyre::ensure!(report.in_progress_count == 0);
    eyre::ensure!(report.todo_count == 0);
    Ok(())
}
