#![allow(clippy::expect_used)]
//! The Task log and its date-keyed notes update.

use caldays_core::command::{Notes, ReadCalendars};
use caldays_core::error::CoreError;
use caldays_service::calendar::{read_calendar, read_calendar_date, read_overview};
use caldays_service::task::{log_task, update_task_notes_by_date};
use caldays_service::todo::create_todo;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn update_by_date_touches_only_that_task() {
    let fx = Fixture::new();
    let cal = fx.calendar("Swim", true).await;
    let first = log_task(&fx.backend, &fx.user, cal, date("2024-02-01"), &notes("a"))
        .await
        .expect("task");
    let second = log_task(&fx.backend, &fx.user, cal, date("2024-02-02"), &notes("b"))
        .await
        .expect("task");

    let updated = update_task_notes_by_date(
        &fx.backend,
        &fx.user,
        cal,
        date("2024-02-02"),
        &notes("b2"),
    )
    .await
    .expect("update");

    assert_eq!(updated.id, second.id);
    let tasks = fx.store.tasks();
    assert_eq!(tasks[0], first);
    assert_eq!(tasks[1].notes.as_deref(), Some("b2"));
}

#[test_log::test(tokio::test)]
async fn update_by_date_without_notes_clears_them() {
    let fx = Fixture::new();
    let cal = fx.calendar("Swim", true).await;
    log_task(&fx.backend, &fx.user, cal, date("2024-02-01"), &notes("a"))
        .await
        .expect("task");

    let updated =
        update_task_notes_by_date(&fx.backend, &fx.user, cal, date("2024-02-01"), &Notes::default())
            .await
            .expect("update");

    assert_eq!(updated.notes, None);
}

#[test_log::test(tokio::test)]
async fn update_by_date_with_no_task_is_not_found() {
    let fx = Fixture::new();
    let cal = fx.calendar("Swim", true).await;

    let err = update_task_notes_by_date(&fx.backend, &fx.user, cal, date("2024-02-01"), &notes("x"))
        .await
        .expect_err("no task on that date");

    assert_eq!(
        err.as_core(),
        Some(&CoreError::NotFound("Task not found".to_string()))
    );
}

#[test_log::test(tokio::test)]
async fn update_by_date_with_two_tasks_is_inconsistent() {
    let fx = Fixture::new();
    let cal = fx.calendar("Swim", true).await;
    let day = date("2024-02-01");
    log_task(&fx.backend, &fx.user, cal, day, &notes("a"))
        .await
        .expect("task");
    log_task(&fx.backend, &fx.user, cal, day, &notes("b"))
        .await
        .expect("task");

    let err = update_task_notes_by_date(&fx.backend, &fx.user, cal, day, &notes("x"))
        .await
        .expect_err("two tasks on that date");

    assert!(matches!(
        err.as_core(),
        Some(CoreError::InternalInconsistency(_))
    ));
    assert!(
        fx.store
            .tasks()
            .iter()
            .all(|t| t.notes.as_deref() != Some("x"))
    );
}

#[test_log::test(tokio::test)]
async fn overview_collapses_duplicate_done_dates() {
    let fx = Fixture::new();
    let cal = fx.calendar("Swim", false).await;
    fx.pin(cal, 1);
    for day in ["2024-02-03", "2024-01-15", "2024-02-03", "2024-02-01"] {
        fx.store.insert_task(cal, date(day), None);
    }
    create_todo(&fx.backend, &fx.user, cal, date("2024-02-10"), &Notes::default())
        .await
        .expect("todo");

    let overview = read_overview(
        &fx.backend,
        &fx.user,
        &ReadCalendars {
            date_from: date("2024-02-01"),
            show_all: false,
        },
    )
    .await
    .expect("overview");

    assert_eq!(overview.calendars.len(), 1);
    let preview = &overview.calendars[0];
    assert_eq!(
        preview.done_task_dates,
        vec![date("2024-02-01"), date("2024-02-03")]
    );
    assert_eq!(preview.todo_dates, vec![date("2024-02-10")]);
}

#[test_log::test(tokio::test)]
async fn calendar_detail_lists_days_and_planned_days() {
    let fx = Fixture::new();
    let cal = fx.calendar("Swim", true).await;
    fx.store.insert_task(cal, date("2024-02-05"), Some("late"));
    fx.store.insert_task(cal, date("2024-02-01"), None);
    create_todo(&fx.backend, &fx.user, cal, date("2024-02-20"), &notes("plan"))
        .await
        .expect("todo");

    let detail = read_calendar(&fx.backend, &fx.user, cal)
        .await
        .expect("detail");

    let days: Vec<_> = detail.days.iter().map(|d| d.date).collect();
    assert_eq!(days, vec![date("2024-02-01"), date("2024-02-05")]);
    assert_eq!(detail.planned_days.len(), 1);
    assert_eq!(detail.planned_days[0].notes.as_deref(), Some("plan"));
}

#[test_log::test(tokio::test)]
async fn date_view_separates_done_tasks_from_todos() {
    let fx = Fixture::new();
    let cal = fx.calendar("Swim", true).await;
    let day = date("2024-02-05");
    let task = log_task(&fx.backend, &fx.user, cal, day, &notes("done"))
        .await
        .expect("task");
    let todo = create_todo(&fx.backend, &fx.user, cal, day, &Notes::default())
        .await
        .expect("todo");
    create_todo(&fx.backend, &fx.user, cal, date("2024-02-06"), &Notes::default())
        .await
        .expect("other day");

    let view = read_calendar_date(&fx.backend, &fx.user, cal, day)
        .await
        .expect("date view");

    assert_eq!(view.date, day);
    assert_eq!(view.done_tasks.len(), 1);
    assert_eq!(view.done_tasks[0].id, task.id);
    assert_eq!(view.todos.len(), 1);
    assert_eq!(view.todos[0].id, todo.id);
}
