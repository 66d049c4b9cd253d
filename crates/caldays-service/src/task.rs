//! The Task log: completed entries recorded directly on a date.

use std::collections::HashMap;

use caldays_core::command::Notes;
use caldays_core::model::{CalendarId, Task, UserIdentity};
use caldays_core::repository::Backend;
use chrono::NaiveDate;

use crate::calendar::owned_calendar;
use crate::error::ServiceResult;

/// ## Summary
/// Logs a completed entry on `date` in a calendar owned by the caller.
/// Several Tasks may share a date.
///
/// ## Errors
/// Returns `NotFound` if the calendar does not exist or belongs to someone else.
#[tracing::instrument(skip(backend, command), fields(user_id = user.id))]
pub async fn log_task(
    backend: &Backend,
    user: &UserIdentity,
    calendar_id: CalendarId,
    date: NaiveDate,
    command: &Notes,
) -> ServiceResult<Task> {
    let calendar = owned_calendar(backend, user, calendar_id).await?;

    let task = backend
        .tasks
        .create(calendar.id, date, command.notes.as_deref())
        .await?;
    tracing::info!(task_id = task.id, "Task logged");

    Ok(task)
}

/// ## Summary
/// Replaces the notes of the Task logged on `date`. Omitted notes clear them.
///
/// ## Errors
/// Returns `NotFound` if the calendar is not the caller's or no Task exists on
/// that date, and `InternalInconsistency` if several do.
#[tracing::instrument(skip(backend, command), fields(user_id = user.id))]
pub async fn update_task_notes_by_date(
    backend: &Backend,
    user: &UserIdentity,
    calendar_id: CalendarId,
    date: NaiveDate,
    command: &Notes,
) -> ServiceResult<Task> {
    let calendar = owned_calendar(backend, user, calendar_id).await?;

    let task = backend
        .tasks
        .update_notes_by_date(calendar.id, date, command.notes.as_deref())
        .await?;
    tracing::info!(task_id = task.id, "Task notes updated");

    Ok(task)
}

/// ## Summary
/// For each calendar, the distinct dates on or after `date_from` that have at
/// least one Task, in ascending order. Calendars without Tasks are absent.
///
/// ## Errors
/// Returns an error if the backend cannot be queried.
pub async fn done_dates_from(
    backend: &Backend,
    calendar_ids: &[CalendarId],
    date_from: NaiveDate,
) -> ServiceResult<HashMap<CalendarId, Vec<NaiveDate>>> {
    if calendar_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let tasks = backend.tasks.from_date(calendar_ids, date_from).await?;
    Ok(distinct_dates_by_calendar(&tasks))
}

/// ## Summary
/// Groups Task dates per calendar, keeping the first occurrence of each date.
/// Input order is preserved, so date-sorted Tasks give date-sorted groups.
#[must_use]
pub fn distinct_dates_by_calendar(tasks: &[Task]) -> HashMap<CalendarId, Vec<NaiveDate>> {
    let mut grouped: HashMap<CalendarId, Vec<NaiveDate>> = HashMap::new();
    for task in tasks {
        let dates = grouped.entry(task.calendar_id).or_default();
        if !dates.contains(&task.date) {
            dates.push(task.date);
        }
    }
    grouped
}
