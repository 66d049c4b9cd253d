//! Calendar operations and the read views built around them.

use caldays_core::command::{CreateCalendar, ReadCalendars, UpdateCalendar};
use caldays_core::model::{Calendar, CalendarId, UserIdentity};
use caldays_core::repository::Backend;
use chrono::NaiveDate;

use crate::error::ServiceResult;
use crate::notes::{NotesCheck, check_uses_notes};
use crate::task::done_dates_from;
use crate::view::{
    CalendarDateView, CalendarDetail, CalendarHeader, CalendarPreview, CalendarsOverview, Day,
    Entry,
};

/// Result of a calendar update. Refusing to disable notes is an expected
/// outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarUpdate {
    Updated(Calendar),
    UsesNotesCannotBeDisabled,
}

/// ## Summary
/// Lists the caller's calendars; unpinned ones only when `include_unpinned`.
///
/// ## Errors
/// Returns an error if the backend cannot be queried.
pub async fn list_calendars(
    backend: &Backend,
    user: &UserIdentity,
    include_unpinned: bool,
) -> ServiceResult<Vec<Calendar>> {
    Ok(backend
        .calendars
        .list_for_user(user.id, include_unpinned)
        .await?)
}

/// ## Summary
/// Loads a calendar owned by the caller.
///
/// ## Errors
/// Returns `NotFound` if the calendar does not exist or belongs to someone else.
pub async fn owned_calendar(
    backend: &Backend,
    user: &UserIdentity,
    calendar_id: CalendarId,
) -> ServiceResult<Calendar> {
    Ok(backend
        .calendars
        .get_by_id_for_user(calendar_id, user.id)
        .await?)
}

/// ## Summary
/// Creates a calendar for the caller.
///
/// ## Errors
/// Returns an error if the backend rejects the insert.
#[tracing::instrument(skip(backend, command), fields(user_id = user.id))]
pub async fn create_calendar(
    backend: &Backend,
    user: &UserIdentity,
    command: &CreateCalendar,
) -> ServiceResult<Calendar> {
    let calendar = backend.calendars.create(user.id, &command.fields).await?;
    tracing::info!(calendar_id = calendar.id, "Calendar created");
    Ok(calendar)
}

/// ## Summary
/// Updates a calendar owned by the caller.
///
/// Ownership is confirmed before the notes check, so a non-owner always gets
/// `NotFound` and never learns whether the calendar has notes.
///
/// ## Side Effects
/// Writes nothing when notes cannot be disabled.
///
/// ## Errors
/// Returns `NotFound` if the calendar does not exist or belongs to someone else.
#[tracing::instrument(skip(backend, command), fields(user_id = user.id, calendar_id = command.calendar_id))]
pub async fn update_calendar(
    backend: &Backend,
    user: &UserIdentity,
    command: &UpdateCalendar,
) -> ServiceResult<CalendarUpdate> {
    let calendar = owned_calendar(backend, user, command.calendar_id).await?;

    if check_uses_notes(backend, calendar.id, command.fields.uses_notes).await?
        == NotesCheck::HasNotes
    {
        tracing::info!("Refusing to disable notes on a calendar that has notes");
        return Ok(CalendarUpdate::UsesNotesCannotBeDisabled);
    }

    let updated = backend
        .calendars
        .update(calendar.id, user.id, &command.fields)
        .await?;
    tracing::info!("Calendar updated");

    Ok(CalendarUpdate::Updated(updated))
}

/// ## Summary
/// Builds the calendar list view: each calendar with its distinct done dates
/// from `date_from` on and the dates of its undone Todos.
///
/// ## Errors
/// Returns an error if the backend cannot be queried.
#[tracing::instrument(skip(backend), fields(user_id = user.id))]
pub async fn read_overview(
    backend: &Backend,
    user: &UserIdentity,
    command: &ReadCalendars,
) -> ServiceResult<CalendarsOverview> {
    let calendars = list_calendars(backend, user, command.show_all).await?;
    let ids: Vec<CalendarId> = calendars.iter().map(|c| c.id).collect();

    let undone = backend.todos.undone_by_calendars(&ids).await?;
    let mut done_dates = done_dates_from(backend, &ids, command.date_from).await?;

    let calendars = calendars
        .iter()
        .map(|calendar| CalendarPreview {
            calendar: CalendarHeader::from(calendar),
            done_task_dates: done_dates.remove(&calendar.id).unwrap_or_default(),
            todo_dates: undone
                .iter()
                .filter(|todo| todo.calendar_id == calendar.id)
                .map(|todo| todo.date)
                .collect(),
        })
        .collect();

    Ok(CalendarsOverview { calendars })
}

/// ## Summary
/// Builds one calendar's history: every Task as a day and every undone Todo
/// as a planned day.
///
/// ## Errors
/// Returns `NotFound` if the calendar does not exist or belongs to someone else.
#[tracing::instrument(skip(backend), fields(user_id = user.id))]
pub async fn read_calendar(
    backend: &Backend,
    user: &UserIdentity,
    calendar_id: CalendarId,
) -> ServiceResult<CalendarDetail> {
    let calendar = owned_calendar(backend, user, calendar_id).await?;

    let planned = backend.todos.undone_by_calendars(&[calendar.id]).await?;
    let tasks = backend.tasks.all_by_calendar(calendar.id).await?;

    Ok(CalendarDetail {
        calendar: CalendarHeader::from(&calendar),
        days: tasks.iter().map(Day::from).collect(),
        planned_days: planned.iter().map(Day::from).collect(),
    })
}

/// ## Summary
/// Builds the view of one calendar day: its Tasks and its undone Todos.
///
/// ## Errors
/// Returns `NotFound` if the calendar does not exist or belongs to someone else.
#[tracing::instrument(skip(backend), fields(user_id = user.id))]
pub async fn read_calendar_date(
    backend: &Backend,
    user: &UserIdentity,
    calendar_id: CalendarId,
    date: NaiveDate,
) -> ServiceResult<CalendarDateView> {
    let calendar = owned_calendar(backend, user, calendar_id).await?;

    let todos = backend
        .todos
        .undone_by_calendar_and_date(calendar.id, date)
        .await?;
    let tasks = backend.tasks.by_calendar_and_date(calendar.id, date).await?;

    Ok(CalendarDateView {
        calendar: CalendarHeader::from(&calendar),
        date,
        done_tasks: tasks.iter().map(Entry::from).collect(),
        todos: todos.iter().map(Entry::from).collect(),
    })
}
