//! Todo lifecycle: PLANNED until completed, then DONE for good.
//!
//! Every operation confirms the caller owns the calendar before touching the
//! Todo, and every mutation of a DONE Todo fails with `AlreadyDone`.

use caldays_core::command::{CompleteTodo, CompletionMode, MoveTodo, Notes};
use caldays_core::error::CoreError;
use caldays_core::model::{CalendarId, Completion, Todo, TodoId, UserIdentity};
use caldays_core::repository::Backend;
use chrono::NaiveDate;

use crate::calendar::owned_calendar;
use crate::error::ServiceResult;

/// ## Summary
/// Plans a new Todo on `date`. Other Todos on the same date are left alone.
///
/// ## Errors
/// Returns `NotFound` if the calendar does not exist or belongs to someone else.
#[tracing::instrument(skip(backend, command), fields(user_id = user.id))]
pub async fn create_todo(
    backend: &Backend,
    user: &UserIdentity,
    calendar_id: CalendarId,
    date: NaiveDate,
    command: &Notes,
) -> ServiceResult<Todo> {
    let calendar = owned_calendar(backend, user, calendar_id).await?;

    let todo = backend
        .todos
        .create(calendar.id, date, command.notes.as_deref())
        .await?;
    tracing::info!(todo_id = todo.id, "Todo planned");

    Ok(todo)
}

/// Loads a Todo of an owned calendar and checks it is still planned.
async fn planned_todo(
    backend: &Backend,
    user: &UserIdentity,
    calendar_id: CalendarId,
    todo_id: TodoId,
) -> ServiceResult<Todo> {
    let calendar = owned_calendar(backend, user, calendar_id).await?;
    let todo = backend.todos.get(calendar.id, todo_id).await?;

    if todo.is_done() {
        return Err(CoreError::AlreadyDone.into());
    }

    Ok(todo)
}

/// ## Summary
/// Replaces the notes of a planned Todo. Omitted notes clear them.
///
/// ## Errors
/// Returns `NotFound` for an unknown Todo or calendar, `AlreadyDone` if the
/// Todo is done.
#[tracing::instrument(skip(backend, command), fields(user_id = user.id))]
pub async fn update_todo_notes(
    backend: &Backend,
    user: &UserIdentity,
    calendar_id: CalendarId,
    todo_id: TodoId,
    command: &Notes,
) -> ServiceResult<Todo> {
    let todo = planned_todo(backend, user, calendar_id, todo_id).await?;

    let updated = backend
        .todos
        .update_notes(todo.calendar_id, todo.id, command.notes.as_deref())
        .await?;
    tracing::debug!("Todo notes updated");

    Ok(updated)
}

/// ## Summary
/// Moves a planned Todo to another date.
///
/// ## Side Effects
/// Writes nothing when the date does not change.
///
/// ## Errors
/// Returns `NotFound` for an unknown Todo or calendar, `AlreadyDone` if the
/// Todo is done.
#[tracing::instrument(skip(backend, command), fields(user_id = user.id))]
pub async fn move_todo(
    backend: &Backend,
    user: &UserIdentity,
    calendar_id: CalendarId,
    todo_id: TodoId,
    command: &MoveTodo,
) -> ServiceResult<Todo> {
    let todo = planned_todo(backend, user, calendar_id, todo_id).await?;

    if todo.date == command.date {
        tracing::debug!("Todo already on requested date");
        return Ok(todo);
    }

    let moved = backend
        .todos
        .update_date(todo.calendar_id, todo.id, command.date)
        .await?;
    tracing::debug!(from = %todo.date, to = %moved.date, "Todo moved");

    Ok(moved)
}

/// ## Summary
/// Completes a planned Todo.
///
/// The Todo is marked done on its own planned date, never today's. Omitted
/// notes keep the Todo's existing notes. A Task with the same calendar, date
/// and final notes is logged in the same transaction.
///
/// ## Errors
/// Returns `Deprecated` for the `missed` mode without reading anything,
/// `NotFound` for an unknown Todo or calendar, `AlreadyDone` if the Todo is
/// done.
#[tracing::instrument(skip(backend, command), fields(user_id = user.id, mode = ?command.mode))]
pub async fn complete_todo(
    backend: &Backend,
    user: &UserIdentity,
    calendar_id: CalendarId,
    todo_id: TodoId,
    command: &CompleteTodo,
) -> ServiceResult<Completion> {
    if command.mode == CompletionMode::Missed {
        tracing::warn!("Rejected deprecated completion mode");
        return Err(CoreError::Deprecated.into());
    }

    let todo = planned_todo(backend, user, calendar_id, todo_id).await?;
    let notes = command.notes.as_deref().or(todo.notes.as_deref());

    let completion = backend
        .todos
        .complete(todo.calendar_id, todo.id, notes)
        .await?;
    tracing::info!(
        task_id = completion.task.id,
        date = %completion.todo.date,
        "Todo completed"
    );

    Ok(completion)
}
