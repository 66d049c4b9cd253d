//! Queries for planned entries.
//!
//! Writes that require the PLANNED state carry a `done_date IS NULL` guard, so
//! a Todo completed concurrently is never edited, moved or completed twice.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::{connection::DbConnection, schema::todos};
use crate::model::todo::{NewTodo, TodoRow};

/// ## Summary
/// Returns a query for one Todo under a calendar.
#[must_use]
pub fn by_calendar_and_id(
    calendar_id: i32,
    todo_id: i32,
) -> todos::BoxedQuery<'static, diesel::pg::Pg> {
    todos::table
        .filter(todos::calendar_id.eq(calendar_id))
        .filter(todos::id.eq(todo_id))
        .into_boxed()
}

/// ## Summary
/// Returns a query for the undone Todos of the given calendars, ordered by date.
#[must_use]
pub fn undone_by_calendars(calendar_ids: &[i32]) -> todos::BoxedQuery<'static, diesel::pg::Pg> {
    todos::table
        .filter(todos::calendar_id.eq_any(calendar_ids.to_vec()))
        .filter(todos::done_date.is_null())
        .order((todos::date.asc(), todos::id.asc()))
        .into_boxed()
}

/// ## Summary
/// Returns a query for the undone Todos of one calendar on one date.
#[must_use]
pub fn undone_by_calendar_and_date(
    calendar_id: i32,
    date: NaiveDate,
) -> todos::BoxedQuery<'static, diesel::pg::Pg> {
    todos::table
        .filter(todos::calendar_id.eq(calendar_id))
        .filter(todos::date.eq(date))
        .filter(todos::done_date.is_null())
        .order(todos::id.asc())
        .into_boxed()
}

/// ## Summary
/// Returns a query for Todos of a calendar that carry non-empty notes.
#[must_use]
pub fn with_notes(calendar_id: i32) -> todos::BoxedQuery<'static, diesel::pg::Pg> {
    todos::table
        .filter(todos::calendar_id.eq(calendar_id))
        .filter(todos::notes.is_not_null())
        .filter(todos::notes.ne(""))
        .into_boxed()
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn insert(conn: &mut DbConnection<'_>, todo: &NewTodo<'_>) -> QueryResult<TodoRow> {
    diesel::insert_into(todos::table)
        .values(todo)
        .returning(TodoRow::as_returning())
        .get_result::<TodoRow>(conn)
        .await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn find(
    conn: &mut DbConnection<'_>,
    calendar_id: i32,
    todo_id: i32,
) -> QueryResult<Option<TodoRow>> {
    by_calendar_and_id(calendar_id, todo_id)
        .select(TodoRow::as_select())
        .first::<TodoRow>(conn)
        .await
        .optional()
}

/// ## Summary
/// Replaces the notes of a planned Todo. Returns `None` if no planned Todo matched.
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn set_notes_if_planned(
    conn: &mut DbConnection<'_>,
    calendar_id: i32,
    todo_id: i32,
    notes: Option<&str>,
) -> QueryResult<Option<TodoRow>> {
    diesel::update(
        todos::table
            .filter(todos::calendar_id.eq(calendar_id))
            .filter(todos::id.eq(todo_id))
            .filter(todos::done_date.is_null()),
    )
    .set(todos::notes.eq(notes))
    .returning(TodoRow::as_returning())
    .get_result::<TodoRow>(conn)
    .await
    .optional()
}

/// ## Summary
/// Moves a planned Todo to `date`. Returns `None` if no planned Todo matched.
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn set_date_if_planned(
    conn: &mut DbConnection<'_>,
    calendar_id: i32,
    todo_id: i32,
    date: NaiveDate,
) -> QueryResult<Option<TodoRow>> {
    diesel::update(
        todos::table
            .filter(todos::calendar_id.eq(calendar_id))
            .filter(todos::id.eq(todo_id))
            .filter(todos::done_date.is_null()),
    )
    .set(todos::date.eq(date))
    .returning(TodoRow::as_returning())
    .get_result::<TodoRow>(conn)
    .await
    .optional()
}

/// ## Summary
/// Marks a planned Todo done on its own planned date. Returns `None` if no
/// planned Todo matched.
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn mark_done(
    conn: &mut DbConnection<'_>,
    calendar_id: i32,
    todo_id: i32,
    notes: Option<&str>,
) -> QueryResult<Option<TodoRow>> {
    diesel::update(
        todos::table
            .filter(todos::calendar_id.eq(calendar_id))
            .filter(todos::id.eq(todo_id))
            .filter(todos::done_date.is_null()),
    )
    .set((
        todos::done_date.eq(todos::date.nullable()),
        todos::notes.eq(notes),
    ))
    .returning(TodoRow::as_returning())
    .get_result::<TodoRow>(conn)
    .await
    .optional()
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn load_undone_by_calendars(
    conn: &mut DbConnection<'_>,
    calendar_ids: &[i32],
) -> QueryResult<Vec<TodoRow>> {
    undone_by_calendars(calendar_ids)
        .select(TodoRow::as_select())
        .load::<TodoRow>(conn)
        .await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn load_undone_by_calendar_and_date(
    conn: &mut DbConnection<'_>,
    calendar_id: i32,
    date: NaiveDate,
) -> QueryResult<Vec<TodoRow>> {
    undone_by_calendar_and_date(calendar_id, date)
        .select(TodoRow::as_select())
        .load::<TodoRow>(conn)
        .await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn any_with_notes(conn: &mut DbConnection<'_>, calendar_id: i32) -> QueryResult<bool> {
    let count = with_notes(calendar_id)
        .count()
        .get_result::<i64>(conn)
        .await?;
    Ok(count > 0)
}
