//! Queries for logged entries.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::{connection::DbConnection, schema::tasks};
use crate::model::task::{NewTask, TaskRow};

/// ## Summary
/// Returns a query for every Task of a calendar, ordered by date.
#[must_use]
pub fn by_calendar(calendar_id: i32) -> tasks::BoxedQuery<'static, diesel::pg::Pg> {
    tasks::table
        .filter(tasks::calendar_id.eq(calendar_id))
        .order((tasks::date.asc(), tasks::id.asc()))
        .into_boxed()
}

/// ## Summary
/// Returns a query for the Tasks of one calendar on one date.
#[must_use]
pub fn by_calendar_and_date(
    calendar_id: i32,
    date: NaiveDate,
) -> tasks::BoxedQuery<'static, diesel::pg::Pg> {
    tasks::table
        .filter(tasks::calendar_id.eq(calendar_id))
        .filter(tasks::date.eq(date))
        .order(tasks::id.asc())
        .into_boxed()
}

/// ## Summary
/// Returns a query for Tasks of the given calendars on or after `date_from`.
#[must_use]
pub fn from_date(
    calendar_ids: &[i32],
    date_from: NaiveDate,
) -> tasks::BoxedQuery<'static, diesel::pg::Pg> {
    tasks::table
        .filter(tasks::calendar_id.eq_any(calendar_ids.to_vec()))
        .filter(tasks::date.ge(date_from))
        .order((tasks::date.asc(), tasks::id.asc()))
        .into_boxed()
}

/// ## Summary
/// Returns a query for Tasks of a calendar that carry non-empty notes.
#[must_use]
pub fn with_notes(calendar_id: i32) -> tasks::BoxedQuery<'static, diesel::pg::Pg> {
    tasks::table
        .filter(tasks::calendar_id.eq(calendar_id))
        .filter(tasks::notes.is_not_null())
        .filter(tasks::notes.ne(""))
        .into_boxed()
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn insert(conn: &mut DbConnection<'_>, task: &NewTask<'_>) -> QueryResult<TaskRow> {
    diesel::insert_into(tasks::table)
        .values(task)
        .returning(TaskRow::as_returning())
        .get_result::<TaskRow>(conn)
        .await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn load_by_calendar(
    conn: &mut DbConnection<'_>,
    calendar_id: i32,
) -> QueryResult<Vec<TaskRow>> {
    by_calendar(calendar_id)
        .select(TaskRow::as_select())
        .load::<TaskRow>(conn)
        .await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn load_by_calendar_and_date(
    conn: &mut DbConnection<'_>,
    calendar_id: i32,
    date: NaiveDate,
) -> QueryResult<Vec<TaskRow>> {
    by_calendar_and_date(calendar_id, date)
        .select(TaskRow::as_select())
        .load::<TaskRow>(conn)
        .await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn load_from_date(
    conn: &mut DbConnection<'_>,
    calendar_ids: &[i32],
    date_from: NaiveDate,
) -> QueryResult<Vec<TaskRow>> {
    from_date(calendar_ids, date_from)
        .select(TaskRow::as_select())
        .load::<TaskRow>(conn)
        .await
}

/// ## Errors
/// Returns a database error if the update fails.
pub async fn set_notes(
    conn: &mut DbConnection<'_>,
    task_id: i32,
    notes: Option<&str>,
) -> QueryResult<TaskRow> {
    diesel::update(tasks::table.filter(tasks::id.eq(task_id)))
        .set(tasks::notes.eq(notes))
        .returning(TaskRow::as_returning())
        .get_result::<TaskRow>(conn)
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
