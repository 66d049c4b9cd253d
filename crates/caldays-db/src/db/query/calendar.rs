//! Queries for calendars. Every lookup is scoped to the owning user.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::{connection::DbConnection, schema::calendars};
use crate::model::calendar::{CalendarChanges, CalendarRow, NewCalendar};

/// ## Summary
/// Returns a query for all calendars owned by `user_id`.
#[must_use]
pub fn by_user(user_id: i32) -> calendars::BoxedQuery<'static, diesel::pg::Pg> {
    calendars::table
        .filter(calendars::user_id.eq(user_id))
        .into_boxed()
}

/// ## Summary
/// Returns a query for the user's calendars in list order: pinned ones by
/// `sort_pin` ascending, unpinned ones last, ties broken by id.
#[must_use]
pub fn listed_for_user(
    user_id: i32,
    include_unpinned: bool,
) -> calendars::BoxedQuery<'static, diesel::pg::Pg> {
    let mut query = by_user(user_id);
    if !include_unpinned {
        query = query.filter(calendars::sort_pin.is_not_null());
    }
    query.order((calendars::sort_pin.asc().nulls_last(), calendars::id.asc()))
}

/// ## Summary
/// Returns a query for one calendar, only if owned by `user_id`.
#[must_use]
pub fn by_id_for_user(id: i32, user_id: i32) -> calendars::BoxedQuery<'static, diesel::pg::Pg> {
    by_user(user_id).filter(calendars::id.eq(id))
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_for_user(
    conn: &mut DbConnection<'_>,
    user_id: i32,
    include_unpinned: bool,
) -> QueryResult<Vec<CalendarRow>> {
    listed_for_user(user_id, include_unpinned)
        .select(CalendarRow::as_select())
        .load::<CalendarRow>(conn)
        .await
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn find_for_user(
    conn: &mut DbConnection<'_>,
    id: i32,
    user_id: i32,
) -> QueryResult<Option<CalendarRow>> {
    by_id_for_user(id, user_id)
        .select(CalendarRow::as_select())
        .first::<CalendarRow>(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns a database error if the insert fails.
pub async fn insert(
    conn: &mut DbConnection<'_>,
    calendar: &NewCalendar<'_>,
) -> QueryResult<CalendarRow> {
    diesel::insert_into(calendars::table)
        .values(calendar)
        .returning(CalendarRow::as_returning())
        .get_result::<CalendarRow>(conn)
        .await
}

/// ## Summary
/// Updates a calendar owned by `user_id`. Returns `None` when no row matched.
///
/// ## Errors
/// Returns a database error if the update fails.
pub async fn update_for_user(
    conn: &mut DbConnection<'_>,
    id: i32,
    user_id: i32,
    changes: &CalendarChanges<'_>,
) -> QueryResult<Option<CalendarRow>> {
    diesel::update(
        calendars::table
            .filter(calendars::id.eq(id))
            .filter(calendars::user_id.eq(user_id)),
    )
    .set(changes)
    .returning(CalendarRow::as_returning())
    .get_result::<CalendarRow>(conn)
    .await
    .optional()
}
