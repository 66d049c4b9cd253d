//! `POST /calendars/...` routes.

mod date;
mod todo;

use caldays_core::command::{CreateCalendar, ReadCalendars, UpdateCalendar};
use caldays_core::constants::sentinel;
use caldays_service::calendar::{
    CalendarUpdate, create_calendar, read_calendar, read_overview, update_calendar,
};
use caldays_service::view::{CalendarDetail, CalendarsOverview, Created};
use salvo::prelude::{Json, Text};
use salvo::{Depot, Request, Router, handler};

use crate::app::api::CALENDARS_ROUTE_COMPONENT;
use crate::app::api::extract::{self, caller, decode};
use crate::error::AppResult;

/// ## Summary
/// `POST /calendars`: the caller's calendars with their done dates since
/// `date-from` and their planned dates.
///
/// ## Errors
/// 400 if `date-from` is missing or malformed.
#[handler]
async fn list(depot: &Depot) -> AppResult<Json<CalendarsOverview>> {
    let caller = caller(depot)?;
    let command: ReadCalendars = decode(depot)?;
    Ok(Json(
        read_overview(&caller.backend, &caller.user, &command).await?,
    ))
}

#[handler]
async fn create(depot: &Depot) -> AppResult<Json<Created>> {
    let caller = caller(depot)?;
    let command: CreateCalendar = decode(depot)?;
    let calendar = create_calendar(&caller.backend, &caller.user, &command).await?;
    Ok(Json(Created { id: calendar.id }))
}

/// ## Summary
/// `POST /calendars/update`. Refusing to disable notes is a normal outcome,
/// reported with its own sentinel and a 200 status.
#[handler]
async fn update(depot: &Depot) -> AppResult<Text<&'static str>> {
    let caller = caller(depot)?;
    let command: UpdateCalendar = decode(depot)?;
    Ok(
        match update_calendar(&caller.backend, &caller.user, &command).await? {
            CalendarUpdate::Updated(_) => Text::Plain(sentinel::OK_UPDATED),
            CalendarUpdate::UsesNotesCannotBeDisabled => {
                Text::Plain(sentinel::USES_NOTES_CANNOT_BE_DISABLED)
            }
        },
    )
}

#[handler]
async fn detail(req: &mut Request, depot: &Depot) -> AppResult<Json<CalendarDetail>> {
    let calendar_id = extract::calendar_id(req)?;
    let caller = caller(depot)?;
    Ok(Json(
        read_calendar(&caller.backend, &caller.user, calendar_id).await?,
    ))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(CALENDARS_ROUTE_COMPONENT)
        .post(list)
        // Static segments must be tried before `{cid}`.
        .push(Router::with_path("create").post(create))
        .push(Router::with_path("update").post(update))
        .push(
            Router::with_path("{cid}")
                .post(detail)
                .push(date::routes())
                .push(todo::routes()),
        )
}
