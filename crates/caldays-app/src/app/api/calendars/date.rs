//! Per-date reads and the Task log.

use caldays_core::command::Notes;
use caldays_core::constants::sentinel;
use caldays_service::calendar::read_calendar_date;
use caldays_service::task::{log_task, update_task_notes_by_date};
use caldays_service::view::CalendarDateView;
use salvo::prelude::{Json, Text};
use salvo::{Depot, Request, Router, handler};

use crate::app::api::extract::{self, caller, decode};
use crate::error::AppResult;

#[handler]
async fn date_view(req: &mut Request, depot: &Depot) -> AppResult<Json<CalendarDateView>> {
    let calendar_id = extract::calendar_id(req)?;
    let date = extract::date(req)?;
    let caller = caller(depot)?;
    Ok(Json(
        read_calendar_date(&caller.backend, &caller.user, calendar_id, date).await?,
    ))
}

/// `POST /calendars/{cid}/date-create/{date}`: logs a Task directly.
#[handler]
async fn date_create(req: &mut Request, depot: &Depot) -> AppResult<Text<&'static str>> {
    let calendar_id = extract::calendar_id(req)?;
    let date = extract::date(req)?;
    let caller = caller(depot)?;
    let command: Notes = decode(depot)?;
    log_task(&caller.backend, &caller.user, calendar_id, date, &command).await?;
    Ok(Text::Plain(sentinel::OK))
}

/// `POST /calendars/{cid}/date-upd-notes/{date}`. Omitting `notes` clears them.
#[handler]
async fn date_update_notes(req: &mut Request, depot: &Depot) -> AppResult<Text<&'static str>> {
    let calendar_id = extract::calendar_id(req)?;
    let date = extract::date(req)?;
    let caller = caller(depot)?;
    let command: Notes = decode(depot)?;
    update_task_notes_by_date(&caller.backend, &caller.user, calendar_id, date, &command).await?;
    Ok(Text::Plain(sentinel::OK))
}

pub fn routes() -> Router {
    Router::new()
        .push(Router::with_path("date/{date}").post(date_view))
        .push(Router::with_path("date-create/{date}").post(date_create))
        .push(Router::with_path("date-upd-notes/{date}").post(date_update_notes))
}
