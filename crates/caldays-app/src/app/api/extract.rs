//! Depot and route-parameter accessors shared by the handlers.

use caldays_core::command::{Command, calendar_id_param, date_param, todo_id_param};
use caldays_core::constants::field;
use caldays_core::error::CoreError;
use caldays_core::model::{CalendarId, TodoId, UserIdentity};
use caldays_core::repository::Backend;
use chrono::NaiveDate;
use salvo::{Depot, Request};

use crate::backend_handler::get_backend_from_depot;
use crate::error::AppResult;
use crate::middleware::auth::get_user_from_depot;
use crate::middleware::payload::get_payload_from_depot;

/// The authenticated caller and the backend serving the request.
pub struct Caller {
    pub backend: Backend,
    pub user: UserIdentity,
}

/// ## Errors
/// Returns an invariant violation if the middleware chain did not populate the depot.
pub fn caller(depot: &Depot) -> AppResult<Caller> {
    Ok(Caller {
        backend: get_backend_from_depot(depot)?,
        user: get_user_from_depot(depot)?.clone(),
    })
}

/// ## Summary
/// Decodes the request payload into a typed command.
///
/// ## Errors
/// Returns the command's validation error.
pub fn decode<C: Command>(depot: &Depot) -> AppResult<C> {
    Ok(C::decode(get_payload_from_depot(depot)?)?)
}

fn route_param(req: &Request, name: &'static str) -> AppResult<String> {
    req.param::<String>(name)
        .ok_or_else(|| CoreError::InvariantViolation("Route parameter missing").into())
}

pub fn calendar_id(req: &Request) -> AppResult<CalendarId> {
    Ok(calendar_id_param(&route_param(req, field::CALENDAR_ID)?)?)
}

pub fn todo_id(req: &Request) -> AppResult<TodoId> {
    Ok(todo_id_param(&route_param(req, field::TODO_ID)?)?)
}

pub fn date(req: &Request) -> AppResult<NaiveDate> {
    Ok(date_param(&route_param(req, field::DATE)?)?)
}
