//! Typed commands decoded from request payloads and route parameters.
//!
//! Every endpoint decodes into one of these before any business logic runs,
//! so malformed input is rejected without touching the store.

use chrono::NaiveDate;

use crate::constants::field;
use crate::error::{CoreError, CoreResult};
use crate::model::{CalendarFields, CalendarId, Credentials, TodoId};
use crate::validate::{Payload, validate_int, validate_local_date};

pub trait Command: Sized {
    /// ## Errors
    /// Returns `MissingParameter` or `InvalidParameter` for malformed input.
    fn decode(payload: &Payload) -> CoreResult<Self>;
}

/// ## Summary
/// Extracts the per-call credentials (`em`, `sp`).
///
/// ## Errors
/// Returns `Unauthorized` if either field is missing or empty.
pub fn credentials_from(payload: &Payload) -> CoreResult<Credentials> {
    match (
        payload.optional_string(field::AUTH_EMAIL),
        payload.optional_string(field::AUTH_SECRET),
    ) {
        (Some(email), Some(password)) => Ok(Credentials { email, password }),
        _ => Err(CoreError::Unauthorized),
    }
}

/// ## Errors
/// Returns `InvalidParameter` if the route segment is not an integer.
pub fn calendar_id_param(raw: &str) -> CoreResult<CalendarId> {
    validate_int(raw, field::CALENDAR_ID)
}

/// ## Errors
/// Returns `InvalidParameter` if the route segment is not an integer.
pub fn todo_id_param(raw: &str) -> CoreResult<TodoId> {
    validate_int(raw, field::TODO_ID)
}

/// ## Errors
/// Returns `InvalidParameter` if the route segment is not a valid local date.
pub fn date_param(raw: &str) -> CoreResult<NaiveDate> {
    validate_local_date(raw, field::DATE)
}

/// `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Login {
    pub credentials: Credentials,
}

impl Command for Login {
    fn decode(payload: &Payload) -> CoreResult<Self> {
        Ok(Self {
            credentials: Credentials {
                email: payload.required_string(field::LOGIN_EMAIL)?,
                password: payload.required_string(field::LOGIN_PASSWORD)?,
            },
        })
    }
}

/// `POST /calendars`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadCalendars {
    pub date_from: NaiveDate,
    pub show_all: bool,
}

impl Command for ReadCalendars {
    fn decode(payload: &Payload) -> CoreResult<Self> {
        Ok(Self {
            date_from: payload.required_local_date(field::DATE_FROM)?,
            show_all: payload.optional_bool(field::SHOW_ALL).unwrap_or(false),
        })
    }
}

fn calendar_fields(payload: &Payload) -> CoreResult<CalendarFields> {
    Ok(CalendarFields {
        name: payload.required_string(field::NAME)?,
        color: payload.required_color(field::COLOR)?,
        planned_color: payload.required_color(field::PLANNED_COLOR)?,
        uses_notes: payload.required_bool(field::USES_NOTES)?,
    })
}

/// `POST /calendars/create`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCalendar {
    pub fields: CalendarFields,
}

impl Command for CreateCalendar {
    fn decode(payload: &Payload) -> CoreResult<Self> {
        Ok(Self {
            fields: calendar_fields(payload)?,
        })
    }
}

/// `POST /calendars/update`. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCalendar {
    pub calendar_id: CalendarId,
    pub fields: CalendarFields,
}

impl Command for UpdateCalendar {
    fn decode(payload: &Payload) -> CoreResult<Self> {
        Ok(Self {
            calendar_id: payload.required_int(field::CALENDAR_ID)?,
            fields: calendar_fields(payload)?,
        })
    }
}

/// Bodies that only carry optional `notes`: todo create/update, task
/// create/update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notes {
    pub notes: Option<String>,
}

impl Command for Notes {
    fn decode(payload: &Payload) -> CoreResult<Self> {
        Ok(Self {
            notes: payload.optional_string(field::NOTES),
        })
    }
}

/// `POST /calendars/{cid}/todo-move/{tid}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTodo {
    pub date: NaiveDate,
}

impl Command for MoveTodo {
    fn decode(payload: &Payload) -> CoreResult<Self> {
        Ok(Self {
            date: payload.required_local_date(field::DATE)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionMode {
    Done,
    /// No longer supported; completing with it always fails.
    Missed,
}

impl std::str::FromStr for CompletionMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "done" => Ok(Self::Done),
            "missed" => Ok(Self::Missed),
            _ => Err(CoreError::InvalidParameter(format!(
                "Param \"{}\" invalid",
                field::MODE
            ))),
        }
    }
}

/// `POST /calendars/{cid}/todo-done/{tid}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteTodo {
    pub mode: CompletionMode,
    pub notes: Option<String>,
}

impl Command for CompleteTodo {
    fn decode(payload: &Payload) -> CoreResult<Self> {
        Ok(Self {
            mode: payload.required_string(field::MODE)?.parse()?,
            notes: payload.optional_string(field::NOTES),
        })
    }
}
