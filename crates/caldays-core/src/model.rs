//! Domain records shared by the storage backends and the services.
//!
//! Dates are calendar-local days without a time zone and always render as
//! zero-padded `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::Serialize;

pub type UserId = i32;
pub type CalendarId = i32;
pub type TodoId = i32;
pub type TaskId = i32;

/// The authenticated caller, as returned by an `AuthChecker`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdentity {
    pub id: UserId,
    pub email: String,
}

/// Email and password pair checked on every authenticated call.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    pub id: CalendarId,
    pub owner_id: UserId,
    pub name: String,
    pub color: String,
    pub planned_color: String,
    pub uses_notes: bool,
    pub sort_pin: Option<i32>,
}

/// Editable calendar fields, used by both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarFields {
    pub name: String,
    pub color: String,
    pub planned_color: String,
    pub uses_notes: bool,
}

/// A planned entry. `done_date` is `None` while the Todo is planned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub calendar_id: CalendarId,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub done_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoState {
    Planned,
    Done,
}

impl Todo {
    #[must_use]
    pub fn state(&self) -> TodoState {
        if self.done_date.is_some() {
            TodoState::Done
        } else {
            TodoState::Planned
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state() == TodoState::Done
    }
}

/// A logged, completed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub calendar_id: CalendarId,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

/// Result of completing a Todo: the Todo in its DONE state and the Task it logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub todo: Todo,
    pub task: Task,
}

/// ## Summary
/// Normalizes notes so that empty text is stored as absent.
#[must_use]
pub fn normalize_notes(notes: Option<&str>) -> Option<String> {
    notes.filter(|n| !n.is_empty()).map(ToOwned::to_owned)
}

/// ## Summary
/// True if the notes carry any text.
#[must_use]
pub fn has_notes(notes: Option<&str>) -> bool {
    notes.is_some_and(|n| !n.is_empty())
}
