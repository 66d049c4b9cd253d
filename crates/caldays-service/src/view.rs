//! JSON shapes returned to clients.
//!
//! Optional fields are omitted rather than sent as `null`: `usesNotes` only
//! appears when true and `notes` only when non-empty.

use caldays_core::model::{Calendar, CalendarId, Task, Todo, UserIdentity, normalize_notes};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarHeader {
    pub id: CalendarId,
    pub name: String,
    pub color: String,
    pub planned_color: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub uses_notes: bool,
}

impl From<&Calendar> for CalendarHeader {
    fn from(calendar: &Calendar) -> Self {
        Self {
            id: calendar.id,
            name: calendar.name.clone(),
            color: calendar.color.clone(),
            planned_color: calendar.planned_color.clone(),
            uses_notes: calendar.uses_notes,
        }
    }
}

/// An entry on a day, identified by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&Todo> for Entry {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            notes: normalize_notes(todo.notes.as_deref()),
        }
    }
}

impl From<&Task> for Entry {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            notes: normalize_notes(task.notes.as_deref()),
        }
    }
}

/// An entry identified by its date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Day {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&Todo> for Day {
    fn from(todo: &Todo) -> Self {
        Self {
            date: todo.date,
            notes: normalize_notes(todo.notes.as_deref()),
        }
    }
}

impl From<&Task> for Day {
    fn from(task: &Task) -> Self {
        Self {
            date: task.date,
            notes: normalize_notes(task.notes.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarPreview {
    #[serde(flatten)]
    pub calendar: CalendarHeader,
    pub done_task_dates: Vec<NaiveDate>,
    pub todo_dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarsOverview {
    pub calendars: Vec<CalendarPreview>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDetail {
    #[serde(flatten)]
    pub calendar: CalendarHeader,
    pub days: Vec<Day>,
    pub planned_days: Vec<Day>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDateView {
    pub calendar: CalendarHeader,
    pub date: NaiveDate,
    pub done_tasks: Vec<Entry>,
    pub todos: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamlineCalendar {
    #[serde(flatten)]
    pub calendar: CalendarHeader,
    pub todos: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamlineDate {
    pub date: NaiveDate,
    pub calendars: Vec<StreamlineCalendar>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamlineView {
    pub dates: Vec<StreamlineDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthStatus {
    pub user: UserIdentity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Created {
    pub id: i32,
}
