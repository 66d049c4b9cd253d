use caldays_core::model::{Calendar, CalendarFields};
use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = schema::calendars)]
#[diesel(check_for_backend(Pg))]
#[diesel(belongs_to(crate::model::user::User, foreign_key = user_id))]
pub struct CalendarRow {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub color: String,
    pub planned_color: String,
    pub uses_notes: bool,
    pub sort_pin: Option<i32>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::calendars)]
pub struct NewCalendar<'a> {
    pub user_id: i32,
    pub name: &'a str,
    pub color: &'a str,
    pub planned_color: &'a str,
    pub uses_notes: bool,
    pub sort_pin: Option<i32>,
}

/// Columns writable through a calendar update. `sort_pin` is not editable.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::calendars)]
pub struct CalendarChanges<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub planned_color: &'a str,
    pub uses_notes: bool,
}

impl<'a> From<&'a CalendarFields> for CalendarChanges<'a> {
    fn from(fields: &'a CalendarFields) -> Self {
        Self {
            name: &fields.name,
            color: &fields.color,
            planned_color: &fields.planned_color,
            uses_notes: fields.uses_notes,
        }
    }
}

impl From<CalendarRow> for Calendar {
    fn from(row: CalendarRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.user_id,
            name: row.name,
            color: row.color,
            planned_color: row.planned_color,
            uses_notes: row.uses_notes,
            sort_pin: row.sort_pin,
        }
    }
}
