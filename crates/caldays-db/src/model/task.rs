use caldays_core::model::Task;
use chrono::NaiveDate;
use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = schema::tasks)]
#[diesel(check_for_backend(Pg))]
#[diesel(belongs_to(crate::model::calendar::CalendarRow, foreign_key = calendar_id))]
pub struct TaskRow {
    pub id: i32,
    pub calendar_id: i32,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::tasks)]
pub struct NewTask<'a> {
    pub calendar_id: i32,
    pub date: NaiveDate,
    pub notes: Option<&'a str>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id: row.id,
            calendar_id: row.calendar_id,
            date: row.date,
            notes: row.notes,
        }
    }
}
