use caldays_core::model::Todo;
use chrono::NaiveDate;
use diesel::{pg::Pg, prelude::*};

use crate::db::schema;

#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = schema::todos)]
#[diesel(check_for_backend(Pg))]
#[diesel(belongs_to(crate::model::calendar::CalendarRow, foreign_key = calendar_id))]
pub struct TodoRow {
    pub id: i32,
    pub calendar_id: i32,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub done_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::todos)]
pub struct NewTodo<'a> {
    pub calendar_id: i32,
    pub date: NaiveDate,
    pub notes: Option<&'a str>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: row.id,
            calendar_id: row.calendar_id,
            date: row.date,
            notes: row.notes,
            done_date: row.done_date,
        }
    }
}
