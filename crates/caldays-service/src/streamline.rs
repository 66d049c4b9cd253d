//! The streamline view: every undone Todo of the caller's calendars, pinned
//! or not, grouped by date and then by calendar.

use std::collections::{BTreeMap, HashMap};

use caldays_core::model::{Calendar, CalendarId, Todo, UserIdentity};
use caldays_core::repository::Backend;
use chrono::NaiveDate;

use crate::calendar::list_calendars;
use crate::error::ServiceResult;
use crate::view::{CalendarHeader, Entry, StreamlineCalendar, StreamlineDate, StreamlineView};

/// Calendars of one date, in the order they were first seen.
#[derive(Default)]
struct DateBucket {
    calendars: Vec<StreamlineCalendar>,
    positions: HashMap<CalendarId, usize>,
}

impl DateBucket {
    fn push(&mut self, calendar: &Calendar, todo: &Todo) {
        let position = *self.positions.entry(calendar.id).or_insert_with(|| {
            self.calendars.push(StreamlineCalendar {
                calendar: CalendarHeader::from(calendar),
                todos: Vec::new(),
            });
            self.calendars.len() - 1
        });

        if let Some(bucket) = self.calendars.get_mut(position) {
            bucket.todos.push(Entry::from(todo));
        }
    }
}

/// ## Summary
/// Folds Todos into a date-ordered, calendar-grouped tree.
///
/// Dates come out ascending whatever the input order. Within a date,
/// calendars appear in the order their first Todo was seen and each Todo
/// lands in exactly one bucket. Todos whose calendar is not in `calendars`
/// are skipped.
#[must_use]
pub fn build_streamline(calendars: &[Calendar], todos: &[Todo]) -> StreamlineView {
    let by_id: HashMap<CalendarId, &Calendar> = calendars.iter().map(|c| (c.id, c)).collect();
    let mut dates: BTreeMap<NaiveDate, DateBucket> = BTreeMap::new();

    for todo in todos {
        let Some(calendar) = by_id.get(&todo.calendar_id) else {
            tracing::warn!(
                todo_id = todo.id,
                calendar_id = todo.calendar_id,
                "Skipping todo of an unlisted calendar"
            );
            continue;
        };

        dates.entry(todo.date).or_default().push(calendar, todo);
    }

    StreamlineView {
        dates: dates
            .into_iter()
            .map(|(date, bucket)| StreamlineDate {
                date,
                calendars: bucket.calendars,
            })
            .collect(),
    }
}

/// ## Summary
/// Builds the streamline view over all of the caller's calendars.
///
/// ## Errors
/// Returns an error if the backend cannot be queried.
#[tracing::instrument(skip(backend), fields(user_id = user.id))]
pub async fn read_streamline(backend: &Backend, user: &UserIdentity) -> ServiceResult<StreamlineView> {
    let calendars = list_calendars(backend, user, true).await?;
    let ids: Vec<CalendarId> = calendars.iter().map(|c| c.id).collect();

    if ids.is_empty() {
        return Ok(StreamlineView::default());
    }

    let todos = backend.todos.undone_by_calendars(&ids).await?;
    Ok(build_streamline(&calendars, &todos))
}
