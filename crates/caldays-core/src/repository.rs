//! Storage and authentication contract.
//!
//! Every backend implements the four capability traits. The services only
//! ever see a [`Backend`], so swapping the store never touches call sites.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::CoreResult;
use crate::model::{
    Calendar, CalendarFields, CalendarId, Completion, Credentials, Task, Todo, TodoId, UserId,
    UserIdentity,
};

#[async_trait]
pub trait CalendarRepository: Send + Sync {
    /// ## Summary
    /// Calendars owned by `user_id`, pinned first by `sort_pin` ascending,
    /// then unpinned ones, ties broken by id. Unpinned calendars are left out
    /// unless `include_unpinned` is set.
    async fn list_for_user(&self, user_id: UserId, include_unpinned: bool)
    -> CoreResult<Vec<Calendar>>;

    /// ## Errors
    /// `NotFound` if the calendar does not exist or is owned by someone else.
    async fn get_by_id_for_user(&self, id: CalendarId, user_id: UserId) -> CoreResult<Calendar>;

    async fn create(&self, user_id: UserId, fields: &CalendarFields) -> CoreResult<Calendar>;

    /// ## Errors
    /// `NotFound` if the calendar does not exist or is owned by someone else.
    async fn update(
        &self,
        id: CalendarId,
        user_id: UserId,
        fields: &CalendarFields,
    ) -> CoreResult<Calendar>;
}

#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn create(
        &self,
        calendar_id: CalendarId,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> CoreResult<Todo>;

    /// ## Errors
    /// `NotFound` if no Todo with this id exists under the calendar.
    async fn get(&self, calendar_id: CalendarId, todo_id: TodoId) -> CoreResult<Todo>;

    /// ## Errors
    /// `NotFound` if absent, `AlreadyDone` if the Todo is no longer planned.
    async fn update_notes(
        &self,
        calendar_id: CalendarId,
        todo_id: TodoId,
        notes: Option<&str>,
    ) -> CoreResult<Todo>;

    /// ## Errors
    /// `NotFound` if absent, `AlreadyDone` if the Todo is no longer planned.
    async fn update_date(
        &self,
        calendar_id: CalendarId,
        todo_id: TodoId,
        date: NaiveDate,
    ) -> CoreResult<Todo>;

    /// ## Summary
    /// Marks the Todo done on its own planned date with the given notes and
    /// logs a Task for the same calendar, date and notes. Both writes commit
    /// together or not at all.
    ///
    /// ## Errors
    /// `NotFound` if absent, `AlreadyDone` if the Todo is no longer planned.
    async fn complete(
        &self,
        calendar_id: CalendarId,
        todo_id: TodoId,
        notes: Option<&str>,
    ) -> CoreResult<Completion>;

    /// Undone Todos of the given calendars ordered by date, then id.
    async fn undone_by_calendars(&self, calendar_ids: &[CalendarId]) -> CoreResult<Vec<Todo>>;

    async fn undone_by_calendar_and_date(
        &self,
        calendar_id: CalendarId,
        date: NaiveDate,
    ) -> CoreResult<Vec<Todo>>;

    async fn has_any_with_notes(&self, calendar_id: CalendarId) -> CoreResult<bool>;
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(
        &self,
        calendar_id: CalendarId,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> CoreResult<Task>;

    /// Tasks of the given calendars dated on or after `date_from`, ordered by date.
    async fn from_date(
        &self,
        calendar_ids: &[CalendarId],
        date_from: NaiveDate,
    ) -> CoreResult<Vec<Task>>;

    /// Every Task of the calendar, ordered by date.
    async fn all_by_calendar(&self, calendar_id: CalendarId) -> CoreResult<Vec<Task>>;

    async fn by_calendar_and_date(
        &self,
        calendar_id: CalendarId,
        date: NaiveDate,
    ) -> CoreResult<Vec<Task>>;

    /// ## Summary
    /// Replaces the notes of the single Task logged at `(calendar_id, date)`.
    ///
    /// ## Errors
    /// `NotFound` when no Task matches, `InternalInconsistency` when more than
    /// one does. Nothing is written in either case.
    async fn update_notes_by_date(
        &self,
        calendar_id: CalendarId,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> CoreResult<Task>;

    async fn has_any_with_notes(&self, calendar_id: CalendarId) -> CoreResult<bool>;
}

#[async_trait]
pub trait AuthChecker: Send + Sync {
    /// ## Errors
    /// `Unauthorized` for unknown emails and wrong passwords alike.
    async fn require_auth(&self, credentials: &Credentials) -> CoreResult<UserIdentity>;
}

/// The capability set selected at process start.
#[derive(Clone)]
pub struct Backend {
    pub calendars: Arc<dyn CalendarRepository>,
    pub todos: Arc<dyn TodoRepository>,
    pub tasks: Arc<dyn TaskRepository>,
    pub auth: Arc<dyn AuthChecker>,
}

impl Backend {
    /// ## Summary
    /// Builds a backend from a single store implementing every capability.
    #[must_use]
    pub fn from_store<S>(store: S) -> Self
    where
        S: CalendarRepository + TodoRepository + TaskRepository + AuthChecker + 'static,
    {
        let store = Arc::new(store);
        Self {
            calendars: store.clone(),
            todos: store.clone(),
            tasks: store.clone(),
            auth: store,
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend").finish_non_exhaustive()
    }
}
