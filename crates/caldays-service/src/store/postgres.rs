//! PostgreSQL backend.

use async_trait::async_trait;
use caldays_core::error::{CoreError, CoreResult};
use caldays_core::model::{
    Calendar, CalendarFields, CalendarId, Completion, Credentials, Task, Todo, TodoId, UserId,
    UserIdentity, normalize_notes,
};
use caldays_core::repository::{AuthChecker, CalendarRepository, TaskRepository, TodoRepository};
use caldays_db::db::DbProvider;
use caldays_db::db::connection::DbConnection;
use caldays_db::db::query::{calendar, task, todo, user};
use caldays_db::error::DbError;
use caldays_db::model::calendar::{CalendarChanges, NewCalendar};
use caldays_db::model::task::NewTask;
use caldays_db::model::todo::NewTodo;
use chrono::NaiveDate;
use diesel_async::AsyncConnection;
use diesel_async::scoped_futures::ScopedFutureExt;

use crate::auth::password::verify_password;

fn db_err(err: diesel::result::Error) -> CoreError {
    DbError::from(err).into()
}

fn calendar_not_found() -> CoreError {
    CoreError::NotFound("Calendar not found".to_string())
}

fn todo_not_found() -> CoreError {
    CoreError::NotFound("Todo not found".to_string())
}

/// Storage contract over a pooled PostgreSQL connection.
#[derive(Clone)]
pub struct PgStore<P> {
    provider: P,
}

impl<P: DbProvider> PgStore<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    async fn conn(&self) -> CoreResult<DbConnection<'_>> {
        Ok(self.provider.get_connection().await?)
    }
}

/// Tells a missing Todo apart from a completed one after a guarded write
/// matched no row.
async fn not_planned(
    conn: &mut DbConnection<'_>,
    calendar_id: CalendarId,
    todo_id: TodoId,
) -> CoreResult<CoreError> {
    Ok(match todo::find(conn, calendar_id, todo_id).await.map_err(db_err)? {
        Some(_) => CoreError::AlreadyDone,
        None => todo_not_found(),
    })
}

#[async_trait]
impl<P: DbProvider + 'static> CalendarRepository for PgStore<P> {
    #[tracing::instrument(skip(self))]
    async fn list_for_user(
        &self,
        user_id: UserId,
        include_unpinned: bool,
    ) -> CoreResult<Vec<Calendar>> {
        let mut conn = self.conn().await?;
        let rows = calendar::list_for_user(&mut conn, user_id, include_unpinned)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Calendar::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_id_for_user(&self, id: CalendarId, user_id: UserId) -> CoreResult<Calendar> {
        let mut conn = self.conn().await?;
        calendar::find_for_user(&mut conn, id, user_id)
            .await
            .map_err(db_err)?
            .map(Calendar::from)
            .ok_or_else(calendar_not_found)
    }

    #[tracing::instrument(skip(self, fields))]
    async fn create(&self, user_id: UserId, fields: &CalendarFields) -> CoreResult<Calendar> {
        let mut conn = self.conn().await?;
        let new_calendar = NewCalendar {
            user_id,
            name: &fields.name,
            color: &fields.color,
            planned_color: &fields.planned_color,
            uses_notes: fields.uses_notes,
            sort_pin: None,
        };
        let row = calendar::insert(&mut conn, &new_calendar)
            .await
            .map_err(db_err)?;
        Ok(row.into())
    }

    #[tracing::instrument(skip(self, fields))]
    async fn update(
        &self,
        id: CalendarId,
        user_id: UserId,
        fields: &CalendarFields,
    ) -> CoreResult<Calendar> {
        let mut conn = self.conn().await?;
        calendar::update_for_user(&mut conn, id, user_id, &CalendarChanges::from(fields))
            .await
            .map_err(db_err)?
            .map(Calendar::from)
            .ok_or_else(calendar_not_found)
    }
}

#[async_trait]
impl<P: DbProvider + 'static> TodoRepository for PgStore<P> {
    #[tracing::instrument(skip(self, notes))]
    async fn create(
        &self,
        calendar_id: CalendarId,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> CoreResult<Todo> {
        let mut conn = self.conn().await?;
        let notes = normalize_notes(notes);
        let new_todo = NewTodo {
            calendar_id,
            date,
            notes: notes.as_deref(),
        };
        let row = todo::insert(&mut conn, &new_todo).await.map_err(db_err)?;
        Ok(row.into())
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, calendar_id: CalendarId, todo_id: TodoId) -> CoreResult<Todo> {
        let mut conn = self.conn().await?;
        todo::find(&mut conn, calendar_id, todo_id)
            .await
            .map_err(db_err)?
            .map(Todo::from)
            .ok_or_else(todo_not_found)
    }

    #[tracing::instrument(skip(self, notes))]
    async fn update_notes(
        &self,
        calendar_id: CalendarId,
        todo_id: TodoId,
        notes: Option<&str>,
    ) -> CoreResult<Todo> {
        let mut conn = self.conn().await?;
        let notes = normalize_notes(notes);
        match todo::set_notes_if_planned(&mut conn, calendar_id, todo_id, notes.as_deref())
            .await
            .map_err(db_err)?
        {
            Some(row) => Ok(row.into()),
            None => Err(not_planned(&mut conn, calendar_id, todo_id).await?),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn update_date(
        &self,
        calendar_id: CalendarId,
        todo_id: TodoId,
        date: NaiveDate,
    ) -> CoreResult<Todo> {
        let mut conn = self.conn().await?;
        match todo::set_date_if_planned(&mut conn, calendar_id, todo_id, date)
            .await
            .map_err(db_err)?
        {
            Some(row) => Ok(row.into()),
            None => Err(not_planned(&mut conn, calendar_id, todo_id).await?),
        }
    }

    #[tracing::instrument(skip(self, notes))]
    async fn complete(
        &self,
        calendar_id: CalendarId,
        todo_id: TodoId,
        notes: Option<&str>,
    ) -> CoreResult<Completion> {
        let mut conn = self.conn().await?;
        let notes = normalize_notes(notes);

        let completion = conn
            .transaction::<_, DbError, _>(move |tx| {
                async move {
                    let Some(done) = todo::mark_done(tx, calendar_id, todo_id, notes.as_deref())
                        .await?
                    else {
                        return Err(DbError::CoreError(
                            not_planned(tx, calendar_id, todo_id).await?,
                        ));
                    };

                    let new_task = NewTask {
                        calendar_id: done.calendar_id,
                        date: done.date,
                        notes: done.notes.as_deref(),
                    };
                    let logged = task::insert(tx, &new_task).await?;

                    Ok(Completion {
                        todo: done.into(),
                        task: logged.into(),
                    })
                }
                .scope_boxed()
            })
            .await?;

        Ok(completion)
    }

    #[tracing::instrument(skip(self))]
    async fn undone_by_calendars(&self, calendar_ids: &[CalendarId]) -> CoreResult<Vec<Todo>> {
        let mut conn = self.conn().await?;
        let rows = todo::load_undone_by_calendars(&mut conn, calendar_ids)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Todo::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn undone_by_calendar_and_date(
        &self,
        calendar_id: CalendarId,
        date: NaiveDate,
    ) -> CoreResult<Vec<Todo>> {
        let mut conn = self.conn().await?;
        let rows = todo::load_undone_by_calendar_and_date(&mut conn, calendar_id, date)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Todo::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn has_any_with_notes(&self, calendar_id: CalendarId) -> CoreResult<bool> {
        let mut conn = self.conn().await?;
        todo::any_with_notes(&mut conn, calendar_id)
            .await
            .map_err(db_err)
    }
}

#[async_trait]
impl<P: DbProvider + 'static> TaskRepository for PgStore<P> {
    #[tracing::instrument(skip(self, notes))]
    async fn create(
        &self,
        calendar_id: CalendarId,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> CoreResult<Task> {
        let mut conn = self.conn().await?;
        let notes = normalize_notes(notes);
        let new_task = NewTask {
            calendar_id,
            date,
            notes: notes.as_deref(),
        };
        let row = task::insert(&mut conn, &new_task).await.map_err(db_err)?;
        Ok(row.into())
    }

    #[tracing::instrument(skip(self))]
    async fn from_date(
        &self,
        calendar_ids: &[CalendarId],
        date_from: NaiveDate,
    ) -> CoreResult<Vec<Task>> {
        let mut conn = self.conn().await?;
        let rows = task::load_from_date(&mut conn, calendar_ids, date_from)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Task::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn all_by_calendar(&self, calendar_id: CalendarId) -> CoreResult<Vec<Task>> {
        let mut conn = self.conn().await?;
        let rows = task::load_by_calendar(&mut conn, calendar_id)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Task::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn by_calendar_and_date(
        &self,
        calendar_id: CalendarId,
        date: NaiveDate,
    ) -> CoreResult<Vec<Task>> {
        let mut conn = self.conn().await?;
        let rows = task::load_by_calendar_and_date(&mut conn, calendar_id, date)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Task::from).collect())
    }

    #[tracing::instrument(skip(self, notes))]
    async fn update_notes_by_date(
        &self,
        calendar_id: CalendarId,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> CoreResult<Task> {
        let mut conn = self.conn().await?;
        let notes = normalize_notes(notes);

        let updated = conn
            .transaction::<_, DbError, _>(move |tx| {
                async move {
                    let matches = task::load_by_calendar_and_date(tx, calendar_id, date).await?;
                    let target = match matches.as_slice() {
                        [only] => only.id,
                        [] => {
                            return Err(CoreError::NotFound("Task not found".to_string()).into());
                        }
                        several => {
                            tracing::error!(count = several.len(), "Several tasks share a date");
                            return Err(CoreError::InternalInconsistency(format!(
                                "{} tasks logged on {date} in calendar {calendar_id}",
                                several.len()
                            ))
                            .into());
                        }
                    };

                    Ok(task::set_notes(tx, target, notes.as_deref()).await?)
                }
                .scope_boxed()
            })
            .await?;

        Ok(updated.into())
    }

    #[tracing::instrument(skip(self))]
    async fn has_any_with_notes(&self, calendar_id: CalendarId) -> CoreResult<bool> {
        let mut conn = self.conn().await?;
        task::any_with_notes(&mut conn, calendar_id)
            .await
            .map_err(db_err)
    }
}

#[async_trait]
impl<P: DbProvider + 'static> AuthChecker for PgStore<P> {
    #[tracing::instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn require_auth(&self, credentials: &Credentials) -> CoreResult<UserIdentity> {
        let mut conn = self.conn().await?;
        let Some(found) = user::find_by_email(&mut conn, &credentials.email)
            .await
            .map_err(db_err)?
        else {
            tracing::debug!("Unknown email");
            return Err(CoreError::Unauthorized);
        };

        if let Err(e) = verify_password(&credentials.password, &found.password_hash) {
            tracing::debug!(error = %e, "Password rejected");
            return Err(CoreError::Unauthorized);
        }

        Ok(found.into())
    }
}
