#![allow(clippy::expect_used)]
//! The PostgreSQL store against a live database.
//!
//! Runs only when `CALDAYS_TEST_DATABASE_URL` points at a scratch database;
//! otherwise every test returns early.

use std::time::{SystemTime, UNIX_EPOCH};

use caldays_core::command::{CompleteTodo, CompletionMode, CreateCalendar, Notes};
use caldays_core::error::CoreError;
use caldays_core::model::{CalendarFields, Credentials, UserIdentity};
use caldays_core::repository::Backend;
use caldays_db::db::connection::{DbPool, create_pool};
use caldays_db::db::migrations::run_migrations;
use caldays_db::db::query::user;
use caldays_db::model::user::NewUser;
use caldays_service::auth::password::hash_password;
use caldays_service::auth::require_auth;
use caldays_service::error::ServiceError;
use caldays_service::store::PgStore;
use diesel_async::SimpleAsyncConnection;

use super::helpers::*;

const DATABASE_URL_VAR: &str = "CALDAYS_TEST_DATABASE_URL";

struct Live {
    pool: DbPool,
    backend: Backend,
    user: UserIdentity,
    email: String,
}

/// Migrates the database and registers a fresh user, or `None` without a URL.
async fn live() -> Option<Live> {
    let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
        tracing::warn!("{DATABASE_URL_VAR} not set, skipping");
        return None;
    };

    run_migrations(&url).await.expect("migrations should apply");
    let pool = create_pool(&url, 2).await.expect("pool should build");

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch")
        .as_nanos();
    let email = format!("user-{nanos}@example.com");
    let password_hash = hash_password(PASSWORD).expect("password should hash");

    let user: UserIdentity = {
        let mut conn = pool.get().await.expect("connection");
        user::insert(
            &mut conn,
            &NewUser {
                email: &email,
                password_hash: &password_hash,
            },
        )
        .await
        .expect("user should insert")
        .into()
    };

    Some(Live {
        backend: Backend::from_store(PgStore::new(pool.clone())),
        pool,
        user,
        email,
    })
}

#[test_log::test(tokio::test)]
async fn credentials_are_checked_against_the_stored_hash() {
    let Some(live) = live().await else { return };

    let user = require_auth(
        &live.backend,
        &Credentials {
            email: live.email.clone(),
            password: PASSWORD.to_string(),
        },
    )
    .await
    .expect("valid credentials");
    assert_eq!(user, live.user);

    let denied = require_auth(
        &live.backend,
        &Credentials {
            email: live.email.clone(),
            password: "wrong".to_string(),
        },
    )
    .await;
    assert!(matches!(
        denied,
        Err(ServiceError::CoreError(CoreError::Unauthorized))
    ));
}

#[test_log::test(tokio::test)]
async fn completion_marks_done_and_logs_one_task() {
    let Some(live) = live().await else { return };
    let (backend, user) = (&live.backend, &live.user);

    let calendar = caldays_service::calendar::create_calendar(
        backend,
        user,
        &CreateCalendar {
            fields: CalendarFields {
                name: "Run".to_string(),
                color: "#115599".to_string(),
                planned_color: "#99AA00".to_string(),
                uses_notes: true,
            },
        },
    )
    .await
    .expect("calendar should be created");
    assert_eq!(calendar.sort_pin, None);

    let todo = caldays_service::todo::create_todo(
        backend,
        user,
        calendar.id,
        date("2024-03-01"),
        &notes("tempo"),
    )
    .await
    .expect("todo should be created");

    let done = CompleteTodo {
        mode: CompletionMode::Done,
        notes: None,
    };
    let completion =
        caldays_service::todo::complete_todo(backend, user, calendar.id, todo.id, &done)
            .await
            .expect("todo should complete");

    assert!(completion.todo.is_done());
    assert_eq!(completion.task.date, date("2024-03-01"));
    assert_eq!(completion.task.notes.as_deref(), Some("tempo"));

    let again =
        caldays_service::todo::complete_todo(backend, user, calendar.id, todo.id, &done).await;
    assert!(matches!(
        again,
        Err(ServiceError::CoreError(CoreError::AlreadyDone))
    ));

    let tasks = backend
        .tasks
        .all_by_calendar(calendar.id)
        .await
        .expect("tasks should list");
    assert_eq!(tasks.len(), 1);
}

#[test_log::test(tokio::test)]
async fn notes_update_by_date_needs_exactly_one_task() {
    let Some(live) = live().await else { return };
    let (backend, user) = (&live.backend, &live.user);

    let calendar = caldays_service::calendar::create_calendar(
        backend,
        user,
        &CreateCalendar {
            fields: CalendarFields {
                name: "Swim".to_string(),
                color: "#115599".to_string(),
                planned_color: "#99AA00".to_string(),
                uses_notes: true,
            },
        },
    )
    .await
    .expect("calendar should be created");
    let day = date("2024-02-01");

    let missing = caldays_service::task::update_task_notes_by_date(
        backend,
        user,
        calendar.id,
        day,
        &notes("x"),
    )
    .await;
    assert!(matches!(
        missing,
        Err(ServiceError::CoreError(CoreError::NotFound(_)))
    ));

    caldays_service::task::log_task(backend, user, calendar.id, day, &Notes::default())
        .await
        .expect("task should be logged");
    let task = caldays_service::task::update_task_notes_by_date(
        backend,
        user,
        calendar.id,
        day,
        &notes("1km"),
    )
    .await
    .expect("single task should update");
    assert_eq!(task.notes.as_deref(), Some("1km"));

    caldays_service::task::log_task(backend, user, calendar.id, day, &Notes::default())
        .await
        .expect("second task should be logged");
    let ambiguous = caldays_service::task::update_task_notes_by_date(
        backend,
        user,
        calendar.id,
        day,
        &notes("2km"),
    )
    .await;
    assert!(matches!(
        ambiguous,
        Err(ServiceError::CoreError(CoreError::InternalInconsistency(_)))
    ));
}

/// Installs a trigger that rejects every Task insert for one calendar.
async fn reject_task_inserts(pool: &DbPool, calendar_id: i32) {
    let mut conn = pool.get().await.expect("connection");
    conn.batch_execute(&format!(
        "CREATE FUNCTION reject_task_{calendar_id}() RETURNS trigger AS $$ \
         BEGIN RAISE EXCEPTION 'task insert rejected'; END; $$ LANGUAGE plpgsql; \
         CREATE TRIGGER reject_task_{calendar_id} BEFORE INSERT ON tasks \
         FOR EACH ROW WHEN (NEW.calendar_id = {calendar_id}) \
         EXECUTE FUNCTION reject_task_{calendar_id}();"
    ))
    .await
    .expect("trigger should install");
}

async fn allow_task_inserts(pool: &DbPool, calendar_id: i32) {
    let mut conn = pool.get().await.expect("connection");
    conn.batch_execute(&format!(
        "DROP TRIGGER reject_task_{calendar_id} ON tasks; \
         DROP FUNCTION reject_task_{calendar_id}();"
    ))
    .await
    .expect("trigger should drop");
}

#[test_log::test(tokio::test)]
async fn failed_task_insert_rolls_back_the_done_transition() {
    let Some(live) = live().await else { return };
    let (backend, user) = (&live.backend, &live.user);

    let calendar = caldays_service::calendar::create_calendar(
        backend,
        user,
        &CreateCalendar {
            fields: CalendarFields {
                name: "Lift".to_string(),
                color: "#115599".to_string(),
                planned_color: "#99AA00".to_string(),
                uses_notes: false,
            },
        },
    )
    .await
    .expect("calendar should be created");
    let todo = caldays_service::todo::create_todo(
        backend,
        user,
        calendar.id,
        date("2024-04-01"),
        &Notes::default(),
    )
    .await
    .expect("todo should be created");

    let done = CompleteTodo {
        mode: CompletionMode::Done,
        notes: None,
    };

    reject_task_inserts(&live.pool, calendar.id).await;
    let failed =
        caldays_service::todo::complete_todo(backend, user, calendar.id, todo.id, &done).await;
    allow_task_inserts(&live.pool, calendar.id).await;

    assert!(matches!(
        failed,
        Err(ServiceError::CoreError(CoreError::Backend(_)))
    ));

    let reloaded = backend
        .todos
        .get(calendar.id, todo.id)
        .await
        .expect("todo should still exist");
    assert_eq!(reloaded.done_date, None);
    assert!(
        backend
            .tasks
            .all_by_calendar(calendar.id)
            .await
            .expect("tasks should list")
            .is_empty()
    );

    caldays_service::todo::complete_todo(backend, user, calendar.id, todo.id, &done)
        .await
        .expect("retry should complete once inserts are allowed");
    assert_eq!(
        backend
            .tasks
            .all_by_calendar(calendar.id)
            .await
            .expect("tasks should list")
            .len(),
        1
    );
}
