#![allow(clippy::expect_used)]
//! The uses-notes invariant on calendar updates.
//!
//! A calendar whose Todos or Tasks carry notes cannot have notes turned off.

use caldays_core::command::{Notes, UpdateCalendar};
use caldays_core::error::CoreError;
use caldays_core::model::{CalendarFields, CalendarId};
use caldays_service::calendar::{CalendarUpdate, owned_calendar, update_calendar};
use caldays_service::task::log_task;
use caldays_service::todo::create_todo;

use super::helpers::*;

fn update(calendar_id: CalendarId, name: &str, uses_notes: bool) -> UpdateCalendar {
    UpdateCalendar {
        calendar_id,
        fields: CalendarFields {
            name: name.to_string(),
            color: "#000000".to_string(),
            planned_color: "#FFFFFF".to_string(),
            uses_notes,
        },
    }
}

#[test_log::test(tokio::test)]
async fn disabling_notes_without_notes_succeeds() {
    let fx = Fixture::new();
    let cal = fx.calendar("Journal", true).await;
    create_todo(&fx.backend, &fx.user, cal, date("2024-05-01"), &Notes::default())
        .await
        .expect("todo");

    let outcome = update_calendar(&fx.backend, &fx.user, &update(cal, "Diary", false))
        .await
        .expect("update");

    let CalendarUpdate::Updated(calendar) = outcome else {
        panic!("expected the update to go through");
    };
    assert_eq!(calendar.name, "Diary");
    assert!(!calendar.uses_notes);
}

#[test_log::test(tokio::test)]
async fn todo_notes_block_disabling_and_nothing_is_written() {
    let fx = Fixture::new();
    let cal = fx.calendar("Journal", true).await;
    create_todo(&fx.backend, &fx.user, cal, date("2024-05-01"), &notes("idea"))
        .await
        .expect("todo");

    let outcome = update_calendar(&fx.backend, &fx.user, &update(cal, "Diary", false))
        .await
        .expect("update");
    assert_eq!(outcome, CalendarUpdate::UsesNotesCannotBeDisabled);

    let unchanged = owned_calendar(&fx.backend, &fx.user, cal)
        .await
        .expect("calendar");
    assert_eq!(unchanged.name, "Journal");
    assert!(unchanged.uses_notes);
}

#[test_log::test(tokio::test)]
async fn task_notes_block_disabling() {
    let fx = Fixture::new();
    let cal = fx.calendar("Journal", true).await;
    log_task(&fx.backend, &fx.user, cal, date("2024-05-01"), &notes("wrote"))
        .await
        .expect("task");

    let outcome = update_calendar(&fx.backend, &fx.user, &update(cal, "Journal", false))
        .await
        .expect("update");

    assert_eq!(outcome, CalendarUpdate::UsesNotesCannotBeDisabled);
}

#[test_log::test(tokio::test)]
async fn enabling_notes_is_always_allowed() {
    let fx = Fixture::new();
    let cal = fx.calendar("Journal", false).await;
    log_task(&fx.backend, &fx.user, cal, date("2024-05-01"), &notes("wrote"))
        .await
        .expect("task");

    let outcome = update_calendar(&fx.backend, &fx.user, &update(cal, "Journal", true))
        .await
        .expect("update");

    assert!(matches!(outcome, CalendarUpdate::Updated(c) if c.uses_notes));
}

#[test_log::test(tokio::test)]
async fn non_owner_sees_not_found_before_the_notes_check() {
    let fx = Fixture::new();
    let cal = fx.calendar("Journal", true).await;
    log_task(&fx.backend, &fx.user, cal, date("2024-05-01"), &notes("wrote"))
        .await
        .expect("task");

    let intruder = fx.store.add_user("mallory@example.com", "pw");
    let err = update_calendar(&fx.backend, &intruder, &update(cal, "Mine", false))
        .await
        .expect_err("not the owner");

    assert_eq!(
        err.as_core(),
        Some(&CoreError::NotFound("Calendar not found".to_string()))
    );
}
