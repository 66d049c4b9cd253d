#![allow(clippy::expect_used)]
//! The streamline view over all of a user's calendars.

use caldays_core::command::{CompleteTodo, CompletionMode, Notes};
use caldays_service::streamline::read_streamline;
use caldays_service::todo::{complete_todo, create_todo};

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn groups_undone_todos_by_date_then_calendar() {
    let fx = Fixture::new();
    let gym = fx.calendar("Gym", false).await;
    let read = fx.calendar("Read", true).await;
    fx.pin(gym, 1);
    fx.pin(read, 2);

    // Created out of date order on purpose.
    let late = create_todo(&fx.backend, &fx.user, gym, date("2024-01-02"), &Notes::default())
        .await
        .expect("todo");
    let early_read = create_todo(&fx.backend, &fx.user, read, date("2024-01-01"), &notes("p. 40"))
        .await
        .expect("todo");
    let early_gym = create_todo(&fx.backend, &fx.user, gym, date("2024-01-01"), &Notes::default())
        .await
        .expect("todo");

    let view = read_streamline(&fx.backend, &fx.user)
        .await
        .expect("streamline");

    assert_eq!(view.dates.len(), 2);

    let first = &view.dates[0];
    assert_eq!(first.date, date("2024-01-01"));
    let ids: Vec<_> = first.calendars.iter().map(|c| c.calendar.id).collect();
    // The undone query sorts by date then id, so the Read Todo comes first.
    assert_eq!(ids, vec![read, gym]);
    assert_eq!(first.calendars[0].todos[0].id, early_read.id);
    assert_eq!(first.calendars[0].todos[0].notes.as_deref(), Some("p. 40"));
    assert_eq!(first.calendars[1].todos[0].id, early_gym.id);

    let second = &view.dates[1];
    assert_eq!(second.date, date("2024-01-02"));
    assert_eq!(second.calendars.len(), 1);
    assert_eq!(second.calendars[0].todos[0].id, late.id);
}

#[test_log::test(tokio::test)]
async fn skips_done_todos_but_keeps_unpinned_calendars() {
    let fx = Fixture::new();
    let pinned = fx.calendar("Pinned", false).await;
    let unpinned = fx.calendar("Unpinned", false).await;
    fx.pin(pinned, 1);

    let done = create_todo(&fx.backend, &fx.user, pinned, date("2024-01-01"), &Notes::default())
        .await
        .expect("todo");
    complete_todo(
        &fx.backend,
        &fx.user,
        pinned,
        done.id,
        &CompleteTodo {
            mode: CompletionMode::Done,
            notes: None,
        },
    )
    .await
    .expect("complete");
    let due = create_todo(&fx.backend, &fx.user, unpinned, date("2024-01-01"), &Notes::default())
        .await
        .expect("todo");

    let view = read_streamline(&fx.backend, &fx.user)
        .await
        .expect("streamline");

    assert_eq!(view.dates.len(), 1);
    let calendars = &view.dates[0].calendars;
    assert_eq!(calendars.len(), 1);
    assert_eq!(calendars[0].calendar.id, unpinned);
    let ids: Vec<_> = calendars[0].todos.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![due.id]);
}

#[test_log::test(tokio::test)]
async fn unpinned_calendar_alone_still_shows_its_todos() {
    let fx = Fixture::new();
    let cal = fx.calendar("Loose", false).await;
    create_todo(&fx.backend, &fx.user, cal, date("2024-05-05"), &Notes::default())
        .await
        .expect("todo");

    let view = read_streamline(&fx.backend, &fx.user)
        .await
        .expect("streamline");

    assert_eq!(view.dates.len(), 1);
    assert_eq!(view.dates[0].date, date("2024-05-05"));
    assert_eq!(view.dates[0].calendars[0].calendar.id, cal);
}

#[test_log::test(tokio::test)]
async fn user_without_calendars_gets_an_empty_view() {
    let fx = Fixture::new();

    let view = read_streamline(&fx.backend, &fx.user)
        .await
        .expect("streamline");

    assert!(view.dates.is_empty());
}
