//! Todo lifecycle routes.

use caldays_core::command::{CompleteTodo, MoveTodo, Notes};
use caldays_core::constants::sentinel;
use caldays_service::todo::{complete_todo, create_todo, move_todo, update_todo_notes};
use salvo::prelude::Text;
use salvo::{Depot, Request, Router, handler};

use crate::app::api::extract::{self, caller, decode};
use crate::error::AppResult;

#[handler]
async fn todo_create(req: &mut Request, depot: &Depot) -> AppResult<Text<&'static str>> {
    let calendar_id = extract::calendar_id(req)?;
    let date = extract::date(req)?;
    let caller = caller(depot)?;
    let command: Notes = decode(depot)?;
    create_todo(&caller.backend, &caller.user, calendar_id, date, &command).await?;
    Ok(Text::Plain(sentinel::OK))
}

#[handler]
async fn todo_update(req: &mut Request, depot: &Depot) -> AppResult<Text<&'static str>> {
    let calendar_id = extract::calendar_id(req)?;
    let todo_id = extract::todo_id(req)?;
    let caller = caller(depot)?;
    let command: Notes = decode(depot)?;
    update_todo_notes(&caller.backend, &caller.user, calendar_id, todo_id, &command).await?;
    Ok(Text::Plain(sentinel::OK))
}

#[handler]
async fn todo_move(req: &mut Request, depot: &Depot) -> AppResult<Text<&'static str>> {
    let calendar_id = extract::calendar_id(req)?;
    let todo_id = extract::todo_id(req)?;
    let caller = caller(depot)?;
    let command: MoveTodo = decode(depot)?;
    move_todo(&caller.backend, &caller.user, calendar_id, todo_id, &command).await?;
    Ok(Text::Plain(sentinel::OK))
}

/// ## Summary
/// `POST /calendars/{cid}/todo-done/{tid}`. Marks the Todo done and logs the
/// matching Task in one step.
///
/// ## Errors
/// 400 for `mode=missed` or an already completed Todo.
#[handler]
async fn todo_done(req: &mut Request, depot: &Depot) -> AppResult<Text<&'static str>> {
    let calendar_id = extract::calendar_id(req)?;
    let todo_id = extract::todo_id(req)?;
    let caller = caller(depot)?;
    let command: CompleteTodo = decode(depot)?;
    complete_todo(&caller.backend, &caller.user, calendar_id, todo_id, &command).await?;
    Ok(Text::Plain(sentinel::OK))
}

pub fn routes() -> Router {
    Router::new()
        .push(Router::with_path("todo-create/{date}").post(todo_create))
        .push(Router::with_path("todo-upd/{tid}").post(todo_update))
        .push(Router::with_path("todo-move/{tid}").post(todo_move))
        .push(Router::with_path("todo-done/{tid}").post(todo_done))
}
