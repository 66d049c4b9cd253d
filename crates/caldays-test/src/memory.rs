//! In-memory backend.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use caldays_core::error::{CoreError, CoreResult};
use caldays_core::model::{
    Calendar, CalendarFields, CalendarId, Completion, Credentials, Task, Todo, TodoId, UserId,
    UserIdentity, has_notes, normalize_notes,
};
use caldays_core::repository::{AuthChecker, CalendarRepository, TaskRepository, TodoRepository};
use chrono::NaiveDate;

use crate::mock_behaviour::MockBehaviour;

#[derive(Debug)]
struct StoredUser {
    identity: UserIdentity,
    password: String,
}

#[derive(Debug, Default)]
struct State {
    last_id: i32,
    users: Vec<StoredUser>,
    calendars: Vec<Calendar>,
    todos: Vec<Todo>,
    tasks: Vec<Task>,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    fn owned_calendar_mut(&mut self, id: CalendarId, user_id: UserId) -> CoreResult<&mut Calendar> {
        self.calendars
            .iter_mut()
            .find(|c| c.id == id && c.owner_id == user_id)
            .ok_or_else(calendar_not_found)
    }

    fn todo_mut(&mut self, calendar_id: CalendarId, todo_id: TodoId) -> CoreResult<&mut Todo> {
        self.todos
            .iter_mut()
            .find(|t| t.id == todo_id && t.calendar_id == calendar_id)
            .ok_or_else(todo_not_found)
    }

    fn planned_todo_mut(
        &mut self,
        calendar_id: CalendarId,
        todo_id: TodoId,
    ) -> CoreResult<&mut Todo> {
        let todo = self.todo_mut(calendar_id, todo_id)?;
        if todo.is_done() {
            return Err(CoreError::AlreadyDone);
        }
        Ok(todo)
    }

    fn insert_task(&mut self, calendar_id: CalendarId, date: NaiveDate, notes: Option<String>) -> Task {
        let task = Task {
            id: self.next_id(),
            calendar_id,
            date,
            notes,
        };
        self.tasks.push(task.clone());
        task
    }
}

fn calendar_not_found() -> CoreError {
    CoreError::NotFound("Calendar not found".to_string())
}

fn todo_not_found() -> CoreError {
    CoreError::NotFound("Todo not found".to_string())
}

/// A backend holding everything in process memory.
///
/// Credentials are compared in plain text; hashing is covered by the
/// PostgreSQL store. Every operation runs under one lock, so a failed
/// operation never leaves partial writes behind.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    behaviour: Mutex<MockBehaviour>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_behaviour(behaviour: MockBehaviour) -> Self {
        Self {
            state: Mutex::default(),
            behaviour: Mutex::new(behaviour),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn behaviour(&self) -> MutexGuard<'_, MockBehaviour> {
        self.behaviour.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_behaviour(&self, behaviour: MockBehaviour) {
        *self.behaviour() = behaviour;
    }

    /// ## Summary
    /// Registers a user that can authenticate with `email`/`password`.
    pub fn add_user(&self, email: &str, password: &str) -> UserIdentity {
        let mut state = self.state();
        let identity = UserIdentity {
            id: state.next_id(),
            email: email.to_string(),
        };
        state.users.push(StoredUser {
            identity: identity.clone(),
            password: password.to_string(),
        });
        identity
    }

    /// ## Summary
    /// Pins or unpins a calendar. There is no endpoint for this; pins are
    /// set out of band.
    ///
    /// ## Errors
    /// Returns `NotFound` if the calendar does not exist.
    pub fn set_sort_pin(&self, calendar_id: CalendarId, sort_pin: Option<i32>) -> CoreResult<()> {
        let mut state = self.state();
        let calendar = state
            .calendars
            .iter_mut()
            .find(|c| c.id == calendar_id)
            .ok_or_else(calendar_not_found)?;
        calendar.sort_pin = sort_pin;
        Ok(())
    }

    /// ## Summary
    /// Appends a Task without any checks, for seeding states the API cannot
    /// produce on its own.
    pub fn insert_task(&self, calendar_id: CalendarId, date: NaiveDate, notes: Option<&str>) -> Task {
        self.state()
            .insert_task(calendar_id, date, normalize_notes(notes))
    }

    #[must_use]
    pub fn todos(&self) -> Vec<Todo> {
        self.state().todos.clone()
    }

    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.state().tasks.clone()
    }

    #[must_use]
    pub fn calendars(&self) -> Vec<Calendar> {
        self.state().calendars.clone()
    }
}

#[async_trait]
impl CalendarRepository for MemoryStore {
    async fn list_for_user(
        &self,
        user_id: UserId,
        include_unpinned: bool,
    ) -> CoreResult<Vec<Calendar>> {
        let mut calendars: Vec<Calendar> = self
            .state()
            .calendars
            .iter()
            .filter(|c| c.owner_id == user_id && (include_unpinned || c.sort_pin.is_some()))
            .cloned()
            .collect();
        calendars.sort_by_key(|c| (c.sort_pin.is_none(), c.sort_pin, c.id));
        Ok(calendars)
    }

    async fn get_by_id_for_user(&self, id: CalendarId, user_id: UserId) -> CoreResult<Calendar> {
        Ok(self.state().owned_calendar_mut(id, user_id)?.clone())
    }

    async fn create(&self, user_id: UserId, fields: &CalendarFields) -> CoreResult<Calendar> {
        let mut state = self.state();
        let calendar = Calendar {
            id: state.next_id(),
            owner_id: user_id,
            name: fields.name.clone(),
            color: fields.color.clone(),
            planned_color: fields.planned_color.clone(),
            uses_notes: fields.uses_notes,
            sort_pin: None,
        };
        state.calendars.push(calendar.clone());
        Ok(calendar)
    }

    async fn update(
        &self,
        id: CalendarId,
        user_id: UserId,
        fields: &CalendarFields,
    ) -> CoreResult<Calendar> {
        let mut state = self.state();
        let calendar = state.owned_calendar_mut(id, user_id)?;
        calendar.name.clone_from(&fields.name);
        calendar.color.clone_from(&fields.color);
        calendar.planned_color.clone_from(&fields.planned_color);
        calendar.uses_notes = fields.uses_notes;
        Ok(calendar.clone())
    }
}

#[async_trait]
impl TodoRepository for MemoryStore {
    async fn create(
        &self,
        calendar_id: CalendarId,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> CoreResult<Todo> {
        self.behaviour().can_create_todo()?;

        let mut state = self.state();
        let todo = Todo {
            id: state.next_id(),
            calendar_id,
            date,
            notes: normalize_notes(notes),
            done_date: None,
        };
        state.todos.push(todo.clone());
        Ok(todo)
    }

    async fn get(&self, calendar_id: CalendarId, todo_id: TodoId) -> CoreResult<Todo> {
        Ok(self.state().todo_mut(calendar_id, todo_id)?.clone())
    }

    async fn update_notes(
        &self,
        calendar_id: CalendarId,
        todo_id: TodoId,
        notes: Option<&str>,
    ) -> CoreResult<Todo> {
        let mut state = self.state();
        let todo = state.planned_todo_mut(calendar_id, todo_id)?;
        todo.notes = normalize_notes(notes);
        Ok(todo.clone())
    }

    async fn update_date(
        &self,
        calendar_id: CalendarId,
        todo_id: TodoId,
        date: NaiveDate,
    ) -> CoreResult<Todo> {
        let mut state = self.state();
        let todo = state.planned_todo_mut(calendar_id, todo_id)?;
        todo.date = date;
        Ok(todo.clone())
    }

    async fn complete(
        &self,
        calendar_id: CalendarId,
        todo_id: TodoId,
        notes: Option<&str>,
    ) -> CoreResult<Completion> {
        let mut behaviour = self.behaviour();
        let mut state = self.state();

        // Every check runs before the first write.
        behaviour.can_complete_todo()?;
        state.planned_todo_mut(calendar_id, todo_id)?;
        behaviour.can_log_task()?;

        let todo = state.planned_todo_mut(calendar_id, todo_id)?;
        todo.done_date = Some(todo.date);
        todo.notes = normalize_notes(notes);
        let todo = todo.clone();

        let task = state.insert_task(todo.calendar_id, todo.date, todo.notes.clone());
        Ok(Completion { todo, task })
    }

    async fn undone_by_calendars(&self, calendar_ids: &[CalendarId]) -> CoreResult<Vec<Todo>> {
        let mut todos: Vec<Todo> = self
            .state()
            .todos
            .iter()
            .filter(|t| !t.is_done() && calendar_ids.contains(&t.calendar_id))
            .cloned()
            .collect();
        todos.sort_by_key(|t| (t.date, t.id));
        Ok(todos)
    }

    async fn undone_by_calendar_and_date(
        &self,
        calendar_id: CalendarId,
        date: NaiveDate,
    ) -> CoreResult<Vec<Todo>> {
        let mut todos: Vec<Todo> = self
            .state()
            .todos
            .iter()
            .filter(|t| !t.is_done() && t.calendar_id == calendar_id && t.date == date)
            .cloned()
            .collect();
        todos.sort_by_key(|t| t.id);
        Ok(todos)
    }

    async fn has_any_with_notes(&self, calendar_id: CalendarId) -> CoreResult<bool> {
        Ok(self
            .state()
            .todos
            .iter()
            .any(|t| t.calendar_id == calendar_id && has_notes(t.notes.as_deref())))
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn create(
        &self,
        calendar_id: CalendarId,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> CoreResult<Task> {
        self.behaviour().can_log_task()?;
        Ok(self
            .state()
            .insert_task(calendar_id, date, normalize_notes(notes)))
    }

    async fn from_date(
        &self,
        calendar_ids: &[CalendarId],
        date_from: NaiveDate,
    ) -> CoreResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .state()
            .tasks
            .iter()
            .filter(|t| calendar_ids.contains(&t.calendar_id) && t.date >= date_from)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| (t.date, t.id));
        Ok(tasks)
    }

    async fn all_by_calendar(&self, calendar_id: CalendarId) -> CoreResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .state()
            .tasks
            .iter()
            .filter(|t| t.calendar_id == calendar_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| (t.date, t.id));
        Ok(tasks)
    }

    async fn by_calendar_and_date(
        &self,
        calendar_id: CalendarId,
        date: NaiveDate,
    ) -> CoreResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .state()
            .tasks
            .iter()
            .filter(|t| t.calendar_id == calendar_id && t.date == date)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| t.id);
        Ok(tasks)
    }

    async fn update_notes_by_date(
        &self,
        calendar_id: CalendarId,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> CoreResult<Task> {
        self.behaviour().can_update_task_notes()?;

        let mut state = self.state();
        let mut matches = state
            .tasks
            .iter_mut()
            .filter(|t| t.calendar_id == calendar_id && t.date == date);

        let Some(task) = matches.next() else {
            return Err(CoreError::NotFound("Task not found".to_string()));
        };
        let extra = matches.count();
        if extra > 0 {
            return Err(CoreError::InternalInconsistency(format!(
                "{} tasks logged on {date} in calendar {calendar_id}",
                extra + 1
            )));
        }

        task.notes = normalize_notes(notes);
        Ok(task.clone())
    }

    async fn has_any_with_notes(&self, calendar_id: CalendarId) -> CoreResult<bool> {
        Ok(self
            .state()
            .tasks
            .iter()
            .any(|t| t.calendar_id == calendar_id && has_notes(t.notes.as_deref())))
    }
}

#[async_trait]
impl AuthChecker for MemoryStore {
    async fn require_auth(&self, credentials: &Credentials) -> CoreResult<UserIdentity> {
        self.state()
            .users
            .iter()
            .find(|u| u.identity.email == credentials.email && u.password == credentials.password)
            .map(|u| u.identity.clone())
            .ok_or(CoreError::Unauthorized)
    }
}
