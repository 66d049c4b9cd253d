//! Scripted failures for the in-memory backend.

use caldays_core::error::{CoreError, CoreResult};

/// Behaviour tweaks describing how a [`MemoryStore`](crate::MemoryStore) misbehaves during a test.
///
/// To make an operation fail `n` times after `m` initial successes, set its
/// field to `(m, n)`.
#[derive(Debug, Clone, Default)]
pub struct MockBehaviour {
    /// While true, every operation is allowed.
    pub is_suspended: bool,

    pub create_todo_behaviour: (u32, u32),
    /// The done transition of a Todo, before its Task is logged.
    pub complete_todo_behaviour: (u32, u32),
    /// Every Task insert, including the one made while completing a Todo.
    pub log_task_behaviour: (u32, u32),
    pub update_task_notes_behaviour: (u32, u32),
}

impl MockBehaviour {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every operation fails at once, `n_fails` times.
    #[must_use]
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            create_todo_behaviour: (0, n_fails),
            complete_todo_behaviour: (0, n_fails),
            log_task_behaviour: (0, n_fails),
            update_task_notes_behaviour: (0, n_fails),
        }
    }

    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }

    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    /// ## Errors
    /// Returns `Backend` when a failure is scheduled.
    pub fn can_create_todo(&mut self) -> CoreResult<()> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.create_todo_behaviour, "create_todo")
    }

    /// ## Errors
    /// Returns `Backend` when a failure is scheduled.
    pub fn can_complete_todo(&mut self) -> CoreResult<()> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.complete_todo_behaviour, "complete_todo")
    }

    /// ## Errors
    /// Returns `Backend` when a failure is scheduled.
    pub fn can_log_task(&mut self) -> CoreResult<()> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.log_task_behaviour, "log_task")
    }

    /// ## Errors
    /// Returns `Backend` when a failure is scheduled.
    pub fn can_update_task_notes(&mut self) -> CoreResult<()> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.update_task_notes_behaviour, "update_task_notes")
    }
}

/// Succeeds while `value` is `(1+, _)` or `(_, 0)`; otherwise fails and
/// consumes one scheduled failure.
fn decrement(value: &mut (u32, u32), descr: &str) -> CoreResult<()> {
    let (remaining_successes, remaining_failures) = *value;

    if remaining_successes > 0 {
        value.0 -= 1;
        tracing::debug!(?value, "Mock behaviour: allowing a {descr}");
        Ok(())
    } else if remaining_failures > 0 {
        value.1 -= 1;
        tracing::debug!(?value, "Mock behaviour: failing a {descr}");
        Err(CoreError::Backend(format!(
            "Mocked behaviour requires this {descr} to fail this time"
        )))
    } else {
        tracing::trace!(?value, "Mock behaviour: allowing a {descr}");
        Ok(())
    }
}
