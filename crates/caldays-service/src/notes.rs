//! Guard for turning a calendar's notes flag off.

use caldays_core::model::CalendarId;
use caldays_core::repository::Backend;

use crate::error::ServiceResult;

/// Outcome of checking whether a calendar may stop using notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotesCheck {
    Allowed,
    /// Some Todo or Task of the calendar still carries notes.
    HasNotes,
}

/// ## Summary
/// Checks a requested `uses_notes` value against the calendar's entries.
/// Turning notes on is always allowed; turning them off requires that no
/// Todo and no Task of the calendar carries non-empty notes.
///
/// ## Errors
/// Returns an error if the backend cannot be queried.
#[tracing::instrument(skip(backend))]
pub async fn check_uses_notes(
    backend: &Backend,
    calendar_id: CalendarId,
    requested: bool,
) -> ServiceResult<NotesCheck> {
    if requested {
        return Ok(NotesCheck::Allowed);
    }

    if backend.todos.has_any_with_notes(calendar_id).await? {
        tracing::debug!("Todos still carry notes");
        return Ok(NotesCheck::HasNotes);
    }

    if backend.tasks.has_any_with_notes(calendar_id).await? {
        tracing::debug!("Tasks still carry notes");
        return Ok(NotesCheck::HasNotes);
    }

    Ok(NotesCheck::Allowed)
}
