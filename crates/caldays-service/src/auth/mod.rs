//! Per-call credential checks.
//!
//! There are no sessions: every request carries an email and password that
//! the backend's `AuthChecker` verifies again.

pub mod password;

use caldays_core::command::Login;
use caldays_core::model::{Credentials, UserIdentity};
use caldays_core::repository::Backend;

use crate::error::ServiceResult;

/// ## Summary
/// Resolves the caller's identity from their credentials.
///
/// ## Errors
/// Returns `Unauthorized` if the credentials do not match a user.
#[tracing::instrument(skip(backend, credentials), fields(email = %credentials.email))]
pub async fn require_auth(
    backend: &Backend,
    credentials: &Credentials,
) -> ServiceResult<UserIdentity> {
    let user = backend.auth.require_auth(credentials).await?;
    tracing::trace!(user_id = user.id, "Credentials accepted");
    Ok(user)
}

/// ## Summary
/// Checks login credentials. Succeeds without creating any state.
///
/// ## Errors
/// Returns `Unauthorized` if the credentials do not match a user.
#[tracing::instrument(skip(backend, login), fields(email = %login.credentials.email))]
pub async fn login(backend: &Backend, login: &Login) -> ServiceResult<UserIdentity> {
    let user = backend.auth.require_auth(&login.credentials).await?;
    tracing::info!(user_id = user.id, "User logged in");
    Ok(user)
}
