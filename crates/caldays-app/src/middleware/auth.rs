use caldays_core::command::credentials_from;
use caldays_core::error::CoreError;
use caldays_core::model::UserIdentity;
use salvo::Depot;
use salvo::prelude::Scribe;

use crate::backend_handler::get_backend_from_depot;
use crate::error::{AppError, AppResult};
use crate::middleware::payload::get_payload_from_depot;

/// ## Summary
/// Authenticates every request from the `em`/`sp` fields of its payload and
/// stores the caller's identity in the depot.
///
/// ## Side Effects
/// Inserts the [`UserIdentity`] into the depot for downstream handlers.
///
/// ## Errors
/// Responds with 401 if the credentials are missing or wrong, and with 500
/// if the backend or payload is missing from the depot.
pub struct AuthMiddleware;

#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        tracing::trace!("Authenticating request");

        let identity = match authenticate(depot).await {
            Ok(identity) => identity,
            Err(e) => {
                e.render(res);
                ctrl.skip_rest();
                return;
            }
        };

        tracing::debug!(user_id = identity.id, "User authenticated successfully");
        depot.inject(identity);
    }
}

async fn authenticate(depot: &Depot) -> AppResult<UserIdentity> {
    let backend = get_backend_from_depot(depot)?;
    let credentials = credentials_from(get_payload_from_depot(depot)?)?;
    Ok(caldays_service::auth::require_auth(&backend, &credentials).await?)
}

/// ## Summary
/// Retrieves the authenticated caller from the depot.
///
/// ## Errors
/// Returns an error if `AuthMiddleware` did not run for this route.
pub fn get_user_from_depot(depot: &Depot) -> AppResult<&UserIdentity> {
    depot.obtain::<UserIdentity>().map_err(|_err| {
        AppError::CoreError(CoreError::InvariantViolation(
            "Authenticated user not found in depot",
        ))
    })
}
