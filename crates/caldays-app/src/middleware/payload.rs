use caldays_core::error::CoreError;
use caldays_core::validate::Payload;
use salvo::prelude::Scribe;
use salvo::{Depot, Request, Response};

use crate::error::{AppError, AppResult};

/// ## Summary
/// Reads the request body once and stores it in the depot as a [`Payload`].
///
/// An empty body becomes an empty payload, so handlers see missing fields
/// rather than a parse failure.
///
/// ## Errors
/// Responds with 400 and stops the chain if the body is not valid JSON.
pub struct PayloadMiddleware;

#[salvo::async_trait]
impl salvo::Handler for PayloadMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        let bytes = match req.payload().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read request body");
                AppError::from(CoreError::InvalidParameter(
                    "Unreadable request body".to_string(),
                ))
                .render(res);
                ctrl.skip_rest();
                return;
            }
        };

        match Payload::from_slice(&bytes) {
            Ok(payload) => {
                tracing::trace!(bytes = bytes.len(), "Payload parsed");
                depot.inject(payload);
            }
            Err(e) => {
                AppError::from(e).render(res);
                ctrl.skip_rest();
            }
        }
    }
}

/// ## Summary
/// Retrieves the parsed request payload from the depot.
///
/// ## Errors
/// Returns an error if `PayloadMiddleware` did not run for this route.
pub fn get_payload_from_depot(depot: &Depot) -> AppResult<&Payload> {
    depot
        .obtain::<Payload>()
        .map_err(|_err| CoreError::InvariantViolation("Payload not found in depot").into())
}
