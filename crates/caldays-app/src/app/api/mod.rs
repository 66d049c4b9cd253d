mod app_specific;
mod auth;
mod calendars;
mod extract;
mod streamline;

use salvo::Router;

use crate::middleware::{auth::AuthMiddleware, payload::PayloadMiddleware};

// Re-export route constants from core
pub use caldays_core::constants::{
    APP_ROUTE_COMPONENT, APP_ROUTE_PREFIX, AUTH_ROUTE_COMPONENT, AUTH_ROUTE_PREFIX,
    CALENDARS_ROUTE_COMPONENT, CALENDARS_ROUTE_PREFIX, STREAMLINE_ROUTE_COMPONENT,
    STREAMLINE_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the full API router.
///
/// Every route below the payload middleware receives its JSON body in the
/// depot. Everything except login also passes through `AuthMiddleware`.
#[must_use]
pub fn routes() -> Router {
    Router::new().push(app_specific::routes()).push(
        Router::new()
            .hoop(PayloadMiddleware)
            .push(auth::routes())
            .push(
                Router::new()
                    .hoop(AuthMiddleware)
                    .push(streamline::routes())
                    .push(calendars::routes()),
            ),
    )
}
