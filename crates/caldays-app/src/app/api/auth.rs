use caldays_core::command::Login;
use caldays_core::constants::sentinel;
use caldays_service::view::AuthStatus;
use salvo::prelude::{Json, Text};
use salvo::{Depot, Router, handler};

use crate::app::api::AUTH_ROUTE_COMPONENT;
use crate::app::api::extract::{caller, decode};
use crate::backend_handler::get_backend_from_depot;
use crate::error::AppResult;
use crate::middleware::auth::AuthMiddleware;

/// ## Summary
/// `POST /auth/login`. Checks `email`/`password`; no session is created.
///
/// ## Errors
/// 400 if a field is missing, 401 if the credentials are wrong.
#[handler]
async fn login(depot: &Depot) -> AppResult<Text<&'static str>> {
    let backend = get_backend_from_depot(depot)?;
    let command: Login = decode(depot)?;
    caldays_service::auth::login(&backend, &command).await?;
    Ok(Text::Plain(sentinel::OK_LOGIN))
}

/// `POST /auth/status`: echoes the identity behind `em`/`sp`.
#[handler]
async fn status(depot: &Depot) -> AppResult<Json<AuthStatus>> {
    let caller = caller(depot)?;
    Ok(Json(AuthStatus { user: caller.user }))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(AUTH_ROUTE_COMPONENT)
        .push(Router::with_path("login").post(login))
        .push(Router::with_path("status").hoop(AuthMiddleware).post(status))
}
