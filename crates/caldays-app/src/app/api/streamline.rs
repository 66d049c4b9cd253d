use caldays_service::streamline::read_streamline;
use caldays_service::view::StreamlineView;
use salvo::prelude::Json;
use salvo::{Depot, Router, handler};

use crate::app::api::STREAMLINE_ROUTE_COMPONENT;
use crate::app::api::extract::caller;
use crate::error::AppResult;

/// `POST /streamline`: undone Todos of pinned calendars, grouped by date.
#[handler]
async fn streamline(depot: &Depot) -> AppResult<Json<StreamlineView>> {
    let caller = caller(depot)?;
    Ok(Json(read_streamline(&caller.backend, &caller.user).await?))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(STREAMLINE_ROUTE_COMPONENT).post(streamline)
}
