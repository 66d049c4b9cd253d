use salvo::async_trait;

use crate::error::AppResult;
use caldays_core::error::CoreError;
use caldays_core::repository::Backend;

/// Injects the storage backend into the depot for every request.
pub struct BackendHandler {
    pub backend: Backend,
}

#[async_trait]
impl salvo::Handler for BackendHandler {
    #[tracing::instrument(skip(self, _req, depot, _res, _ctrl))]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(self.backend.clone());
    }
}

/// ## Summary
/// Retrieves the storage backend from the depot.
///
/// ## Errors
/// Returns an error if the backend is not found in the depot.
pub fn get_backend_from_depot(depot: &salvo::Depot) -> AppResult<Backend> {
    depot
        .obtain::<Backend>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Backend not found in depot").into())
}
