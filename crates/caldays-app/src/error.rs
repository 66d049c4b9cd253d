use caldays_core::error::CoreError;
use salvo::http::StatusCode;
use salvo::Response;
use salvo::prelude::{Scribe, Text};
use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] caldays_service::error::ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] caldays_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] CoreError),
}

impl AppError {
    #[must_use]
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            Self::ServiceError(e) => e.as_core(),
            Self::DatabaseError(caldays_db::error::DbError::CoreError(e)) | Self::CoreError(e) => {
                Some(e)
            }
            Self::DatabaseError(_) => None,
        }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self.as_core() {
            Some(
                CoreError::MissingParameter(_)
                | CoreError::InvalidParameter(_)
                | CoreError::AlreadyDone
                | CoreError::Deprecated,
            ) => StatusCode::BAD_REQUEST,
            Some(CoreError::Unauthorized) => StatusCode::UNAUTHORIZED,
            Some(CoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            Some(
                CoreError::InternalInconsistency(_)
                | CoreError::Backend(_)
                | CoreError::InvalidConfiguration(_)
                | CoreError::InvariantViolation(_),
            )
            | None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Scribe for AppError {
    fn render(self, res: &mut Response) {
        let status = self.status_code();
        res.status_code(status);

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            res.render(Text::Plain("Internal Server Error"));
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
            res.render(Text::Plain(self.to_string()));
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
