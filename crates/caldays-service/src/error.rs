use caldays_core::error::CoreError;
use thiserror::Error;

/// Service layer errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    CoreError(#[from] CoreError),

    #[error(transparent)]
    DatabaseError(#[from] caldays_db::error::DbError),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

impl ServiceError {
    /// ## Summary
    /// The domain error behind this failure, if there is one.
    #[must_use]
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            Self::CoreError(e) | Self::DatabaseError(caldays_db::error::DbError::CoreError(e)) => {
                Some(e)
            }
            Self::DatabaseError(_) | Self::PasswordHash(_) => None,
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
