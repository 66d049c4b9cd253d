use caldays_core::error::CoreError;
use thiserror::Error;

/// Database layer errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),

    #[error("Pool error: {0}")]
    PoolError(#[from] diesel_async::pooled_connection::bb8::RunError),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error(transparent)]
    CoreError(#[from] CoreError),
}

impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::CoreError(core) => core,
            DbError::DatabaseError(diesel::result::Error::NotFound) => {
                CoreError::NotFound("Not found".to_string())
            }
            other => CoreError::Backend(other.to_string()),
        }
    }
}

pub type DbResult<T> = std::result::Result<T, DbError>;
