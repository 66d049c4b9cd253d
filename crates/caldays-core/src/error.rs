use thiserror::Error;

/// Core-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Param \"{0}\" required")]
    MissingParameter(&'static str),

    #[error("{0}")]
    InvalidParameter(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("Todo already done")]
    AlreadyDone,

    #[error("Deprecated")]
    Deprecated,

    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}

impl CoreError {
    /// ## Summary
    /// Builds the `Param "X" invalid: must be ...` error used by the validators.
    #[must_use]
    pub fn invalid_parameter(name: &str, expectation: &str) -> Self {
        Self::InvalidParameter(format!("Param \"{name}\" invalid: must be {expectation}"))
    }

    /// ## Summary
    /// True for errors caused by the caller's input rather than by the server.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter(_)
                | Self::InvalidParameter(_)
                | Self::Unauthorized
                | Self::NotFound(_)
                | Self::AlreadyDone
                | Self::Deprecated
        )
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
