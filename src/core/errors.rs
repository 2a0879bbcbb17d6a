use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for calculators, services and storage backends.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FinanceError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, FinanceError>;

impl FinanceError {
    pub fn invalid(message: impl Into<String>) -> Self {
        FinanceError::InvalidArgument(message.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, FinanceError::InvalidArgument(_))
    }
}

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        FinanceError::UpstreamFailure(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        FinanceError::UpstreamFailure(err.to_string())
    }
}
