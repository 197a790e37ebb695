//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A backend could not be reached or answered unusably
    #[error("Network failure: {0}")]
    NetworkFailure(String),
}

impl ApplicationError {
    /// Create a network failure from any displayable cause
    pub fn network(cause: impl ToString) -> Self {
        Self::NetworkFailure(cause.to_string())
    }
}
