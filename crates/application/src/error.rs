//! Errors raised while preparing a case.

use reposcout_domain::DomainError;
use thiserror::Error;

/// A case could not be turned into a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// The case's query parameters were rejected.
    #[error("case '{case}': {source}")]
    Request {
        /// Display name of the case.
        case: String,
        /// Underlying validation error.
        #[source]
        source: DomainError,
    },
}

/// Shorthand for application results.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
