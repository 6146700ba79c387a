//! Dispatch error types.

use thiserror::Error;

/// Errors that escape a dispatch.
///
/// Resolution failures and hook rejections are not errors: they are recorded
/// on the context and reported through the registered error handler. Only a
/// broken error path is returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// No error handler is registered for the code being emitted.
    #[error("error handler not found for code {code}")]
    HandlerNotFound {
        /// The code that had no handler.
        code: u16,
    },
}

impl DispatchError {
    /// The error code this dispatch error concerns.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::HandlerNotFound { code } => *code,
        }
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
