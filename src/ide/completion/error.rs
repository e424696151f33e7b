//! Failures inside a completion session.
//!
//! None of these reach the caller of `complete`: index failures degrade to
//! an empty answer and cancellation ends the session early.

use smol_str::SmolStr;
use thiserror::Error;

/// A global index query that could not be answered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// The index is still being built.
    #[error("symbol index is not ready")]
    NotReady,
    #[error("symbol index query failed: {0}")]
    Query(SmolStr),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("completion was cancelled")]
    Cancelled,
    #[error(transparent)]
    Index(#[from] IndexError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CompletionError::from(IndexError::Query("stubs missing".into()));
        assert_eq!(err.to_string(), "symbol index query failed: stubs missing");
        assert_eq!(CompletionError::Cancelled.to_string(), "completion was cancelled");
    }
}
