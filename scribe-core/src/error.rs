use thiserror::Error;

/// Result type for writer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while emitting source text.
///
/// None of these are recoverable inside the writer: once one is returned
/// the output unit is in an unspecified, partially written state and the
/// caller is expected to discard it.
#[derive(Debug, Error)]
pub enum Error {
    /// A scope operation did not match the open scopes.
    #[error("scope mismatch in {operation}: {reason}")]
    ScopeMismatch {
        operation: &'static str,
        reason: String,
    },

    /// A call arrived in a position the output format does not allow.
    #[error("{operation} called out of order: {reason}")]
    SequencingViolation {
        operation: &'static str,
        reason: String,
    },

    /// The output sink rejected a write.
    #[error("failed to write to output sink")]
    Sink(#[from] std::io::Error),

    /// A required argument was blank or malformed.
    #[error("invalid {what} '{value}': {reason}")]
    InvalidArgument {
        what: &'static str,
        value: String,
        reason: String,
    },
}

impl Error {
    /// Create a scope mismatch error.
    pub fn scope_mismatch(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::ScopeMismatch {
            operation,
            reason: reason.into(),
        }
    }

    /// Create a sequencing violation error.
    pub fn sequencing(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::SequencingViolation {
            operation,
            reason: reason.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(
        what: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            what,
            value: value.into(),
            reason: reason.into(),
        }
    }
}
