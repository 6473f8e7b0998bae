//! Error taxonomy for the enumeration engine.
//!
//! The engine performs no local recovery: every error here is surfaced to
//! the caller, and any partial output is abandoned. Cancellation is not an
//! error; a cancelled run returns `Ok` with whatever output was already
//! delivered.

use thiserror::Error;

/// Error type for the enumeration drivers.
#[derive(Error, Debug)]
pub enum EnumerationError {
    /// The input to an enumeration routine was malformed: zero-dimensional
    /// rays, an inconsistent ray sequence, or an empty coordinate system.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The engine could not complete the computation: the external cone
    /// solver failed, or a basis coordinate did not fit the caller's
    /// coordinate type.
    #[error("could not solve this case: {0}")]
    UnsolvedCase(String),
}

/// Result type for the enumeration drivers.
pub type EnumerationResult<T> = Result<T, EnumerationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = EnumerationError::InvalidInput("no rays".into());
        assert_eq!(err.to_string(), "invalid input: no rays");

        let err = EnumerationError::UnsolvedCase("solver failed".into());
        assert_eq!(err.to_string(), "could not solve this case: solver failed");
    }
}
