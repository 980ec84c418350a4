//! Error types for the Bondgate core types.
//!
//! Parsing of domain values (dates, ratings) and policy
//! validation report through [`CoreError`].

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The error type for core type construction and policy validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date parsing or an invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Unrecognised credit rating notation.
    #[error("Invalid credit rating: '{value}'")]
    InvalidRating {
        /// The notation that failed to parse.
        value: String,
    },

    /// Threshold policy failed validation.
    #[error("Policy error: {reason}")]
    PolicyError {
        /// Description of the problem.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid rating error.
    #[must_use]
    pub fn invalid_rating(value: impl Into<String>) -> Self {
        Self::InvalidRating {
            value: value.into(),
        }
    }

    /// Creates a policy error.
    #[must_use]
    pub fn policy_error(reason: impl Into<String>) -> Self {
        Self::PolicyError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_rating_display_quotes_value() {
        assert_eq!(
            CoreError::invalid_rating("ZZZ").to_string(),
            "Invalid credit rating: 'ZZZ'"
        );
    }
}
