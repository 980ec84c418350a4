//! Error types for the analytics engine.
//!
//! Pipelines distinguish two failure kinds: inputs rejected before any
//! computation, and computations that produced no usable number.

use bondgate_math::MathError;
use thiserror::Error;

/// Error type for all analytics operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// An input failed validation.
    #[error("invalid input: {field} {reason}")]
    InvalidInput {
        /// Name of the offending field.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A computation produced a non-finite or undefined result.
    #[error("computation failed: {0}")]
    ComputationFailed(String),
}

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl AnalyticsError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a computation failure.
    #[must_use]
    pub fn computation_failed(reason: impl Into<String>) -> Self {
        Self::ComputationFailed(reason.into())
    }

    /// Returns true for [`AnalyticsError::InvalidInput`].
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

impl From<MathError> for AnalyticsError {
    fn from(err: MathError) -> Self {
        Self::ComputationFailed(err.to_string())
    }
}
