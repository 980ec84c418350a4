//! Solver failures.

use thiserror::Error;

/// Result alias used throughout `bondgate-math`.
pub type MathResult<T> = Result<T, MathError>;

/// Why a numerical routine could not produce an answer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// The iteration cap was reached with |f(x)| still above tolerance.
    #[error("no convergence within {iterations} iterations, |f(x)| = {residual:.2e}")]
    ConvergenceFailed {
        /// Steps taken before giving up.
        iterations: u32,
        /// |f(x)| at the last iterate.
        residual: f64,
    },

    /// A Newton step would divide by a zero derivative.
    #[error("zero derivative ({value:.2e}) at current iterate")]
    DivisionByZero {
        /// The offending derivative.
        value: f64,
    },

    /// The objective evaluated to NaN or infinity.
    #[error("{context} returned a non-finite value")]
    NonFinite {
        /// Which routine saw it.
        context: String,
    },
}

impl MathError {
    /// Shorthand for [`MathError::ConvergenceFailed`].
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Shorthand for [`MathError::NonFinite`].
    #[must_use]
    pub fn non_finite(context: impl Into<String>) -> Self {
        Self::NonFinite {
            context: context.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convergence_message_names_iteration_count() {
        let message = MathError::convergence_failed(100, 1e-6).to_string();
        assert!(message.contains("100 iterations"));
        assert!(message.contains("1.00e-6"));
    }

    #[test]
    fn non_finite_message_names_context() {
        let err = MathError::non_finite("yield objective");
        assert_eq!(err.to_string(), "yield objective returned a non-finite value");
    }
}
