//! Decision pipelines.
//!
//! Each pipeline validates its inputs, computes its metrics through the
//! primitives in [`crate::yields`], [`crate::risk`] and [`crate::pricing`],
//! applies the thresholds in [`ScreeningPolicy`](bondgate_core::ScreeningPolicy)
//! and returns a structured report with a decision.
//!
//! | Pipeline | Style | Decisions |
//! |----------|-------|-----------|
//! | [`screener`] | all-or-nothing gates | BUY, REJECT |
//! | [`screener_pro`] | weighted score, max 16 | GOOD BUY, HOLD / WATCH, REJECT / AVOID |
//! | [`valuation`] | risk gates + fair value | BUY, HOLD / WATCH, AVOID |
//! | [`complete`] | all-or-nothing gates | BUY, AVOID |
//! | [`flowchart`] | three phases + risk flags | EXECUTE, EXECUTE WITH CAUTION, STOP |
//! | [`smart`] | weighted score, max 2.0 | STRONG BUY, HOLD / WATCH, AVOID / SELL |

pub mod complete;
pub mod flowchart;
pub mod screener;
pub mod screener_pro;
pub mod smart;
pub mod valuation;

use bondgate_core::validate::{Validate, ValidationError};
use bondgate_core::{MAX_COUPON_FREQUENCY, MAX_YEARS_TO_MATURITY};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Rejects `inputs` with the first validation error, if any.
pub(crate) fn check_inputs<T: Validate>(inputs: &T) -> AnalyticsResult<()> {
    match inputs.validate().into_iter().next() {
        Some(err) => Err(AnalyticsError::invalid_input(err.field, err.message)),
        None => Ok(()),
    }
}

/// Fails with a computation error unless every metric is finite.
pub(crate) fn ensure_finite(metrics: &[(&str, f64)]) -> AnalyticsResult<()> {
    match metrics.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, value)) => Err(AnalyticsError::computation_failed(format!(
            "{name} is not finite ({value})"
        ))),
        None => Ok(()),
    }
}

/// Accumulates field checks for a `Validate` impl.
#[derive(Debug, Default)]
pub(crate) struct FieldChecks {
    errors: Vec<ValidationError>,
}

impl FieldChecks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Value must be finite and strictly positive.
    pub(crate) fn positive(mut self, field: &str, value: f64) -> Self {
        if !(value.is_finite() && value > 0.0) {
            self.errors
                .push(ValidationError::new(field, "must be positive"));
        }
        self
    }

    /// Value must be finite and not negative.
    pub(crate) fn non_negative(mut self, field: &str, value: f64) -> Self {
        if !(value.is_finite() && value >= 0.0) {
            self.errors
                .push(ValidationError::new(field, "must not be negative"));
        }
        self
    }

    /// Value must be finite.
    pub(crate) fn finite(mut self, field: &str, value: f64) -> Self {
        if !value.is_finite() {
            self.errors.push(ValidationError::new(field, "must be a number"));
        }
        self
    }

    /// Rate must be finite and above -100%.
    pub(crate) fn rate(mut self, field: &str, value: f64) -> Self {
        if !(value.is_finite() && value > -1.0) {
            self.errors
                .push(ValidationError::new(field, "must be a rate above -100%"));
        }
        self
    }

    /// Maturity must be positive and at most [`MAX_YEARS_TO_MATURITY`].
    pub(crate) fn maturity(mut self, field: &str, years: f64) -> Self {
        if !(years.is_finite() && years > 0.0) {
            self.errors
                .push(ValidationError::new(field, "must be positive"));
        } else if years > MAX_YEARS_TO_MATURITY {
            self.errors.push(ValidationError::new(
                field,
                format!("must be at most {MAX_YEARS_TO_MATURITY} years"),
            ));
        }
        self
    }

    /// Coupon frequency must be between 1 and [`MAX_COUPON_FREQUENCY`].
    pub(crate) fn frequency(mut self, field: &str, per_year: u32) -> Self {
        if !(1..=MAX_COUPON_FREQUENCY).contains(&per_year) {
            self.errors.push(ValidationError::new(
                field,
                format!("must be between 1 and {MAX_COUPON_FREQUENCY}"),
            ));
        }
        self
    }

    /// Records a custom failure when `ok` is false.
    pub(crate) fn require(mut self, ok: bool, field: &str, message: &str) -> Self {
        if !ok {
            self.errors.push(ValidationError::new(field, message));
        }
        self
    }

    pub(crate) fn finish(self) -> Vec<ValidationError> {
        self.errors
    }
}

/// Formats a decimal rate as a percentage with two decimals.
pub(crate) fn pct(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// Rounds to two decimals.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
