//! Coupon schedule shared by the pricing, yield and duration functions.
//!
//! A bond with `periods` remaining pays a coupon at every whole period
//! `1..=floor(periods)` and redeems at exactly `periods`. For an integer
//! number of periods the last coupon and the redemption coincide.
//!
//! Every public entry point runs [`check_schedule`] first, so at most
//! `MAX_YEARS_TO_MATURITY * MAX_COUPON_FREQUENCY` periods are ever walked.

use bondgate_core::{MAX_COUPON_FREQUENCY, MAX_YEARS_TO_MATURITY};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Rejects schedules longer than the accepted maturity and frequency range.
pub(crate) fn check_schedule(years: f64, frequency: u32) -> AnalyticsResult<()> {
    if !(years.is_finite() && years > 0.0) {
        return Err(AnalyticsError::invalid_input(
            "years_to_maturity",
            "must be positive",
        ));
    }
    if years > MAX_YEARS_TO_MATURITY {
        return Err(AnalyticsError::invalid_input(
            "years_to_maturity",
            format!("must be at most {MAX_YEARS_TO_MATURITY} years"),
        ));
    }
    if !(1..=MAX_COUPON_FREQUENCY).contains(&frequency) {
        return Err(AnalyticsError::invalid_input(
            "frequency",
            format!("must be between 1 and {MAX_COUPON_FREQUENCY}"),
        ));
    }
    Ok(())
}

/// Whole coupon periods `1, 2, ..., floor(periods)` as `f64` exponents.
///
/// Yields nothing when `periods < 1`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn coupon_periods(periods: f64) -> impl Iterator<Item = f64> {
    let whole = if periods >= 1.0 {
        periods.floor() as u32
    } else {
        0
    };
    (1..=whole).map(f64::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_periods() {
        let periods: Vec<f64> = coupon_periods(3.0).collect();
        assert_eq!(periods, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_fractional_periods_truncate() {
        let periods: Vec<f64> = coupon_periods(2.6).collect();
        assert_eq!(periods, vec![1.0, 2.0]);
    }

    #[test]
    fn test_schedule_bounds() {
        assert!(check_schedule(100.0, 12).is_ok());
        assert!(check_schedule(0.25, 1).is_ok());
        assert!(check_schedule(100.5, 1).unwrap_err().is_invalid_input());
        assert!(check_schedule(f64::INFINITY, 1).is_err());
        assert!(check_schedule(10.0, 0).is_err());
        assert!(check_schedule(10.0, 13).is_err());
    }

    #[test]
    fn test_short_bond_has_no_coupons() {
        assert_eq!(coupon_periods(0.5).count(), 0);
    }
}
