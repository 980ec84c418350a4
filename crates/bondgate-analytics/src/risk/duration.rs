//! Duration calculations.
//!
//! ## Formula
//!
//! ```text
//! D_mac = (sum_{t=1..n} t*F*c / (1+y)^t + n*F / (1+y)^n) / P
//! D_mod = D_mac / (1 + y/m)
//! ```
//!
//! where:
//! - F = face value, c = annual coupon rate
//! - y = yield to maturity, m = compounding frequency
//! - P = price the weights are normalised by

use crate::cashflows::{check_schedule, coupon_periods};
use crate::error::{AnalyticsError, AnalyticsResult};

/// Calculate Macaulay duration of an annual-pay bond.
///
/// The weighted cash flows are divided by the supplied `price`, not by the
/// present value at `y`; callers pass the market price the yield was solved
/// from.
///
/// # Arguments
///
/// * `face_value` - Redemption amount
/// * `coupon_rate` - Annual coupon rate (decimal)
/// * `ytm` - Yield to maturity (decimal)
/// * `years` - Years to maturity
/// * `price` - Price used to normalise the weights
///
/// # Returns
///
/// Macaulay duration in years
///
/// # Errors
///
/// * [`AnalyticsError::InvalidInput`] if `years` is outside `(0, 100]`
/// * [`AnalyticsError::ComputationFailed`] if `price` is not strictly positive
///   or the result is not finite
pub fn macaulay_duration(
    face_value: f64,
    coupon_rate: f64,
    ytm: f64,
    years: f64,
    price: f64,
) -> AnalyticsResult<f64> {
    check_schedule(years, 1)?;
    if !(price.is_finite() && price > 0.0) {
        return Err(AnalyticsError::computation_failed(format!(
            "duration needs a positive price, got {price}"
        )));
    }

    let coupon = face_value * coupon_rate;
    let base = 1.0 + ytm;
    let weighted: f64 = coupon_periods(years)
        .map(|t| t * coupon * base.powf(-t))
        .sum::<f64>()
        + years * face_value * base.powf(-years);

    let duration = weighted / price;
    if !duration.is_finite() {
        return Err(AnalyticsError::computation_failed(
            "duration is not finite",
        ));
    }
    Ok(duration)
}

/// Convert Macaulay duration to modified duration.
///
/// # Arguments
///
/// * `macaulay` - Macaulay duration
/// * `ytm` - Yield to maturity (as decimal)
/// * `frequency` - Compounding frequency per year
#[must_use]
pub fn modified_duration(macaulay: f64, ytm: f64, frequency: u32) -> f64 {
    macaulay / (1.0 + ytm / f64::from(frequency.max(1)))
}

/// Approximate relative price change for a yield move.
///
/// ```text
/// dP/P ~= -D * dy
/// ```
#[must_use]
pub fn price_sensitivity(duration: f64, yield_change: f64) -> f64 {
    -duration * yield_change
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yields::bond_price;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_zero_coupon_duration_is_maturity() {
        let price = bond_price(100.0, 0.0, 0.04, 7.0);
        let d = macaulay_duration(100.0, 0.0, 0.04, 7.0, price).unwrap();
        assert_relative_eq!(d, 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_par_bond_duration() {
        // 5-year 5% annual par bond: annuity-due closed form (1+y)/y * (1 - 1/(1+y)^n)
        let d = macaulay_duration(100.0, 0.05, 0.05, 5.0, 100.0).unwrap();
        let expected = 1.05 / 0.05 * (1.0 - 1.05_f64.powi(-5));
        assert_relative_eq!(d, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_non_positive_price_fails() {
        let err = macaulay_duration(100.0, 0.05, 0.05, 5.0, 0.0).unwrap_err();
        assert!(matches!(err, AnalyticsError::ComputationFailed(_)));
    }

    #[test]
    fn test_maturity_beyond_cap_is_invalid() {
        let err = macaulay_duration(100.0, 0.05, 0.05, 2.0e7, 100.0).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_modified_from_macaulay() {
        // D_mod = 5.0 / (1 + 0.06/2) = 5.0 / 1.03 ≈ 4.854
        assert_relative_eq!(modified_duration(5.0, 0.06, 2), 4.854, epsilon = 0.001);
        assert_relative_eq!(modified_duration(5.0, 0.05, 1), 5.0 / 1.05, epsilon = 1e-12);
    }

    #[test]
    fn test_price_sensitivity() {
        assert_relative_eq!(price_sensitivity(5.0, 0.01), -0.05);
    }

    proptest! {
        #[test]
        fn prop_duration_non_decreasing_in_maturity(
            y in 0.01f64..0.08,
            spread in 0.0f64..0.04,
            years in 1u32..40,
        ) {
            let c = y + spread;
            let n = f64::from(years);
            let d_n = macaulay_duration(100.0, c, y, n, bond_price(100.0, c, y, n)).unwrap();
            let d_next =
                macaulay_duration(100.0, c, y, n + 1.0, bond_price(100.0, c, y, n + 1.0)).unwrap();
            prop_assert!(d_next >= d_n - 1e-12);
        }
    }
}
