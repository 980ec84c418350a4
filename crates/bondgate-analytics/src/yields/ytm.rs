//! Yield-to-maturity solver.
//!
//! ## Formula
//!
//! ```text
//! P = sum_{t=1..n} F*c / (1+y)^t + F / (1+y)^n
//! ```
//!
//! solved for `y` with Newton-Raphson using the exact derivative
//!
//! ```text
//! dP/dy = -sum_{t=1..n} t*F*c / (1+y)^(t+1) - n*F / (1+y)^(n+1)
//! ```

use bondgate_math::solvers::{newton_raphson, IterationCap, SolverConfig};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::cashflows::{check_schedule, coupon_periods};
use crate::error::{AnalyticsError, AnalyticsResult};

/// Starting point for the yield iteration.
pub const YTM_INITIAL_GUESS: f64 = 0.05;

/// Iterates are clamped here to stay clear of the `1 + y = 0` pole.
pub const YTM_FLOOR: f64 = -0.99;

/// Result of a yield-to-maturity solve.
///
/// When `converged` is false, `ytm` is the last iterate after the iteration
/// cap was reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YtmSolution {
    /// Annually compounded yield (decimal).
    pub ytm: f64,
    /// Newton iterations performed.
    pub iterations: u32,
    /// Whether the pricing residual fell below tolerance.
    pub converged: bool,
}

/// Present value of an annual-pay bond at yield `y`.
///
/// Coupons of `face_value * coupon_rate` at years `1..=floor(years)` plus the
/// face value at exactly `years`.
#[must_use]
pub fn bond_price(face_value: f64, coupon_rate: f64, y: f64, years: f64) -> f64 {
    price_and_derivative(face_value, coupon_rate, y, years).0
}

fn price_and_derivative(face_value: f64, coupon_rate: f64, y: f64, years: f64) -> (f64, f64) {
    let coupon = face_value * coupon_rate;
    let base = 1.0 + y;

    let (mut pv, mut dpv) = coupon_periods(years).fold((0.0, 0.0), |(pv, dpv), t| {
        let df = base.powf(-t);
        (pv + coupon * df, dpv - t * coupon * df / base)
    });

    let df = base.powf(-years);
    pv += face_value * df;
    dpv -= years * face_value * df / base;

    (pv, dpv)
}

/// Solves for the yield to maturity of an annual-pay bond.
///
/// Newton-Raphson from 5%, tolerance 1e-10 on the pricing residual, at most
/// 100 iterations, iterates clamped at -99%. Hitting the iteration cap is not
/// an error: the last iterate is returned with `converged = false` and a
/// warning is logged.
///
/// # Arguments
///
/// * `price` - Market price, same units as `face_value`
/// * `face_value` - Redemption amount
/// * `coupon_rate` - Annual coupon rate (decimal)
/// * `years` - Years to maturity; need not be an integer
///
/// # Errors
///
/// * [`AnalyticsError::InvalidInput`] if price, face value or years are not
///   strictly positive, years exceed
///   [`MAX_YEARS_TO_MATURITY`](bondgate_core::MAX_YEARS_TO_MATURITY), or the
///   coupon rate is not finite
/// * [`AnalyticsError::ComputationFailed`] if the derivative vanishes or the
///   price function overflows
///
/// # Example
///
/// ```rust
/// use bondgate_analytics::yields::solve_ytm;
///
/// let par = solve_ytm(100.0, 100.0, 0.06, 5.0).unwrap();
/// assert!((par.ytm - 0.06).abs() < 1e-9);
/// ```
pub fn solve_ytm(
    price: f64,
    face_value: f64,
    coupon_rate: f64,
    years: f64,
) -> AnalyticsResult<YtmSolution> {
    check_schedule(years, 1)?;
    for (field, value) in [("price", price), ("face_value", face_value)] {
        if !(value.is_finite() && value > 0.0) {
            return Err(AnalyticsError::invalid_input(field, "must be positive"));
        }
    }
    if !coupon_rate.is_finite() {
        return Err(AnalyticsError::invalid_input("coupon_rate", "must be finite"));
    }

    let config = SolverConfig::default()
        .with_lower_bound(YTM_FLOOR)
        .with_iteration_cap(IterationCap::ReturnLastIterate);

    let result = newton_raphson(
        |y| {
            let (pv, dpv) = price_and_derivative(face_value, coupon_rate, y, years);
            (pv - price, dpv)
        },
        YTM_INITIAL_GUESS,
        &config,
    )?;

    if !result.converged {
        warn!(
            "YTM solve stopped at {:.6} after {} iterations (residual {:.3e}, price {price}, years {years})",
            result.root, result.iterations, result.residual
        );
    }

    Ok(YtmSolution {
        ytm: result.root,
        iterations: result.iterations,
        converged: result.converged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::fair_price;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_par_bond_yields_coupon() {
        let solution = solve_ytm(100.0, 100.0, 0.05, 10.0).unwrap();
        assert!(solution.converged);
        assert_relative_eq!(solution.ytm, 0.05, epsilon = 1e-10);
    }

    #[test]
    fn test_discount_bond() {
        let solution = solve_ytm(95.0, 100.0, 0.05, 10.0).unwrap();
        assert!(solution.converged);
        assert!(solution.ytm > 0.05);
        assert_relative_eq!(solution.ytm, 0.0567, epsilon = 1e-3);
        assert!((bond_price(100.0, 0.05, solution.ytm, 10.0) - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_coupon_closed_form() {
        let solution = solve_ytm(50.0, 100.0, 0.0, 10.0).unwrap();
        assert_relative_eq!(solution.ytm, 2f64.powf(0.1) - 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_fractional_maturity() {
        // Coupons at years 1 and 2, redemption at 2.5.
        let y = 0.04;
        let expected = 5.0 / 1.04 + 5.0 / 1.04_f64.powi(2) + 100.0 / 1.04_f64.powf(2.5);
        assert_relative_eq!(bond_price(100.0, 0.05, y, 2.5), expected, epsilon = 1e-12);

        let solution = solve_ytm(expected, 100.0, 0.05, 2.5).unwrap();
        assert_relative_eq!(solution.ytm, y, epsilon = 1e-9);
    }

    #[test]
    fn test_premium_above_coupon_sum_goes_negative() {
        // Paying more than every future cash flow implies a negative yield.
        let solution = solve_ytm(160.0, 100.0, 0.05, 10.0).unwrap();
        assert!(solution.ytm < 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(solve_ytm(0.0, 100.0, 0.05, 10.0).unwrap_err().is_invalid_input());
        assert!(solve_ytm(95.0, -1.0, 0.05, 10.0).unwrap_err().is_invalid_input());
        assert!(solve_ytm(95.0, 100.0, 0.05, 0.0).unwrap_err().is_invalid_input());
        assert!(solve_ytm(95.0, 100.0, f64::NAN, 10.0).unwrap_err().is_invalid_input());
        assert_eq!(
            solve_ytm(95.0, 100.0, 0.05, 2.0e7).unwrap_err(),
            AnalyticsError::invalid_input("years_to_maturity", "must be at most 100 years")
        );
    }

    proptest! {
        #[test]
        fn prop_ytm_reprices_within_tolerance(
            price in 70.0f64..130.0,
            coupon in 0.0f64..0.10,
            years in 1u32..=30,
        ) {
            let n = f64::from(years);
            let solution = solve_ytm(price, 100.0, coupon, n).unwrap();
            prop_assert!(
                solution.converged,
                "no convergence at price {}, coupon {}, {}y",
                price,
                coupon,
                years
            );

            let repriced = fair_price(100.0, coupon, solution.ytm, n, 1).unwrap();
            prop_assert!((repriced - price).abs() < 1e-6);
        }
    }
}
