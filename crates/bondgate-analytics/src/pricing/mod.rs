//! Present-value pricing.
//!
//! ## Formula
//!
//! ```text
//! P_fair = sum_{t=1..N} C / (1 + r/m)^t + F / (1 + r/m)^N
//! ```
//!
//! where `C = F*c/m` is the period coupon and `N = n*m` the number of
//! periods. A fractional `N` pays coupons at whole periods and redeems at `N`.

use crate::cashflows::{check_schedule, coupon_periods};
use crate::error::{AnalyticsError, AnalyticsResult};

/// Fair price of a bond discounted at a required yield.
///
/// # Arguments
///
/// * `face_value` - Redemption amount
/// * `coupon_rate` - Annual coupon rate (decimal)
/// * `required_yield` - Annual required yield (decimal), compounded `frequency` times a year
/// * `years` - Years to maturity
/// * `frequency` - Coupons per year
///
/// # Errors
///
/// * [`AnalyticsError::InvalidInput`] if `years` is outside `(0, 100]` or
///   `frequency` outside `1..=12`
/// * [`AnalyticsError::ComputationFailed`] if the result is not finite
///
/// # Example
///
/// ```rust
/// use bondgate_analytics::pricing::fair_price;
///
/// // Discounting at the coupon rate gives par.
/// let p = fair_price(100.0, 0.05, 0.05, 10.0, 1).unwrap();
/// assert!((p - 100.0).abs() < 1e-9);
///
/// // A higher required yield gives a discount.
/// assert!(fair_price(100.0, 0.05, 0.06, 10.0, 2).unwrap() < 100.0);
/// ```
pub fn fair_price(
    face_value: f64,
    coupon_rate: f64,
    required_yield: f64,
    years: f64,
    frequency: u32,
) -> AnalyticsResult<f64> {
    check_schedule(years, frequency)?;

    let m = f64::from(frequency);
    let periods = years * m;
    let base = 1.0 + required_yield / m;
    let coupon = face_value * coupon_rate / m;

    let price = coupon_periods(periods)
        .map(|t| coupon * base.powf(-t))
        .sum::<f64>()
        + face_value * base.powf(-periods);

    if !price.is_finite() {
        return Err(AnalyticsError::computation_failed(
            "fair price is not finite",
        ));
    }
    Ok(price)
}
