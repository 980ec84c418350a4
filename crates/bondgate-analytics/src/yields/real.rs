//! Current yield and inflation / currency adjusted yields.
//!
//! All rates are decimals.

/// Current yield: annual coupon over price.
///
/// ```text
/// CY = F * c / P
/// ```
#[must_use]
pub fn current_yield(face_value: f64, coupon_rate: f64, price: f64) -> f64 {
    face_value * coupon_rate / price
}

/// Fisher real yield.
///
/// ```text
/// r = (1 + y) / (1 + pi) - 1
/// ```
#[must_use]
pub fn fisher_real_yield(nominal: f64, inflation: f64) -> f64 {
    (1.0 + nominal) / (1.0 + inflation) - 1.0
}

/// Real return in the investor's home currency.
///
/// `currency_change` is the appreciation of the bond's currency against the
/// home currency over a year (negative for a depreciation).
///
/// ```text
/// r_home = (1 + y)(1 + delta) / (1 + pi_home) - 1
/// ```
#[must_use]
pub fn home_currency_return(nominal: f64, currency_change: f64, home_inflation: f64) -> f64 {
    (1.0 + nominal) * (1.0 + currency_change) / (1.0 + home_inflation) - 1.0
}

/// Real yield after both inflation and a currency devaluation.
///
/// ```text
/// r = (1 + y) / ((1 + pi)(1 + delta)) - 1
/// ```
#[must_use]
pub fn fx_adjusted_real_yield(nominal: f64, inflation: f64, devaluation: f64) -> f64 {
    (1.0 + nominal) / ((1.0 + inflation) * (1.0 + devaluation)) - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_current_yield() {
        assert_relative_eq!(current_yield(100.0, 0.05, 95.0), 0.052_631_578, epsilon = 1e-9);
        assert_relative_eq!(current_yield(100.0, 0.05, 100.0), 0.05);
    }

    #[test]
    fn test_fisher_real_yield() {
        assert_relative_eq!(fisher_real_yield(0.05, 0.05), 0.0);
        assert!(fisher_real_yield(0.02, 0.03) < 0.0);
    }

    #[test]
    fn test_home_currency_return() {
        // No currency move and no home inflation leaves the nominal yield.
        assert_relative_eq!(home_currency_return(0.06, 0.0, 0.0), 0.06, epsilon = 1e-12);
        // A 10% depreciation wipes out a 6% coupon.
        assert!(home_currency_return(0.06, -0.10, 0.02) < 0.0);
    }

    #[test]
    fn test_fx_adjusted_real_yield() {
        let r = fx_adjusted_real_yield(0.08, 0.03, 0.02);
        assert_relative_eq!(r, 1.08 / (1.03 * 1.02) - 1.0, epsilon = 1e-12);
        assert_relative_eq!(
            fx_adjusted_real_yield(0.05, 0.02, 0.0),
            fisher_real_yield(0.05, 0.02),
            epsilon = 1e-15
        );
    }
}
