//! Complete evaluation.
//!
//! All-or-nothing gates over caller-supplied yield and duration: real yield,
//! credit spread, duration fit, home-currency return, callability and
//! liquidity.

use std::fmt;

use bondgate_core::validate::{Validate, ValidationError};
use bondgate_core::{Checkpoint, CreditRating, ScreeningPolicy};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{check_inputs, ensure_finite, pct, FieldChecks};
use crate::error::AnalyticsResult;
use crate::yields::{fisher_real_yield, home_currency_return};

/// Complete evaluation inputs. Rates are decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteInputs {
    /// Market price.
    pub price: f64,
    /// Redemption amount.
    pub face_value: f64,
    /// Annual coupon rate.
    pub coupon_rate: f64,
    /// Years to maturity.
    pub years_to_maturity: f64,
    /// Quoted yield to maturity.
    pub ytm: f64,
    /// Expected inflation in the bond's currency.
    pub inflation: f64,
    /// Risk-free yield for the same maturity.
    pub risk_free_rate: f64,
    /// Issuer credit rating.
    pub rating: CreditRating,
    /// Duration in years.
    pub duration: f64,
    /// Intended holding period in years.
    pub holding_period: f64,
    /// Whether the issuer can call the bond.
    pub is_callable: bool,
    /// Daily trading volume in USD millions.
    pub trading_volume: f64,
    /// Expected annual move of the bond's currency against the home currency.
    pub currency_depreciation: f64,
    /// Expected inflation in the investor's home currency.
    pub home_inflation: f64,
}

impl Validate for CompleteInputs {
    fn validate(&self) -> Vec<ValidationError> {
        FieldChecks::new()
            .positive("price", self.price)
            .positive("face_value", self.face_value)
            .maturity("years_to_maturity", self.years_to_maturity)
            .finite("coupon_rate", self.coupon_rate)
            .finite("ytm", self.ytm)
            .rate("inflation", self.inflation)
            .finite("risk_free_rate", self.risk_free_rate)
            .non_negative("duration", self.duration)
            .finite("holding_period", self.holding_period)
            .finite("trading_volume", self.trading_volume)
            .rate("currency_depreciation", self.currency_depreciation)
            .rate("home_inflation", self.home_inflation)
            .finish()
    }
}

/// Complete evaluation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompleteDecision {
    /// Every gate passed.
    #[serde(rename = "BUY")]
    Buy,
    /// At least one gate failed.
    #[serde(rename = "AVOID")]
    Avoid,
}

impl CompleteDecision {
    /// Wire label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Avoid => "AVOID",
        }
    }
}

impl fmt::Display for CompleteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six gates, in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteResults {
    /// Real yield above the minimum.
    pub real_yield: Checkpoint,
    /// Spread above the rating's minimum.
    pub spread: Checkpoint,
    /// Duration below half the maturity and within the holding period.
    pub duration: Checkpoint,
    /// Positive real return in the home currency.
    pub home_return: Checkpoint,
    /// Callable bonds must pay enough.
    pub callability: Checkpoint,
    /// Enough daily volume.
    pub liquidity: Checkpoint,
}

impl CompleteResults {
    /// Gates with their names, in evaluation order.
    #[must_use]
    pub fn iter(&self) -> [(&'static str, &Checkpoint); 6] {
        [
            ("realYield", &self.real_yield),
            ("spread", &self.spread),
            ("duration", &self.duration),
            ("homeReturn", &self.home_return),
            ("callability", &self.callability),
            ("liquidity", &self.liquidity),
        ]
    }

    /// True when every gate passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.iter().iter().all(|(_, cp)| cp.passed)
    }
}

/// Full complete-evaluation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteReport {
    /// Gate outcomes.
    pub results: CompleteResults,
    /// Decision.
    pub decision: CompleteDecision,
}

/// Runs the complete evaluation.
///
/// # Errors
///
/// * `InvalidInput` if price, face value or maturity are not positive, or a
///   numeric input is not finite
/// * `ComputationFailed` if a derived metric is not finite
pub fn evaluate(
    inputs: &CompleteInputs,
    policy: &ScreeningPolicy,
) -> AnalyticsResult<CompleteReport> {
    check_inputs(inputs)?;
    let thresholds = &policy.complete;
    let y = inputs.ytm;
    let d = inputs.duration;
    let hp = inputs.holding_period;
    let volume = inputs.trading_volume;

    let real_yield = fisher_real_yield(y, inputs.inflation);
    let spread = y - inputs.risk_free_rate;
    let home_return =
        home_currency_return(y, inputs.currency_depreciation, inputs.home_inflation);
    ensure_finite(&[
        ("real yield", real_yield),
        ("credit spread", spread),
        ("home currency return", home_return),
    ])?;

    let min_spread = policy.credit_spread.minimum_for(inputs.rating);

    let results = CompleteResults {
        real_yield: Checkpoint::new(
            real_yield > thresholds.min_real_yield,
            real_yield,
            format!("RY = {}", pct(real_yield)),
        ),
        spread: Checkpoint::new(
            spread > min_spread,
            spread,
            format!(
                "Spread = {} (Target for {}: {:.1}%)",
                pct(spread),
                inputs.rating,
                min_spread * 100.0
            ),
        ),
        duration: Checkpoint::new(
            d < inputs.years_to_maturity / 2.0 && d <= hp,
            d,
            format!("Duration = {d:.2} yrs vs HP = {hp} yrs"),
        ),
        home_return: Checkpoint::new(
            home_return > 0.0,
            home_return,
            format!("Real Home Return = {}", pct(home_return)),
        ),
        callability: Checkpoint::new(
            policy.callability_passes(inputs.is_callable, y),
            y,
            if inputs.is_callable {
                "Callable"
            } else {
                "Non-Callable"
            },
        ),
        liquidity: Checkpoint::new(
            volume >= thresholds.min_volume,
            volume,
            format!("Volume = ${volume:.1} M"),
        ),
    };

    let decision = if results.all_passed() {
        CompleteDecision::Buy
    } else {
        CompleteDecision::Avoid
    };
    debug!("complete evaluation: {decision}");

    Ok(CompleteReport { results, decision })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passing_inputs() -> CompleteInputs {
        CompleteInputs {
            price: 100.0,
            face_value: 100.0,
            coupon_rate: 0.07,
            years_to_maturity: 12.0,
            ytm: 0.07,
            inflation: 0.025,
            risk_free_rate: 0.04,
            rating: CreditRating::A,
            duration: 5.5,
            holding_period: 6.0,
            is_callable: false,
            trading_volume: 2.0,
            currency_depreciation: 0.0,
            home_inflation: 0.02,
        }
    }

    #[test]
    fn test_all_gates_pass() {
        let report = evaluate(&passing_inputs(), &ScreeningPolicy::default()).unwrap();
        assert!(report.results.all_passed(), "{:?}", report.results);
        assert_eq!(report.decision, CompleteDecision::Buy);
    }

    #[test]
    fn test_duration_needs_both_limits() {
        let policy = ScreeningPolicy::default();

        // Within the holding period but above half the maturity.
        let inputs = CompleteInputs {
            duration: 6.5,
            holding_period: 8.0,
            ..passing_inputs()
        };
        assert!(!evaluate(&inputs, &policy).unwrap().results.duration.passed);

        // Below half the maturity but longer than the holding period.
        let inputs = CompleteInputs {
            holding_period: 5.0,
            ..passing_inputs()
        };
        let report = evaluate(&inputs, &policy).unwrap();
        assert!(!report.results.duration.passed);
        assert_eq!(report.decision, CompleteDecision::Avoid);
    }

    #[test]
    fn test_real_yield_threshold_is_strict() {
        let inputs = CompleteInputs {
            ytm: 0.04,
            inflation: 0.03,
            risk_free_rate: 0.02,
            ..passing_inputs()
        };
        let report = evaluate(&inputs, &ScreeningPolicy::default()).unwrap();
        // 1.04 / 1.03 - 1 ≈ 0.97%
        assert!(!report.results.real_yield.passed);
        assert_eq!(report.decision, CompleteDecision::Avoid);
    }

    #[test]
    fn test_currency_loss_fails_home_return() {
        let inputs = CompleteInputs {
            currency_depreciation: -0.08,
            ..passing_inputs()
        };
        let report = evaluate(&inputs, &ScreeningPolicy::default()).unwrap();
        assert!(!report.results.home_return.passed);
        assert!(report.results.home_return.value < 0.0);
    }

    #[test]
    fn test_results_serialize_in_order() {
        let report = evaluate(&passing_inputs(), &ScreeningPolicy::default()).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let keys = ["realYield", "spread", "duration", "homeReturn", "callability", "liquidity"];
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| json.find(&format!("\"{k}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_negative_duration_rejected() {
        let inputs = CompleteInputs {
            duration: -1.0,
            ..passing_inputs()
        };
        assert!(evaluate(&inputs, &ScreeningPolicy::default())
            .unwrap_err()
            .is_invalid_input());
    }
}
