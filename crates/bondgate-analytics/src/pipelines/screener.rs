//! All-or-nothing bond screener.
//!
//! Solves the yield from the market price, derives real, spread and
//! home-currency returns, and requires nine checkpoints to pass for a BUY.
//! A non-positive yield short-circuits into an immediate reject.

use std::fmt;

use bondgate_core::validate::{Validate, ValidationError};
use bondgate_core::{Checkpoint, CreditRating, ScreeningPolicy};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{check_inputs, ensure_finite, pct, FieldChecks};
use crate::error::AnalyticsResult;
use crate::risk::{macaulay_duration, modified_duration, price_sensitivity};
use crate::yields::{current_yield, fisher_real_yield, home_currency_return, solve_ytm};

/// Reason attached to an immediate reject.
pub const NON_POSITIVE_YIELD_REASON: &str = "YTM ≤ 0%. You would be paying to lend money.";

/// Screener inputs. Rates are decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenerInputs {
    /// Redemption amount.
    pub face_value: f64,
    /// Market price.
    pub market_price: f64,
    /// Annual coupon rate.
    pub coupon_rate: f64,
    /// Years to maturity.
    pub years_to_maturity: f64,
    /// Expected inflation in the bond's currency.
    pub inflation: f64,
    /// Risk-free yield for the same maturity.
    pub risk_free_rate: f64,
    /// Expected annual move of the bond's currency against the home currency.
    pub currency_depreciation: f64,
    /// Expected inflation in the investor's home currency.
    pub home_inflation: f64,
    /// Intended holding period in years.
    pub holding_period: f64,
    /// Whether the issuer can call the bond.
    pub is_callable: bool,
    /// Daily trading volume in USD millions.
    pub trading_volume: f64,
    /// Issuer credit rating.
    pub rating: CreditRating,
}

impl Validate for ScreenerInputs {
    fn validate(&self) -> Vec<ValidationError> {
        FieldChecks::new()
            .positive("market_price", self.market_price)
            .positive("face_value", self.face_value)
            .maturity("years_to_maturity", self.years_to_maturity)
            .finite("coupon_rate", self.coupon_rate)
            .rate("inflation", self.inflation)
            .finite("risk_free_rate", self.risk_free_rate)
            .rate("currency_depreciation", self.currency_depreciation)
            .rate("home_inflation", self.home_inflation)
            .finite("holding_period", self.holding_period)
            .finite("trading_volume", self.trading_volume)
            .finish()
    }
}

/// Screener decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenerDecision {
    /// Every checkpoint passed.
    #[serde(rename = "BUY")]
    Buy,
    /// At least one checkpoint failed.
    #[serde(rename = "REJECT")]
    Reject,
}

impl ScreenerDecision {
    /// Wire label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Reject => "REJECT",
        }
    }
}

impl fmt::Display for ScreenerDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerMetrics {
    /// Annual coupon over price.
    pub current_yield: f64,
    /// Solved yield to maturity.
    pub ytm: f64,
    /// Whether the yield solve converged.
    pub ytm_converged: bool,
    /// Fisher real yield.
    pub real_yield: f64,
    /// Macaulay duration in years.
    pub duration: f64,
    /// Macaulay duration over `1 + ytm` (annual compounding).
    pub modified_duration: f64,
    /// Yield over the risk-free rate.
    pub credit_spread: f64,
    /// Relative price change for the policy rate shock.
    pub price_sensitivity: f64,
    /// Real return in the home currency.
    pub home_currency_return: f64,
}

/// The nine checkpoints, in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerCheckpoints {
    /// Current yield (informational, always passes).
    pub cy: Checkpoint,
    /// Yield is positive.
    pub ytm: Checkpoint,
    /// Real yield above the minimum.
    pub ry: Checkpoint,
    /// Duration below half the maturity.
    pub duration: Checkpoint,
    /// Duration within the holding period.
    pub holding_period: Checkpoint,
    /// Spread above the rating's minimum.
    pub credit_spread: Checkpoint,
    /// Positive real return in the home currency.
    pub currency_risk: Checkpoint,
    /// Callable bonds must pay enough.
    pub callability: Checkpoint,
    /// Enough daily volume.
    pub liquidity: Checkpoint,
}

impl ScreenerCheckpoints {
    /// Checkpoints with their names, in evaluation order.
    #[must_use]
    pub fn iter(&self) -> [(&'static str, &Checkpoint); 9] {
        [
            ("cy", &self.cy),
            ("ytm", &self.ytm),
            ("ry", &self.ry),
            ("duration", &self.duration),
            ("holdingPeriod", &self.holding_period),
            ("creditSpread", &self.credit_spread),
            ("currencyRisk", &self.currency_risk),
            ("callability", &self.callability),
            ("liquidity", &self.liquidity),
        ]
    }

    /// True when every checkpoint passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.iter().iter().all(|(_, cp)| cp.passed)
    }
}

/// Full screener report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenerReport {
    /// Derived metrics.
    pub metrics: ScreenerMetrics,
    /// Checkpoint outcomes.
    pub checkpoints: ScreenerCheckpoints,
    /// Decision.
    pub decision: ScreenerDecision,
}

/// Short-circuit outcome for a non-positive yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImmediateReject {
    /// Always true.
    pub immediate_reject: bool,
    /// The solved yield.
    pub ytm: f64,
    /// Explanation.
    pub reason: String,
}

/// Screener outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScreenerOutcome {
    /// Yield was not positive; no checkpoints were evaluated.
    ImmediateReject(ImmediateReject),
    /// Checkpoints were evaluated.
    Evaluated(ScreenerReport),
}

impl ScreenerOutcome {
    /// The decision; an immediate reject counts as REJECT.
    #[must_use]
    pub fn decision(&self) -> ScreenerDecision {
        match self {
            Self::ImmediateReject(_) => ScreenerDecision::Reject,
            Self::Evaluated(report) => report.decision,
        }
    }
}

/// Runs the screener.
///
/// # Errors
///
/// * `InvalidInput` if price, face value or maturity are not positive, or a
///   numeric input is not finite
/// * `ComputationFailed` if the yield or any derived metric is not finite
pub fn evaluate(
    inputs: &ScreenerInputs,
    policy: &ScreeningPolicy,
) -> AnalyticsResult<ScreenerOutcome> {
    check_inputs(inputs)?;
    let thresholds = &policy.screener;

    let f = inputs.face_value;
    let p = inputs.market_price;
    let c = inputs.coupon_rate;
    let n = inputs.years_to_maturity;

    let cy = current_yield(f, c, p);
    let solution = solve_ytm(p, f, c, n)?;
    let ytm = solution.ytm;
    ensure_finite(&[("current yield", cy), ("ytm", ytm)])?;

    if ytm <= 0.0 {
        debug!("screener: immediate reject, ytm {ytm:.6}");
        return Ok(ScreenerOutcome::ImmediateReject(ImmediateReject {
            immediate_reject: true,
            ytm,
            reason: NON_POSITIVE_YIELD_REASON.to_string(),
        }));
    }

    let ry = fisher_real_yield(ytm, inputs.inflation);
    let duration = macaulay_duration(f, c, ytm, n, p)?;
    let modified = modified_duration(duration, ytm, 1);
    let sensitivity = price_sensitivity(duration, thresholds.rate_shock);
    let spread = ytm - inputs.risk_free_rate;
    let home_return =
        home_currency_return(ytm, inputs.currency_depreciation, inputs.home_inflation);
    ensure_finite(&[
        ("real yield", ry),
        ("duration", duration),
        ("modified duration", modified),
        ("credit spread", spread),
        ("home currency return", home_return),
    ])?;

    let duration_limit = n / 2.0;
    let min_spread = policy.credit_spread.minimum_for(inputs.rating);
    let hp = inputs.holding_period;
    let volume = inputs.trading_volume;

    let checkpoints = ScreenerCheckpoints {
        cy: Checkpoint::new(true, cy, format!("CY = {}", pct(cy))),
        ytm: Checkpoint::new(ytm > 0.0, ytm, format!("YTM = {}", pct(ytm))),
        ry: Checkpoint::new(
            ry > thresholds.min_real_yield,
            ry,
            format!(
                "RY = {} (Threshold: > {:.1}%)",
                pct(ry),
                thresholds.min_real_yield * 100.0
            ),
        ),
        duration: Checkpoint::new(
            duration < duration_limit,
            duration,
            format!("Duration = {duration:.2} yrs (Threshold: < {duration_limit:.1})"),
        ),
        holding_period: Checkpoint::new(
            duration <= hp,
            hp,
            format!("Holding Period ({hp} yrs) vs Duration ({duration:.2} yrs)"),
        ),
        credit_spread: Checkpoint::new(
            spread > min_spread,
            spread,
            format!(
                "Spread = {} (Needed for {}: {:.1}%)",
                pct(spread),
                inputs.rating,
                min_spread * 100.0
            ),
        ),
        currency_risk: Checkpoint::new(
            home_return > 0.0,
            home_return,
            format!("Real Return (Home) = {}", pct(home_return)),
        ),
        callability: Checkpoint::new(
            policy.callability_passes(inputs.is_callable, ytm),
            ytm,
            if inputs.is_callable {
                "Bond is callable"
            } else {
                "Not callable"
            },
        ),
        liquidity: Checkpoint::new(
            volume >= thresholds.min_volume,
            volume,
            format!("Daily Volume = ${volume:.1} M"),
        ),
    };

    let decision = if checkpoints.all_passed() {
        ScreenerDecision::Buy
    } else {
        ScreenerDecision::Reject
    };
    debug!(
        "screener: {decision}, failed checkpoints {:?}",
        checkpoints
            .iter()
            .iter()
            .filter(|(_, cp)| !cp.passed)
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
    );

    Ok(ScreenerOutcome::Evaluated(ScreenerReport {
        metrics: ScreenerMetrics {
            current_yield: cy,
            ytm,
            ytm_converged: solution.converged,
            real_yield: ry,
            duration,
            modified_duration: modified,
            credit_spread: spread,
            price_sensitivity: sensitivity,
            home_currency_return: home_return,
        },
        checkpoints,
        decision,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;
    use approx::assert_relative_eq;

    fn reference_inputs() -> ScreenerInputs {
        ScreenerInputs {
            face_value: 100.0,
            market_price: 95.0,
            coupon_rate: 0.05,
            years_to_maturity: 10.0,
            inflation: 0.02,
            risk_free_rate: 0.03,
            currency_depreciation: 0.0,
            home_inflation: 0.02,
            holding_period: 10.0,
            is_callable: false,
            trading_volume: 5.0,
            rating: CreditRating::AAA,
        }
    }

    fn evaluated(outcome: ScreenerOutcome) -> ScreenerReport {
        match outcome {
            ScreenerOutcome::Evaluated(report) => report,
            ScreenerOutcome::ImmediateReject(r) => panic!("unexpected immediate reject: {r:?}"),
        }
    }

    #[test]
    fn test_reference_bond() {
        let report = evaluated(evaluate(&reference_inputs(), &ScreeningPolicy::default()).unwrap());
        let m = &report.metrics;

        assert_relative_eq!(m.current_yield, 5.0 / 95.0, epsilon = 1e-12);
        assert!(m.ytm > 0.0);
        assert!(m.ytm_converged);
        assert!(m.duration > 7.0 && m.duration < 9.0);
        assert_relative_eq!(m.price_sensitivity, -m.duration * 0.01, epsilon = 1e-12);
        assert_relative_eq!(m.modified_duration, m.duration / (1.0 + m.ytm), epsilon = 1e-12);

        let c = &report.checkpoints;
        assert!(c.cy.passed);
        assert!(c.ytm.passed);
        assert!(c.ry.passed);
        assert!(c.holding_period.passed);
        assert!(c.credit_spread.passed);
        assert!(c.currency_risk.passed);
        assert!(c.callability.passed);
        assert!(c.liquidity.passed);
        // Duration ~8 years against a 5 year limit.
        assert!(!c.duration.passed);
        assert_eq!(report.decision, ScreenerDecision::Reject);
    }

    #[test]
    fn test_high_coupon_bond_buys() {
        // A 20% par bond over 30 years has a Macaulay duration near 6 years.
        let inputs = ScreenerInputs {
            market_price: 100.0,
            coupon_rate: 0.20,
            years_to_maturity: 30.0,
            ..reference_inputs()
        };
        let report = evaluated(evaluate(&inputs, &ScreeningPolicy::default()).unwrap());
        assert!(report.checkpoints.all_passed(), "{:?}", report.checkpoints);
        assert_eq!(report.decision, ScreenerDecision::Buy);
    }

    #[test]
    fn test_non_positive_yield_rejects_immediately() {
        let inputs = ScreenerInputs {
            market_price: 160.0,
            ..reference_inputs()
        };
        let outcome = evaluate(&inputs, &ScreeningPolicy::default()).unwrap();
        assert_eq!(outcome.decision(), ScreenerDecision::Reject);

        let ScreenerOutcome::ImmediateReject(reject) = outcome else {
            panic!("expected immediate reject");
        };
        assert!(reject.immediate_reject);
        assert!(reject.ytm <= 0.0);
        assert_eq!(reject.reason, NON_POSITIVE_YIELD_REASON);

        let json = serde_json::to_value(&ScreenerOutcome::ImmediateReject(reject)).unwrap();
        assert_eq!(json["immediateReject"], true);
    }

    #[test]
    fn test_spread_minimum_by_rating() {
        let policy = ScreeningPolicy::default();
        let base = evaluated(evaluate(&reference_inputs(), &policy).unwrap());
        let ytm = base.metrics.ytm;

        let just_under = ScreenerInputs {
            rating: CreditRating::BBB,
            risk_free_rate: ytm - 0.015 + 1e-9,
            ..reference_inputs()
        };
        let report = evaluated(evaluate(&just_under, &policy).unwrap());
        assert!(report.checkpoints.credit_spread.detail.contains("BBB: 1.5%"));
        assert!(!report.checkpoints.credit_spread.passed);

        let just_over = ScreenerInputs {
            risk_free_rate: ytm - 0.015 - 1e-9,
            ..just_under
        };
        let report = evaluated(evaluate(&just_over, &policy).unwrap());
        assert!(report.checkpoints.credit_spread.passed);

        let inputs = ScreenerInputs {
            rating: CreditRating::BBMinus,
            ..reference_inputs()
        };
        let report = evaluated(evaluate(&inputs, &policy).unwrap());
        // 2.67% spread is short of the 4% BB minimum.
        assert!(!report.checkpoints.credit_spread.passed);
    }

    #[test]
    fn test_notched_ratings_use_their_letter_grade_minimum() {
        let policy = ScreeningPolicy::default();
        let ytm = evaluated(evaluate(&reference_inputs(), &policy).unwrap())
            .metrics
            .ytm;

        for (rating, minimum) in [
            (CreditRating::BBBPlus, 0.015),
            (CreditRating::BBBMinus, 0.015),
            (CreditRating::BBPlus, 0.04),
        ] {
            let above = ScreenerInputs {
                rating,
                risk_free_rate: ytm - minimum - 1e-9,
                ..reference_inputs()
            };
            let spread = evaluated(evaluate(&above, &policy).unwrap())
                .checkpoints
                .credit_spread;
            assert!(spread.passed, "{rating} just above {minimum}");

            let below = ScreenerInputs {
                risk_free_rate: ytm - minimum + 1e-9,
                ..above
            };
            let spread = evaluated(evaluate(&below, &policy).unwrap())
                .checkpoints
                .credit_spread;
            assert!(!spread.passed, "{rating} just below {minimum}");
        }
    }

    #[test]
    fn test_callable_low_yield_fails() {
        let inputs = ScreenerInputs {
            is_callable: true,
            market_price: 100.0,
            coupon_rate: 0.04,
            ..reference_inputs()
        };
        let report = evaluated(evaluate(&inputs, &ScreeningPolicy::default()).unwrap());
        assert!(!report.checkpoints.callability.passed);
        assert_eq!(report.checkpoints.callability.detail, "Bond is callable");
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let inputs = ScreenerInputs {
            market_price: 0.0,
            ..reference_inputs()
        };
        let err = evaluate(&inputs, &ScreeningPolicy::default()).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::invalid_input("market_price", "must be positive")
        );

        let inputs = ScreenerInputs {
            years_to_maturity: -3.0,
            ..reference_inputs()
        };
        assert!(evaluate(&inputs, &ScreeningPolicy::default())
            .unwrap_err()
            .is_invalid_input());

        let inputs = ScreenerInputs {
            years_to_maturity: 2.0e7,
            ..reference_inputs()
        };
        assert_eq!(
            evaluate(&inputs, &ScreeningPolicy::default()).unwrap_err(),
            AnalyticsError::invalid_input("years_to_maturity", "must be at most 100 years")
        );
    }

    #[test]
    fn test_idempotent_serialization() {
        let policy = ScreeningPolicy::default();
        let a = serde_json::to_string(&evaluate(&reference_inputs(), &policy).unwrap()).unwrap();
        let b = serde_json::to_string(&evaluate(&reference_inputs(), &policy).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_checkpoints_serialize_in_step_order() {
        let outcome = evaluate(&reference_inputs(), &ScreeningPolicy::default()).unwrap();
        let json = serde_json::to_string(&outcome).unwrap();
        let order = ["\"cy\"", "\"ry\"", "\"holdingPeriod\"", "\"currencyRisk\"", "\"liquidity\""];
        let positions: Vec<usize> = order.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(json.contains("\"decision\":\"REJECT\""));
    }
}
