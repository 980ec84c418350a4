//! Weighted-score screener.
//!
//! Eight steps each score 0, 1 or 2 for a maximum of 16. Yield and duration
//! are supplied by the caller rather than solved.

use std::fmt;

use bondgate_core::validate::{Validate, ValidationError};
use bondgate_core::{CouponType, CreditRating, ScreeningPolicy};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{check_inputs, ensure_finite, FieldChecks};
use crate::error::AnalyticsResult;

/// Screener Pro inputs. Rates are decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenerProInputs {
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
    /// Quoted current yield.
    pub current_yield: f64,
    /// Treasury yield for the same maturity.
    pub treasury_ytm: f64,
    /// Expected inflation.
    pub inflation: f64,
    /// Duration in years.
    pub duration: f64,
    /// Intended holding period in years.
    pub holding_period: f64,
    /// Whether the issuer can call the bond.
    pub is_callable: bool,
    /// Daily trading volume in USD millions.
    pub trading_volume: f64,
    /// Issuer credit rating.
    pub rating: CreditRating,
    /// Coupon structure.
    pub coupon_type: CouponType,
}

impl Validate for ScreenerProInputs {
    fn validate(&self) -> Vec<ValidationError> {
        FieldChecks::new()
            .positive("price", self.price)
            .positive("face_value", self.face_value)
            .maturity("years_to_maturity", self.years_to_maturity)
            .finite("coupon_rate", self.coupon_rate)
            .finite("ytm", self.ytm)
            .finite("current_yield", self.current_yield)
            .finite("treasury_ytm", self.treasury_ytm)
            .finite("inflation", self.inflation)
            .non_negative("duration", self.duration)
            .finite("holding_period", self.holding_period)
            .finite("trading_volume", self.trading_volume)
            .finish()
    }
}

/// Screener Pro recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenerProDecision {
    /// Score at or above the buy tier.
    #[serde(rename = "GOOD BUY")]
    GoodBuy,
    /// Score at or above the hold tier.
    #[serde(rename = "HOLD / WATCH")]
    HoldWatch,
    /// Anything lower.
    #[serde(rename = "REJECT / AVOID")]
    RejectAvoid,
}

impl ScreenerProDecision {
    /// Wire label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoodBuy => "GOOD BUY",
            Self::HoldWatch => "HOLD / WATCH",
            Self::RejectAvoid => "REJECT / AVOID",
        }
    }
}

impl fmt::Display for ScreenerProDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-step scores, each 0..=2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenerProScores {
    /// Price close to par.
    pub step2: u32,
    /// Fixed coupon.
    pub step3a: u32,
    /// Current yield not above the yield to maturity.
    pub step3b: u32,
    /// Real yield.
    pub step4: u32,
    /// Duration within the holding period.
    pub step5a: u32,
    /// Credit spread against the rating minimum.
    pub step5b: u32,
    /// Callability.
    pub step5c: u32,
    /// Liquidity.
    pub step6a: u32,
}

impl ScreenerProScores {
    /// Sum of all step scores.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.step2
            + self.step3a
            + self.step3b
            + self.step4
            + self.step5a
            + self.step5b
            + self.step5c
            + self.step6a
    }
}

/// Derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerProMetrics {
    /// (price - par) / par.
    pub price_vs_par: f64,
    /// Yield minus inflation.
    pub real_yield: f64,
    /// Yield over treasury.
    pub credit_spread: f64,
}

/// Full Screener Pro report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerProReport {
    /// Sum of step scores, out of 16.
    pub total_score: u32,
    /// Step scores.
    pub scores: ScreenerProScores,
    /// Recommendation.
    pub recommendation: ScreenerProDecision,
    /// Derived metrics.
    pub metrics: ScreenerProMetrics,
}

/// Runs Screener Pro.
///
/// # Errors
///
/// * `InvalidInput` if price, face value or maturity are not positive, or a
///   numeric input is not finite
/// * `ComputationFailed` if a derived metric is not finite
pub fn evaluate(
    inputs: &ScreenerProInputs,
    policy: &ScreeningPolicy,
) -> AnalyticsResult<ScreenerProReport> {
    check_inputs(inputs)?;
    let thresholds = &policy.screener_pro;
    let y = inputs.ytm;

    let price_vs_par = (inputs.price - inputs.face_value) / inputs.face_value;
    let real_yield = y - inputs.inflation;
    let spread = y - inputs.treasury_ytm;
    ensure_finite(&[
        ("price vs par", price_vs_par),
        ("real yield", real_yield),
        ("credit spread", spread),
    ])?;

    let min_spread = policy.credit_spread.minimum_for(inputs.rating);
    let scores = ScreenerProScores {
        step2: if price_vs_par.abs() < thresholds.price_vs_par_band {
            2
        } else {
            1
        },
        step3a: if inputs.coupon_type == CouponType::Fixed {
            2
        } else {
            1
        },
        step3b: if inputs.current_yield <= y { 2 } else { 1 },
        step4: if real_yield > thresholds.strong_real_yield {
            2
        } else if real_yield > 0.0 {
            1
        } else {
            0
        },
        step5a: if inputs.duration <= inputs.holding_period {
            2
        } else {
            1
        },
        step5b: if spread >= min_spread {
            2
        } else if spread > 0.0 {
            1
        } else {
            0
        },
        step5c: if !inputs.is_callable {
            2
        } else if y >= policy.callable_min_ytm {
            1
        } else {
            0
        },
        step6a: if inputs.trading_volume >= thresholds.min_volume {
            2
        } else {
            1
        },
    };

    let total_score = scores.total();
    let total = f64::from(total_score);
    let recommendation = if total >= thresholds.tiers.buy {
        ScreenerProDecision::GoodBuy
    } else if total >= thresholds.tiers.hold {
        ScreenerProDecision::HoldWatch
    } else {
        ScreenerProDecision::RejectAvoid
    };
    debug!("screener pro: {recommendation} with {total_score}/16");

    Ok(ScreenerProReport {
        total_score,
        scores,
        recommendation,
        metrics: ScreenerProMetrics {
            price_vs_par,
            real_yield,
            credit_spread: spread,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strong_inputs() -> ScreenerProInputs {
        ScreenerProInputs {
            price: 98.0,
            face_value: 100.0,
            coupon_rate: 0.05,
            years_to_maturity: 5.0,
            ytm: 0.055,
            current_yield: 0.051,
            treasury_ytm: 0.03,
            inflation: 0.02,
            duration: 4.4,
            holding_period: 5.0,
            is_callable: false,
            trading_volume: 3.0,
            rating: CreditRating::A,
            coupon_type: CouponType::Fixed,
        }
    }

    #[test]
    fn test_perfect_score() {
        let report = evaluate(&strong_inputs(), &ScreeningPolicy::default()).unwrap();
        assert_eq!(report.total_score, 16);
        assert_eq!(report.recommendation, ScreenerProDecision::GoodBuy);
    }

    #[test]
    fn test_bbb_spread_exactly_at_minimum_scores_two() {
        let inputs = ScreenerProInputs {
            rating: CreditRating::BBB,
            ytm: 0.015,
            treasury_ytm: 0.0,
            ..strong_inputs()
        };
        let report = evaluate(&inputs, &ScreeningPolicy::default()).unwrap();
        assert_eq!(report.metrics.credit_spread, 0.015);
        assert_eq!(report.scores.step5b, 2);
    }

    #[test]
    fn test_spread_tiers() {
        let policy = ScreeningPolicy::default();
        let thin = ScreenerProInputs {
            rating: CreditRating::BB,
            ..strong_inputs()
        };
        // 2.5% spread is positive but short of the 4% BB minimum.
        assert_eq!(evaluate(&thin, &policy).unwrap().scores.step5b, 1);

        let negative = ScreenerProInputs {
            treasury_ytm: 0.06,
            ..strong_inputs()
        };
        assert_eq!(evaluate(&negative, &policy).unwrap().scores.step5b, 0);
    }

    #[test]
    fn test_callability_tiers() {
        let policy = ScreeningPolicy::default();
        let callable = ScreenerProInputs {
            is_callable: true,
            ..strong_inputs()
        };
        assert_eq!(evaluate(&callable, &policy).unwrap().scores.step5c, 1);

        let callable_low = ScreenerProInputs {
            ytm: 0.045,
            ..callable
        };
        assert_eq!(evaluate(&callable_low, &policy).unwrap().scores.step5c, 0);
    }

    #[test]
    fn test_weak_bond_is_rejected() {
        let inputs = ScreenerProInputs {
            price: 70.0,
            ytm: 0.01,
            current_yield: 0.07,
            treasury_ytm: 0.02,
            inflation: 0.03,
            duration: 9.0,
            is_callable: true,
            trading_volume: 0.2,
            coupon_type: CouponType::Floating,
            ..strong_inputs()
        };
        let report = evaluate(&inputs, &ScreeningPolicy::default()).unwrap();
        // 1 + 1 + 1 + 0 + 1 + 0 + 0 + 1
        assert_eq!(report.total_score, 5);
        assert_eq!(report.recommendation, ScreenerProDecision::RejectAvoid);
    }

    #[test]
    fn test_hold_tier() {
        let inputs = ScreenerProInputs {
            coupon_type: CouponType::Zero,
            duration: 6.0,
            trading_volume: 0.5,
            is_callable: true,
            ytm: 0.04,
            current_yield: 0.045,
            ..strong_inputs()
        };
        let report = evaluate(&inputs, &ScreeningPolicy::default()).unwrap();
        // 2 + 1 + 1 + 2 + 1 + 2 + 0 + 1
        assert_eq!(report.total_score, 10);
        assert_eq!(report.recommendation, ScreenerProDecision::HoldWatch);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["recommendation"], "HOLD / WATCH");
        assert_eq!(json["totalScore"], 10);
    }

    #[test]
    fn test_zero_face_value_rejected() {
        let inputs = ScreenerProInputs {
            face_value: 0.0,
            ..strong_inputs()
        };
        assert!(evaluate(&inputs, &ScreeningPolicy::default())
            .unwrap_err()
            .is_invalid_input());
    }
}
