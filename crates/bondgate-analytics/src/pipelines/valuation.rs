//! Valuation screener.
//!
//! Prices the bond at the investor's required yield and combines two tests:
//! the main criteria (yield meets the requirement and no qualitative risk
//! fails) and the valuation check (cheap, or at most a small premium to fair).

use std::fmt;

use bondgate_core::validate::{Validate, ValidationError};
use bondgate_core::{
    CouponType, CreditRating, CurrencyRisk, HoldingPlan, Liquidity, RiskCheck, ScreeningPolicy,
    Status,
};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{check_inputs, ensure_finite, FieldChecks};
use crate::error::AnalyticsResult;
use crate::pricing::fair_price;

/// Valuation inputs. Rates are decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationInputs {
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
    /// Yield the investor requires.
    pub required_yield: f64,
    /// Coupons per year.
    pub frequency: u32,
    /// Coupon structure.
    pub coupon_type: CouponType,
    /// Issuer credit rating.
    pub rating: CreditRating,
    /// Whether the issuer can call the bond.
    pub is_callable: bool,
    /// Bid/ask liquidity.
    pub liquidity: Liquidity,
    /// Foreign currency exposure.
    pub currency_risk: CurrencyRisk,
    /// Intended holding plan.
    pub holding_plan: HoldingPlan,
}

impl Validate for ValuationInputs {
    fn validate(&self) -> Vec<ValidationError> {
        FieldChecks::new()
            .positive("price", self.price)
            .positive("face_value", self.face_value)
            .maturity("years_to_maturity", self.years_to_maturity)
            .finite("coupon_rate", self.coupon_rate)
            .finite("ytm", self.ytm)
            .rate("required_yield", self.required_yield)
            .frequency("frequency", self.frequency)
            .finish()
    }
}

/// Valuation recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValuationDecision {
    /// Main criteria and valuation both pass.
    #[serde(rename = "BUY")]
    Buy,
    /// Main criteria pass but the price is rich.
    #[serde(rename = "HOLD / WATCH")]
    HoldWatch,
    /// Main criteria fail.
    #[serde(rename = "AVOID")]
    Avoid,
}

impl ValuationDecision {
    /// Wire label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::HoldWatch => "HOLD / WATCH",
            Self::Avoid => "AVOID",
        }
    }
}

impl fmt::Display for ValuationDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived metrics. Percentages are in percent, not decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationMetrics {
    /// Price at the required yield.
    pub fair_price: f64,
    /// Premium (+) or discount (-) to fair price, in percent.
    #[serde(rename = "priceVsFair")]
    pub price_vs_fair_pct: f64,
    /// Current yield in percent.
    #[serde(rename = "currentYield")]
    pub current_yield_pct: f64,
    /// Coupon paid per year.
    pub annual_coupon: f64,
    /// Coupon paid per period.
    pub period_coupon: f64,
}

/// Full valuation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationReport {
    /// Derived metrics.
    pub metrics: ValuationMetrics,
    /// Qualitative risks in a fixed order.
    pub risks: Vec<RiskCheck>,
    /// Yield at or above the requirement.
    pub meets_return: bool,
    /// Cheap, or within the allowed premium to fair.
    pub fairly_valued: bool,
    /// Recommendation.
    pub recommendation: ValuationDecision,
}

fn assess_risks(inputs: &ValuationInputs) -> Vec<RiskCheck> {
    let investment_grade = inputs.rating.is_investment_grade();
    let credit_detail = if investment_grade {
        format!("{} - Investment Grade", inputs.rating)
    } else {
        format!("{} - Non-Investment Grade", inputs.rating)
    };

    let coupon = match inputs.coupon_type {
        CouponType::Fixed => Status::Pass,
        CouponType::Floating => Status::Caution,
        CouponType::Zero => Status::Fail,
    };
    let liquidity = match inputs.liquidity {
        Liquidity::Tight => Status::Pass,
        Liquidity::Moderate => Status::Caution,
        Liquidity::Wide => Status::Fail,
    };
    let currency = match inputs.currency_risk {
        CurrencyRisk::None => Status::Pass,
        CurrencyRisk::Low => Status::Caution,
        CurrencyRisk::High => Status::Fail,
    };

    vec![
        RiskCheck::new(
            "Credit Risk",
            Status::pass_or_caution(investment_grade),
            credit_detail,
        ),
        RiskCheck::new("Coupon Type", coupon, inputs.coupon_type.as_str()),
        RiskCheck::new(
            "Callability",
            Status::pass_or_caution(!inputs.is_callable),
            if inputs.is_callable {
                "Callable"
            } else {
                "Non-Callable"
            },
        ),
        RiskCheck::new("Liquidity", liquidity, inputs.liquidity.as_str()),
        RiskCheck::new("Currency Risk", currency, inputs.currency_risk.as_str()),
        RiskCheck::new(
            "Holding Plan",
            Status::pass_or_caution(inputs.holding_plan == HoldingPlan::Maturity),
            inputs.holding_plan.as_str(),
        ),
    ]
}

/// Runs the valuation screener.
///
/// # Errors
///
/// * `InvalidInput` if price or face value are not positive, maturity is not
///   in (0, 100] years, frequency is outside 1..=12, or a numeric input is not
///   finite
/// * `ComputationFailed` if the fair price or a derived metric is not finite
pub fn evaluate(
    inputs: &ValuationInputs,
    policy: &ScreeningPolicy,
) -> AnalyticsResult<ValuationReport> {
    check_inputs(inputs)?;

    let f = inputs.face_value;
    let p = inputs.price;
    let cr = inputs.coupon_rate;
    let m = f64::from(inputs.frequency);

    let fair = fair_price(
        f,
        cr,
        inputs.required_yield,
        inputs.years_to_maturity,
        inputs.frequency,
    )?;
    let price_vs_fair_pct = (p - fair) / fair * 100.0;
    let current_yield_pct = f * cr / p * 100.0;
    ensure_finite(&[
        ("fair price", fair),
        ("price vs fair", price_vs_fair_pct),
        ("current yield", current_yield_pct),
    ])?;

    let risks = assess_risks(inputs);
    let meets_return = inputs.ytm >= inputs.required_yield;
    let no_failed_risk = risks.iter().all(|r| !r.status.is_fail());
    let fairly_valued =
        p < fair || price_vs_fair_pct <= policy.valuation.max_premium_to_fair_pct;

    let main_criteria = meets_return && no_failed_risk;
    let recommendation = match (main_criteria, fairly_valued) {
        (true, true) => ValuationDecision::Buy,
        (false, _) => ValuationDecision::Avoid,
        (true, false) => ValuationDecision::HoldWatch,
    };
    debug!(
        "valuation: {recommendation} (fair {fair:.4}, premium {price_vs_fair_pct:.2}%, meets return {meets_return})"
    );

    Ok(ValuationReport {
        metrics: ValuationMetrics {
            fair_price: fair,
            price_vs_fair_pct,
            current_yield_pct,
            annual_coupon: f * cr,
            period_coupon: f * cr / m,
        },
        risks,
        meets_return,
        fairly_valued,
        recommendation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;
    use approx::assert_relative_eq;

    fn clean_inputs() -> ValuationInputs {
        ValuationInputs {
            price: 96.0,
            face_value: 100.0,
            coupon_rate: 0.05,
            years_to_maturity: 5.0,
            ytm: 0.06,
            required_yield: 0.055,
            frequency: 2,
            coupon_type: CouponType::Fixed,
            rating: CreditRating::A,
            is_callable: false,
            liquidity: Liquidity::Tight,
            currency_risk: CurrencyRisk::None,
            holding_plan: HoldingPlan::Maturity,
        }
    }

    #[test]
    fn test_cheap_bond_buys() {
        let report = evaluate(&clean_inputs(), &ScreeningPolicy::default()).unwrap();
        let m = &report.metrics;
        assert!(m.fair_price > 97.0 && m.fair_price < 98.5);
        assert!(m.price_vs_fair_pct < 0.0);
        assert_relative_eq!(m.current_yield_pct, 5.0 / 96.0 * 100.0, epsilon = 1e-10);
        assert_relative_eq!(m.annual_coupon, 5.0);
        assert_relative_eq!(m.period_coupon, 2.5);
        assert!(report.risks.iter().all(|r| r.status.is_pass()));
        assert_eq!(report.recommendation, ValuationDecision::Buy);
    }

    #[test]
    fn test_small_premium_still_buys() {
        let policy = ScreeningPolicy::default();
        let fair = evaluate(&clean_inputs(), &policy).unwrap().metrics.fair_price;

        let inputs = ValuationInputs {
            price: fair * 1.015,
            ..clean_inputs()
        };
        let report = evaluate(&inputs, &policy).unwrap();
        assert!(report.fairly_valued);
        assert_eq!(report.recommendation, ValuationDecision::Buy);

        let inputs = ValuationInputs {
            price: fair * 1.03,
            ..clean_inputs()
        };
        let report = evaluate(&inputs, &policy).unwrap();
        assert!(!report.fairly_valued);
        assert_eq!(report.recommendation, ValuationDecision::HoldWatch);
    }

    #[test]
    fn test_failed_risk_avoids() {
        let inputs = ValuationInputs {
            coupon_type: CouponType::Zero,
            ..clean_inputs()
        };
        let report = evaluate(&inputs, &ScreeningPolicy::default()).unwrap();
        assert_eq!(report.risks[1].name, "Coupon Type");
        assert_eq!(report.risks[1].status, Status::Fail);
        assert_eq!(report.recommendation, ValuationDecision::Avoid);
    }

    #[test]
    fn test_cautions_do_not_block() {
        let inputs = ValuationInputs {
            rating: CreditRating::BB,
            is_callable: true,
            liquidity: Liquidity::Moderate,
            currency_risk: CurrencyRisk::Low,
            holding_plan: HoldingPlan::Trade,
            coupon_type: CouponType::Floating,
            ..clean_inputs()
        };
        let report = evaluate(&inputs, &ScreeningPolicy::default()).unwrap();
        assert!(report.risks.iter().all(|r| r.status == Status::Caution));
        assert_eq!(report.risks[0].detail, "BB - Non-Investment Grade");
        assert_eq!(report.recommendation, ValuationDecision::Buy);
    }

    #[test]
    fn test_yield_below_requirement_avoids() {
        let inputs = ValuationInputs {
            ytm: 0.05,
            ..clean_inputs()
        };
        let report = evaluate(&inputs, &ScreeningPolicy::default()).unwrap();
        assert!(!report.meets_return);
        assert_eq!(report.recommendation, ValuationDecision::Avoid);
    }

    #[test]
    fn test_zero_frequency_rejected() {
        let inputs = ValuationInputs {
            frequency: 0,
            ..clean_inputs()
        };
        let err = evaluate(&inputs, &ScreeningPolicy::default()).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("frequency"));
    }

    #[test]
    fn test_oversized_schedule_rejected_before_pricing() {
        let policy = ScreeningPolicy::default();
        let daily = ValuationInputs {
            frequency: 100_000_000,
            ..clean_inputs()
        };
        let err = evaluate(&daily, &policy).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::invalid_input("frequency", "must be between 1 and 12")
        );

        let millennial = ValuationInputs {
            years_to_maturity: 2.0e7,
            ..clean_inputs()
        };
        assert!(evaluate(&millennial, &policy).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_wire_names() {
        let report = evaluate(&clean_inputs(), &ScreeningPolicy::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["metrics"]["priceVsFair"].is_number());
        assert!(json["metrics"]["currentYield"].is_number());
        assert_eq!(json["risks"][3]["name"], "Liquidity");
        assert_eq!(json["risks"][3]["status"], "pass");
        assert_eq!(json["recommendation"], "BUY");
    }
}
