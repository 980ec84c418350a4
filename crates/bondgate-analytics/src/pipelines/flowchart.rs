//! Three-phase bond analysis flowchart.
//!
//! Phase 1 (value) and phase 2 (return) are blocking gates; phase 3 only
//! counts risk flags that downgrade EXECUTE to EXECUTE WITH CAUTION.

use std::fmt;

use bondgate_core::validate::{Validate, ValidationError};
use bondgate_core::{CouponType, DurationMatch, ScreeningPolicy, Status};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{check_inputs, ensure_finite, FieldChecks};
use crate::error::AnalyticsResult;
use crate::pricing::fair_price;

/// Flowchart inputs. Rates are decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowchartInputs {
    /// Market price.
    pub price: f64,
    /// Redemption amount.
    pub face_value: f64,
    /// Annual coupon rate.
    pub coupon_rate: f64,
    /// Years to maturity.
    pub years_to_maturity: f64,
    /// Yield the investor requires.
    pub required_yield: f64,
    /// Credit spread over the benchmark.
    pub credit_spread: f64,
    /// Coupon structure.
    pub coupon_type: CouponType,
    /// Whether the issuer can call the bond.
    pub is_callable: bool,
    /// Fit between duration and investment horizon.
    pub duration_match: DurationMatch,
}

impl Validate for FlowchartInputs {
    fn validate(&self) -> Vec<ValidationError> {
        FieldChecks::new()
            .positive("price", self.price)
            .positive("face_value", self.face_value)
            .maturity("years_to_maturity", self.years_to_maturity)
            .finite("coupon_rate", self.coupon_rate)
            .rate("required_yield", self.required_yield)
            .finite("credit_spread", self.credit_spread)
            .finish()
    }
}

/// Flowchart decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowchartDecision {
    /// Critical phases pass with no risk flags.
    #[serde(rename = "EXECUTE")]
    Execute,
    /// Critical phases pass with at least one risk flag.
    #[serde(rename = "EXECUTE WITH CAUTION")]
    ExecuteWithCaution,
    /// A critical phase failed.
    #[serde(rename = "STOP")]
    Stop,
}

impl FlowchartDecision {
    /// Wire label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Execute => "EXECUTE",
            Self::ExecuteWithCaution => "EXECUTE WITH CAUTION",
            Self::Stop => "STOP",
        }
    }
}

impl fmt::Display for FlowchartDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowchartMetrics {
    /// Price at the required yield and policy frequency.
    pub fair_price: f64,
    /// Premium (+) or discount (-) to fair price, in percent.
    #[serde(rename = "priceVsFair")]
    pub price_vs_fair_pct: f64,
    /// Price below fair.
    pub is_cheap: bool,
    /// Current yield in percent.
    #[serde(rename = "currentYield")]
    pub current_yield_pct: f64,
    /// Required yield less assumed inflation (decimal).
    pub real_yield: f64,
}

/// Gate statuses for the three phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowchartGates {
    /// 1a: price below fair.
    pub gate1a_status: Status,
    /// 1b: credit spread at or above the minimum.
    pub gate1b_status: Status,
    /// Both phase 1 gates passed.
    pub phase1_pass: bool,
    /// 2a: real yield not negative.
    pub gate2a_status: Status,
    /// 2b: current yield at or above the required yield (caution otherwise).
    pub gate2b_status: Status,
    /// Phase 2 has no failing gate.
    pub phase2_pass: bool,
    /// 3a: coupon structure.
    pub gate3a_status: Status,
    /// 3b: duration match.
    pub gate3b_status: Status,
    /// 3c: callability.
    pub gate3c_status: Status,
}

impl FlowchartGates {
    /// Number of phase 3 gates that did not pass.
    #[must_use]
    pub fn risk_flags(&self) -> u32 {
        [self.gate3a_status, self.gate3b_status, self.gate3c_status]
            .iter()
            .map(|s| u32::from(!s.is_pass()))
            .sum()
    }
}

/// Full flowchart report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowchartReport {
    /// Derived metrics.
    pub metrics: FlowchartMetrics,
    /// Gate statuses.
    pub gates: FlowchartGates,
    /// Decision.
    pub decision: FlowchartDecision,
    /// Phase 3 gates that did not pass.
    pub risk_flags: u32,
}

/// Runs the flowchart.
///
/// # Errors
///
/// * `InvalidInput` if price, face value or maturity are not positive, or a
///   numeric input is not finite
/// * `ComputationFailed` if the fair price or a derived metric is not finite
pub fn evaluate(
    inputs: &FlowchartInputs,
    policy: &ScreeningPolicy,
) -> AnalyticsResult<FlowchartReport> {
    check_inputs(inputs)?;
    let settings = &policy.flowchart;
    let p = inputs.price;
    let f = inputs.face_value;
    let ry = inputs.required_yield;

    let fair = fair_price(
        f,
        inputs.coupon_rate,
        ry,
        inputs.years_to_maturity,
        settings.frequency,
    )?;
    let price_vs_fair_pct = (p - fair) / fair * 100.0;
    let current_yield = f * inputs.coupon_rate / p;
    let real_yield = ry - settings.assumed_inflation;
    ensure_finite(&[
        ("fair price", fair),
        ("price vs fair", price_vs_fair_pct),
        ("current yield", current_yield),
    ])?;
    let is_cheap = p < fair;

    let gate1a_status = Status::pass_or_fail(is_cheap);
    let gate1b_status = Status::pass_or_fail(inputs.credit_spread >= settings.min_credit_spread);
    let phase1_pass = gate1a_status.is_pass() && gate1b_status.is_pass();

    let gate2a_status = Status::pass_or_fail(real_yield >= 0.0);
    let gate2b_status = Status::pass_or_caution(current_yield >= ry);
    let phase2_pass = gate2a_status.is_pass() && !gate2b_status.is_fail();

    let gates = FlowchartGates {
        gate1a_status,
        gate1b_status,
        phase1_pass,
        gate2a_status,
        gate2b_status,
        phase2_pass,
        gate3a_status: match inputs.coupon_type {
            CouponType::Fixed => Status::Pass,
            CouponType::Floating => Status::Caution,
            CouponType::Zero => Status::Fail,
        },
        gate3b_status: match inputs.duration_match {
            DurationMatch::Good => Status::Pass,
            DurationMatch::Moderate => Status::Caution,
            DurationMatch::Poor => Status::Fail,
        },
        gate3c_status: Status::pass_or_caution(!inputs.is_callable),
    };

    let risk_flags = gates.risk_flags();
    let decision = match (phase1_pass && phase2_pass, risk_flags) {
        (false, _) => FlowchartDecision::Stop,
        (true, 0) => FlowchartDecision::Execute,
        (true, _) => FlowchartDecision::ExecuteWithCaution,
    };
    debug!("flowchart: {decision} with {risk_flags} risk flags");

    Ok(FlowchartReport {
        metrics: FlowchartMetrics {
            fair_price: fair,
            price_vs_fair_pct,
            is_cheap,
            current_yield_pct: current_yield * 100.0,
            real_yield,
        },
        gates,
        decision,
        risk_flags,
    })
}
