//! Smart Evaluator.
//!
//! Six weighted steps, each scored 0..=2, combined into a score out of 2.0:
//!
//! | Step | Weight | Measures |
//! |------|--------|----------|
//! | 1 | 25% | entry price (buy) or position P&L (hold) |
//! | 2 | 40% | real yield after inflation and currency, spread over risk-free |
//! | 3 | 15% | modified duration |
//! | 4 | 10% | credit rating |
//! | 5 | 5% | coupon structure |
//! | 6 | 5% | years to maturity from the valuation date |
//!
//! In buy mode step 1 reads either the dirty price's position in its 52-week
//! range or the yield's position in its 52-week range, per [`BuySignal`].

use std::fmt;

use bondgate_core::policy::{BuySignal, SmartPolicy};
use bondgate_core::validate::{Validate, ValidationError};
use bondgate_core::{CouponType, CreditRating, Date, ScoredStep, ScreeningPolicy, Status};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{check_inputs, ensure_finite, pct, round2, FieldChecks};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::yields::fx_adjusted_real_yield;

/// Whether the investor is considering a purchase or reviewing a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    /// Prospective purchase.
    #[default]
    Buy,
    /// Existing position: hold or sell.
    #[serde(alias = "sell")]
    Hold,
}

/// A high/low range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Range high.
    pub high: f64,
    /// Range low.
    pub low: f64,
}

impl Band {
    /// Creates a band.
    #[must_use]
    pub fn new(high: f64, low: f64) -> Self {
        Self { high, low }
    }

    /// Width of the band.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    /// Position of `value` in the band: 0 at the low, 1 at the high, 0.5 for
    /// a zero-width band.
    #[must_use]
    pub fn position(&self, value: f64) -> f64 {
        let width = self.width();
        if width == 0.0 {
            0.5
        } else {
            (value - self.low) / width
        }
    }

    fn check(&self, field: &str, checks: FieldChecks) -> FieldChecks {
        checks
            .finite(field, self.high)
            .finite(field, self.low)
            .require(self.high >= self.low, field, "high must not be below low")
    }
}

/// Smart Evaluator inputs. Rates are decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartInputs {
    /// Buy or hold mode.
    pub mode: EvaluationMode,
    /// Dirty (full) price.
    pub dirty_price: f64,
    /// Yield to maturity.
    pub ytm: f64,
    /// Annual coupon rate.
    pub coupon_rate: f64,
    /// Redemption amount.
    pub face_value: f64,
    /// Accrued interest included in the dirty price.
    pub accrued_interest: f64,
    /// Coupon structure.
    pub coupon_type: CouponType,
    /// Maturity date.
    pub maturity_date: Date,
    /// Issuer credit rating.
    pub rating: CreditRating,
    /// Modified duration in years.
    pub modified_duration: f64,
    /// Expected inflation.
    pub inflation_rate: f64,
    /// Expected currency devaluation against the home currency.
    pub currency_devaluation: f64,
    /// Risk-free yield.
    pub risk_free_rate: f64,
    /// Today's dirty price range (buy mode, optional).
    pub day_price: Option<Band>,
    /// 52-week dirty price range (buy mode, price signal).
    pub year_price: Option<Band>,
    /// 52-week yield range (buy mode, yield signal).
    pub year_yield: Option<Band>,
    /// Price paid (hold mode).
    pub purchase_price: Option<f64>,
    /// Overrides the policy's buy signal.
    pub buy_signal: Option<BuySignal>,
}

impl Validate for SmartInputs {
    fn validate(&self) -> Vec<ValidationError> {
        let mut checks = FieldChecks::new()
            .positive("dirty_price", self.dirty_price)
            .finite("ytm", self.ytm)
            .finite("coupon_rate", self.coupon_rate)
            .positive("face_value", self.face_value)
            .non_negative("accrued_interest", self.accrued_interest)
            .non_negative("modified_duration", self.modified_duration)
            .rate("inflation_rate", self.inflation_rate)
            .rate("currency_devaluation", self.currency_devaluation)
            .finite("risk_free_rate", self.risk_free_rate);

        match self.mode {
            EvaluationMode::Buy => {
                for (field, band) in [
                    ("day_price", self.day_price),
                    ("year_price", self.year_price),
                    ("year_yield", self.year_yield),
                ] {
                    if let Some(band) = band {
                        checks = band.check(field, checks);
                    }
                }
            }
            EvaluationMode::Hold => {
                checks = checks.positive("purchase_price", self.purchase_price.unwrap_or(f64::NAN));
            }
        }
        checks.finish()
    }
}

/// Smart Evaluator recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmartDecision {
    /// Score at or above the buy tier.
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
    /// Score at or above the hold tier.
    #[serde(rename = "HOLD / WATCH")]
    HoldWatch,
    /// Anything lower.
    #[serde(rename = "AVOID / SELL")]
    AvoidSell,
}

impl SmartDecision {
    /// Wire label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StrongBuy => "STRONG BUY",
            Self::HoldWatch => "HOLD / WATCH",
            Self::AvoidSell => "AVOID / SELL",
        }
    }
}

impl fmt::Display for SmartDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six scored steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartSteps {
    /// Price & valuation.
    pub step1: ScoredStep,
    /// Real yield & spread.
    pub step2: ScoredStep,
    /// Interest rate risk.
    pub step3: ScoredStep,
    /// Credit risk.
    pub step4: ScoredStep,
    /// Coupon structure.
    pub step5: ScoredStep,
    /// Time to maturity.
    pub step6: ScoredStep,
}

/// Weighted contribution of each step, rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartBreakdown {
    /// Step 1 contribution.
    pub step1: f64,
    /// Step 2 contribution.
    pub step2: f64,
    /// Step 3 contribution.
    pub step3: f64,
    /// Step 4 contribution.
    pub step4: f64,
    /// Step 5 contribution.
    pub step5: f64,
    /// Step 6 contribution.
    pub step6: f64,
}

/// Full Smart Evaluator report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartReport {
    /// Mode evaluated.
    pub mode: EvaluationMode,
    /// Signal used for step 1 in buy mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buy_signal: Option<BuySignal>,
    /// Weighted score out of 2.0, rounded to two decimals.
    pub total_score: f64,
    /// Recommendation.
    pub recommendation: SmartDecision,
    /// Step outcomes.
    pub results: SmartSteps,
    /// Weighted contributions.
    pub breakdown: SmartBreakdown,
}

fn required_band(band: Option<Band>, field: &str) -> AnalyticsResult<Band> {
    band.ok_or_else(|| AnalyticsError::invalid_input(field, "is required in buy mode"))
}

fn entry_step(
    inputs: &SmartInputs,
    signal: BuySignal,
    rules: &SmartPolicy,
) -> AnalyticsResult<ScoredStep> {
    let price = inputs.dirty_price;
    let volatile = inputs
        .day_price
        .filter(|day| day.low > 0.0)
        .is_some_and(|day| day.width() / day.low > rules.volatile_intraday_range);

    let (position, subject, cheap_detail, rich_detail) = match signal {
        BuySignal::PricePercentile => {
            let band = required_band(inputs.year_price, "year_price")?;
            (
                band.position(price),
                "Price",
                format!("Price ${price:.2} is near 52-week low (${:.2}).", band.low),
                format!("Price ${price:.2} is near 52-week high (${:.2}).", band.high),
            )
        }
        BuySignal::YieldPercentile => {
            let band = required_band(inputs.year_yield, "year_yield")?;
            (
                1.0 - band.position(inputs.ytm),
                "Yield",
                format!(
                    "Yield {} is near 52-week high ({}).",
                    pct(inputs.ytm),
                    pct(band.high)
                ),
                format!(
                    "Yield {} is near 52-week low ({}).",
                    pct(inputs.ytm),
                    pct(band.low)
                ),
            )
        }
    };
    ensure_finite(&[("range position", position)])?;

    let (status, score, mut detail) = if position < rules.strong_entry_percentile {
        (Status::Pass, 2.0, format!("{cheap_detail} Strong Value Entry."))
    } else if position < rules.moderate_entry_percentile {
        let note = if volatile {
            "Warning: High Intraday Volatility."
        } else {
            "Acceptable entry."
        };
        let score = if volatile { 0.5 } else { 1.0 };
        (Status::Caution, score, format!("{subject} is moderate. {note}"))
    } else {
        (Status::Fail, 0.0, format!("{rich_detail} Overvalued."))
    };

    let accrued = inputs.accrued_interest;
    let clean = price - accrued;
    let capital_gain = inputs.face_value - clean;
    let mut extras = Vec::new();
    if accrued > 0.0 {
        extras.push(format!("+${accrued:.2} Accrued"));
    }
    if capital_gain > 0.0 {
        extras.push(format!("Guaranteed Capital Gain: ${capital_gain:.2}"));
    }
    if !extras.is_empty() {
        detail.push_str(&format!(" ({})", extras.join(", ")));
    }

    Ok(ScoredStep::new(status, score, format!("Clean: ${clean:.2}"), detail))
}

fn position_step(inputs: &SmartInputs, rules: &SmartPolicy) -> AnalyticsResult<ScoredStep> {
    let cost = inputs.purchase_price.ok_or_else(|| {
        AnalyticsError::invalid_input("purchase_price", "is required in hold mode")
    })?;
    let pnl = (inputs.dirty_price - cost) / cost * 100.0;
    ensure_finite(&[("profit and loss", pnl)])?;

    let (status, score, detail) = if pnl > rules.profit_pass_pct {
        (
            Status::Pass,
            2.0,
            format!("Position is profitable (+{pnl:.2}%). Hold for gains."),
        )
    } else if pnl > rules.loss_caution_pct {
        (
            Status::Caution,
            1.0,
            format!("Position near breakeven ({pnl:.2}%). Watch closely."),
        )
    } else {
        (
            Status::Fail,
            0.0,
            format!("Position underwater ({pnl:.2}%). Consider stop-loss."),
        )
    };
    let sign = if pnl > 0.0 { "+" } else { "" };
    Ok(ScoredStep::new(status, score, format!("P&L: {sign}{pnl:.2}%"), detail))
}

fn yield_step(inputs: &SmartInputs, rules: &SmartPolicy) -> AnalyticsResult<ScoredStep> {
    let real = fx_adjusted_real_yield(
        inputs.ytm,
        inputs.inflation_rate,
        inputs.currency_devaluation,
    );
    let spread = inputs.ytm - inputs.risk_free_rate;
    ensure_finite(&[("real yield", real), ("spread", spread)])?;

    let thin_spread = spread < rules.min_spread;
    let (status, score, mut detail) = if real > rules.strong_real_yield
        && spread > rules.min_spread
    {
        (
            Status::Pass,
            2.0,
            "Returns beat inflation. Healthy spread vs Risk Free Rate.".to_string(),
        )
    } else if real > 0.0 {
        if thin_spread {
            (
                Status::Caution,
                0.5,
                format!(
                    "Yield positive, but Spread < {:.1}% (Risk not justified).",
                    rules.min_spread * 100.0
                ),
            )
        } else {
            (
                Status::Caution,
                1.0,
                "Returns barely cover inflation.".to_string(),
            )
        }
    } else {
        (
            Status::Fail,
            0.0,
            "Returns do not cover inflation/currency loss.".to_string(),
        )
    };

    let annual_income = inputs.face_value * inputs.coupon_rate;
    if annual_income > 0.0 {
        detail.push_str(&format!(" Pays ${annual_income:.2}/yr."));
    }

    Ok(
        ScoredStep::new(status, score, format!("Real: {}", pct(real)), detail).with_formula(
            format!(
                "Spread: {} | Real Yield: ((1 + YTM) / ((1 + Inflation) * (1 + FX))) - 1",
                pct(spread)
            ),
        ),
    )
}

fn rate_risk_step(inputs: &SmartInputs, rules: &SmartPolicy) -> ScoredStep {
    let d = inputs.modified_duration;
    let (status, score) = if d < rules.low_duration {
        (Status::Pass, 2.0)
    } else if d < rules.moderate_duration {
        (Status::Caution, 1.0)
    } else {
        (Status::Fail, 0.0)
    };
    ScoredStep::new(
        status,
        score,
        format!("{d:.2} years"),
        format!("If rates rise 1%, price drops ~{d:.2}%."),
    )
}

fn credit_step(rating: CreditRating) -> ScoredStep {
    let bucket = rating.bucket();
    let (status, score, detail) = if bucket.is_investment_grade() {
        (Status::Pass, 2.0, "Investment Grade.")
    } else if bucket.is_speculative() {
        (Status::Caution, 1.0, "High Yield / Non-Investment Grade.")
    } else {
        (Status::Fail, 0.0, "High Risk / Unrated.")
    };
    ScoredStep::new(status, score, rating.sp_notation(), detail)
}

fn coupon_step(coupon_type: CouponType) -> ScoredStep {
    let (status, score, detail) = match coupon_type {
        CouponType::Fixed => (Status::Pass, 2.0, "Predictable cash flow."),
        CouponType::Floating => (Status::Caution, 1.0, "Variable cash flow."),
        CouponType::Zero => (Status::Caution, 1.0, "No interim cash flow."),
    };
    ScoredStep::new(status, score, coupon_type.label(), detail)
}

fn maturity_step(years: f64, rules: &SmartPolicy) -> ScoredStep {
    let (status, score, detail) = if years < rules.short_maturity_years {
        (Status::Pass, 2.0, "Short duration, lower risk.")
    } else if years < rules.medium_maturity_years {
        (Status::Caution, 1.0, "Medium duration.")
    } else {
        (Status::Caution, 1.0, "Long duration, higher uncertainty.")
    };
    ScoredStep::new(status, score, format!("{years:.1} years"), detail)
}

/// Runs the Smart Evaluator as of `as_of`.
///
/// # Errors
///
/// * `InvalidInput` if a numeric input is out of range, the purchase price is
///   missing in hold mode, or the 52-week range for the selected signal is
///   missing in buy mode
/// * `ComputationFailed` if a derived metric is not finite
pub fn evaluate(
    inputs: &SmartInputs,
    policy: &ScreeningPolicy,
    as_of: Date,
) -> AnalyticsResult<SmartReport> {
    check_inputs(inputs)?;
    let rules = &policy.smart;
    let weights = &rules.weights;

    let (step1, buy_signal) = match inputs.mode {
        EvaluationMode::Buy => {
            let signal = inputs.buy_signal.unwrap_or(rules.buy_signal);
            (entry_step(inputs, signal, rules)?, Some(signal))
        }
        EvaluationMode::Hold => (position_step(inputs, rules)?, None),
    };
    let step2 = yield_step(inputs, rules)?;
    let step3 = rate_risk_step(inputs, rules);
    let step4 = credit_step(inputs.rating);
    let step5 = coupon_step(inputs.coupon_type);
    let step6 = maturity_step(as_of.years_until(&inputs.maturity_date), rules);

    let weighted = [
        step1.score * weights.price,
        step2.score * weights.real_yield,
        step3.score * weights.rate_risk,
        step4.score * weights.credit,
        step5.score * weights.coupon,
        step6.score * weights.maturity,
    ];
    let total_score = round2(weighted.iter().sum());

    let recommendation = if total_score >= rules.tiers.buy {
        SmartDecision::StrongBuy
    } else if total_score >= rules.tiers.hold {
        SmartDecision::HoldWatch
    } else {
        SmartDecision::AvoidSell
    };
    debug!(
        "smart evaluator ({:?}, signal {buy_signal:?}): {recommendation} at {total_score:.2}",
        inputs.mode
    );

    Ok(SmartReport {
        mode: inputs.mode,
        buy_signal,
        total_score,
        recommendation,
        results: SmartSteps {
            step1,
            step2,
            step3,
            step4,
            step5,
            step6,
        },
        breakdown: SmartBreakdown {
            step1: round2(weighted[0]),
            step2: round2(weighted[1]),
            step3: round2(weighted[2]),
            step4: round2(weighted[3]),
            step5: round2(weighted[4]),
            step6: round2(weighted[5]),
        },
    })
}
