//! Threshold tables for the decision pipelines.
//!
//! Every threshold a pipeline compares against lives here rather than inline,
//! so a deployment can tune them from configuration and tests can exercise
//! them in isolation. All rates are decimals (0.015 = 1.5%).
//!
//! # Example
//!
//! ```rust
//! use bondgate_core::policy::ScreeningPolicy;
//! use bondgate_core::types::CreditRating;
//!
//! let policy = ScreeningPolicy::default();
//! assert_eq!(policy.credit_spread.minimum_for(CreditRating::BBB), 0.015);
//! assert_eq!(policy.credit_spread.minimum_for(CreditRating::BBMinus), 0.04);
//! assert_eq!(policy.credit_spread.minimum_for(CreditRating::AA), 0.008);
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{CreditRating, RatingBucket, MAX_COUPON_FREQUENCY};
use crate::validate::{Validate, ValidationError};

// =============================================================================
// SHARED TABLES
// =============================================================================

/// Minimum credit spread over the risk-free rate, by rating bucket.
///
/// Looked up by letter grade, so every notch of BBB (BBB+, BBB, BBB-) shares
/// the `bbb` minimum and every notch of BB shares `bb`. B and below, like A and
/// above, fall back to `other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditSpreadTable {
    /// Minimum spread for BBB+, BBB, BBB-.
    pub bbb: f64,
    /// Minimum spread for BB+, BB, BB-.
    pub bb: f64,
    /// Minimum spread for every other rating.
    pub other: f64,
}

impl Default for CreditSpreadTable {
    fn default() -> Self {
        Self {
            bbb: 0.015,
            bb: 0.04,
            other: 0.008,
        }
    }
}

impl CreditSpreadTable {
    /// Minimum spread required for `rating`.
    #[must_use]
    pub fn minimum_for(&self, rating: CreditRating) -> f64 {
        match rating.bucket() {
            RatingBucket::BBB => self.bbb,
            RatingBucket::BB => self.bb,
            _ => self.other,
        }
    }
}

/// Score cut-offs for weighted pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreTiers {
    /// Score at or above which the outcome is the top tier.
    pub buy: f64,
    /// Score at or above which the outcome is the middle tier.
    pub hold: f64,
}

impl ScoreTiers {
    fn check(&self, field: &str, max: f64, errors: &mut Vec<ValidationError>) {
        if self.hold > self.buy {
            errors.push(ValidationError::new(
                format!("{field}.hold"),
                format!("hold tier {} exceeds buy tier {}", self.hold, self.buy),
            ));
        }
        if self.buy > max {
            errors.push(ValidationError::new(
                format!("{field}.buy"),
                format!("buy tier {} exceeds maximum score {max}", self.buy),
            ));
        }
    }
}

// =============================================================================
// PER-PIPELINE THRESHOLDS
// =============================================================================

/// Thresholds for the all-or-nothing Screener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenerThresholds {
    /// Real yield must exceed this.
    pub min_real_yield: f64,
    /// Daily trading volume (USD millions) must reach this.
    pub min_volume: f64,
    /// Yield shock used for the price sensitivity metric.
    pub rate_shock: f64,
}

impl Default for ScreenerThresholds {
    fn default() -> Self {
        Self {
            min_real_yield: 0.015,
            min_volume: 1.0,
            rate_shock: 0.01,
        }
    }
}

/// Thresholds for the weighted Screener Pro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenerProThresholds {
    /// |price - par| / par below this scores 2.
    pub price_vs_par_band: f64,
    /// Real yield above this scores 2.
    pub strong_real_yield: f64,
    /// Daily trading volume (USD millions) at or above this scores 2.
    pub min_volume: f64,
    /// GOOD BUY / HOLD cut-offs (maximum score 16).
    pub tiers: ScoreTiers,
}

impl Default for ScreenerProThresholds {
    fn default() -> Self {
        Self {
            price_vs_par_band: 0.15,
            strong_real_yield: 0.01,
            min_volume: 1.0,
            tiers: ScoreTiers {
                buy: 12.0,
                hold: 8.0,
            },
        }
    }
}

/// Thresholds for the Valuation screener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationThresholds {
    /// A price up to this many percent above fair value still counts as fairly valued.
    pub max_premium_to_fair_pct: f64,
}

impl Default for ValuationThresholds {
    fn default() -> Self {
        Self {
            max_premium_to_fair_pct: 2.0,
        }
    }
}

/// Thresholds for the Complete evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompleteThresholds {
    /// Real yield must exceed this.
    pub min_real_yield: f64,
    /// Daily trading volume (USD millions) must reach this.
    pub min_volume: f64,
}

impl Default for CompleteThresholds {
    fn default() -> Self {
        Self {
            min_real_yield: 0.015,
            min_volume: 1.0,
        }
    }
}

/// Settings for the three-phase Flowchart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowchartPolicy {
    /// Coupon frequency used for the fair price.
    pub frequency: u32,
    /// Inflation assumed when deriving the real yield.
    pub assumed_inflation: f64,
    /// Credit spread must reach this to clear gate 1b.
    pub min_credit_spread: f64,
}

impl Default for FlowchartPolicy {
    fn default() -> Self {
        Self {
            frequency: 2,
            assumed_inflation: 0.025,
            min_credit_spread: 0.01,
        }
    }
}

/// Buy-mode valuation signal for the Smart Evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BuySignal {
    /// Position of the dirty price within its 52-week range; near the low is cheap.
    #[default]
    PricePercentile,
    /// Position of the yield within its 52-week range; near the high is cheap.
    YieldPercentile,
}

/// Step weights for the Smart Evaluator. Must sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartWeights {
    /// Step 1: price & valuation.
    pub price: f64,
    /// Step 2: real yield & spread.
    pub real_yield: f64,
    /// Step 3: interest rate risk.
    pub rate_risk: f64,
    /// Step 4: credit risk.
    pub credit: f64,
    /// Step 5: coupon structure.
    pub coupon: f64,
    /// Step 6: time to maturity.
    pub maturity: f64,
}

impl Default for SmartWeights {
    fn default() -> Self {
        Self {
            price: 0.25,
            real_yield: 0.40,
            rate_risk: 0.15,
            credit: 0.10,
            coupon: 0.05,
            maturity: 0.05,
        }
    }
}

impl SmartWeights {
    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.price + self.real_yield + self.rate_risk + self.credit + self.coupon + self.maturity
    }
}

/// Settings for the Smart Evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartPolicy {
    /// Default buy-mode valuation signal.
    pub buy_signal: BuySignal,
    /// Step weights.
    pub weights: SmartWeights,
    /// STRONG BUY / HOLD cut-offs (maximum score 2.0).
    pub tiers: ScoreTiers,
    /// Range position below this is a strong entry.
    pub strong_entry_percentile: f64,
    /// Range position below this is a moderate entry.
    pub moderate_entry_percentile: f64,
    /// Intraday high-low range (relative to the low) above which the price is volatile.
    pub volatile_intraday_range: f64,
    /// Profit (percent) above which a position passes.
    pub profit_pass_pct: f64,
    /// Loss (percent) above which a position is only a caution.
    pub loss_caution_pct: f64,
    /// Real yield above this (with a healthy spread) passes.
    pub strong_real_yield: f64,
    /// Spread over the risk-free rate considered healthy.
    pub min_spread: f64,
    /// Modified duration below this passes.
    pub low_duration: f64,
    /// Modified duration below this is a caution.
    pub moderate_duration: f64,
    /// Years to maturity below this passes.
    pub short_maturity_years: f64,
    /// Years to maturity below this is "medium".
    pub medium_maturity_years: f64,
}

impl Default for SmartPolicy {
    fn default() -> Self {
        Self {
            buy_signal: BuySignal::default(),
            weights: SmartWeights::default(),
            tiers: ScoreTiers {
                buy: 1.6,
                hold: 1.2,
            },
            strong_entry_percentile: 0.2,
            moderate_entry_percentile: 0.6,
            volatile_intraday_range: 0.02,
            profit_pass_pct: 5.0,
            loss_caution_pct: -3.0,
            strong_real_yield: 0.02,
            min_spread: 0.015,
            low_duration: 4.0,
            moderate_duration: 7.0,
            short_maturity_years: 5.0,
            medium_maturity_years: 10.0,
        }
    }
}

// =============================================================================
// TOP-LEVEL POLICY
// =============================================================================

/// Complete threshold configuration passed into every pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreeningPolicy {
    /// Minimum spread by rating (Screener, Screener Pro, Complete).
    pub credit_spread: CreditSpreadTable,
    /// A callable bond must yield more than this to pass its callability gate.
    pub callable_min_ytm: f64,
    /// Screener thresholds.
    pub screener: ScreenerThresholds,
    /// Screener Pro thresholds.
    pub screener_pro: ScreenerProThresholds,
    /// Valuation thresholds.
    pub valuation: ValuationThresholds,
    /// Complete evaluation thresholds.
    pub complete: CompleteThresholds,
    /// Flowchart settings.
    pub flowchart: FlowchartPolicy,
    /// Smart Evaluator settings.
    pub smart: SmartPolicy,
}

impl Default for ScreeningPolicy {
    fn default() -> Self {
        Self {
            credit_spread: CreditSpreadTable::default(),
            callable_min_ytm: 0.05,
            screener: ScreenerThresholds::default(),
            screener_pro: ScreenerProThresholds::default(),
            valuation: ValuationThresholds::default(),
            complete: CompleteThresholds::default(),
            flowchart: FlowchartPolicy::default(),
            smart: SmartPolicy::default(),
        }
    }
}

impl ScreeningPolicy {
    /// Callability rule shared by the gate pipelines: non-callable always
    /// passes, callable passes only when `ytm` exceeds the minimum.
    #[must_use]
    pub fn callability_passes(&self, is_callable: bool, ytm: f64) -> bool {
        !is_callable || ytm > self.callable_min_ytm
    }
}

impl Validate for ScreeningPolicy {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let spreads = [
            ("credit_spread.bbb", self.credit_spread.bbb),
            ("credit_spread.bb", self.credit_spread.bb),
            ("credit_spread.other", self.credit_spread.other),
        ];
        for (field, value) in spreads {
            if !value.is_finite() || value < 0.0 {
                errors.push(ValidationError::new(field, "must be a non-negative rate"));
            }
        }

        if !(1..=MAX_COUPON_FREQUENCY).contains(&self.flowchart.frequency) {
            errors.push(ValidationError::new(
                "flowchart.frequency",
                format!("must be between 1 and {MAX_COUPON_FREQUENCY}"),
            ));
        }

        self.screener_pro
            .tiers
            .check("screener_pro.tiers", 16.0, &mut errors);
        self.smart.tiers.check("smart.tiers", 2.0, &mut errors);

        let total = self.smart.weights.total();
        if (total - 1.0).abs() > 1e-9 {
            errors.push(ValidationError::new(
                "smart.weights",
                format!("weights sum to {total}, expected 1"),
            ));
        }

        if self.smart.strong_entry_percentile > self.smart.moderate_entry_percentile {
            errors.push(ValidationError::new(
                "smart.strong_entry_percentile",
                "must not exceed moderate_entry_percentile",
            ));
        }
        if self.smart.low_duration > self.smart.moderate_duration {
            errors.push(ValidationError::new(
                "smart.low_duration",
                "must not exceed moderate_duration",
            ));
        }
        if self.smart.short_maturity_years > self.smart.medium_maturity_years {
            errors.push(ValidationError::new(
                "smart.short_maturity_years",
                "must not exceed medium_maturity_years",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        assert!(ScreeningPolicy::default().is_valid());
    }

    #[test]
    fn test_credit_spread_lookup_by_bucket() {
        let table = CreditSpreadTable::default();
        assert_eq!(table.minimum_for(CreditRating::BBBPlus), 0.015);
        assert_eq!(table.minimum_for(CreditRating::BBB), 0.015);
        assert_eq!(table.minimum_for(CreditRating::BBBMinus), 0.015);
        assert_eq!(table.minimum_for(CreditRating::BBPlus), 0.04);
        assert_eq!(table.minimum_for(CreditRating::BBMinus), 0.04);
        assert_eq!(table.minimum_for(CreditRating::BB), 0.04);
        assert_eq!(table.minimum_for(CreditRating::AAA), 0.008);
        assert_eq!(table.minimum_for(CreditRating::B), 0.008);
        assert_eq!(table.minimum_for(CreditRating::NotRated), 0.008);
    }

    #[test]
    fn test_callability_rule() {
        let policy = ScreeningPolicy::default();
        assert!(policy.callability_passes(false, 0.0));
        assert!(policy.callability_passes(true, 0.051));
        assert!(!policy.callability_passes(true, 0.05));
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut policy = ScreeningPolicy::default();
        policy.smart.weights.price = 0.5;

        let errors = policy.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "smart.weights");
    }

    #[test]
    fn test_inverted_tiers_rejected() {
        let mut policy = ScreeningPolicy::default();
        policy.screener_pro.tiers = ScoreTiers {
            buy: 6.0,
            hold: 10.0,
        };
        policy.flowchart.frequency = 0;

        let errors = policy.validate();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"screener_pro.tiers.hold"));
        assert!(fields.contains(&"flowchart.frequency"));
        assert!(policy.validate_or_error().is_err());
    }

    #[test]
    fn test_daily_flowchart_frequency_rejected() {
        let mut policy = ScreeningPolicy::default();
        policy.flowchart.frequency = 365;
        assert!(!policy.is_valid());

        policy.flowchart.frequency = 12;
        assert!(policy.is_valid());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let policy: ScreeningPolicy = toml::from_str(
            r#"
            callable_min_ytm = 0.06

            [credit_spread]
            bb = 0.05

            [smart]
            buy_signal = "yield-percentile"
            "#,
        )
        .unwrap();

        assert_eq!(policy.callable_min_ytm, 0.06);
        assert_eq!(policy.credit_spread.bb, 0.05);
        assert_eq!(policy.credit_spread.bbb, 0.015);
        assert_eq!(policy.smart.buy_signal, BuySignal::YieldPercentile);
        assert_eq!(policy.smart.weights, SmartWeights::default());
        assert_eq!(policy.flowchart.frequency, 2);
    }
}
