//! Qualitative bond terms supplied alongside the numeric inputs.

use serde::{Deserialize, Serialize};

/// Longest maturity any pipeline accepts, in years.
///
/// Pricing sums run once per coupon period, so maturity and frequency bound
/// the work done per evaluation.
pub const MAX_YEARS_TO_MATURITY: f64 = 100.0;

/// Most coupons per year accepted (monthly pay).
pub const MAX_COUPON_FREQUENCY: u32 = 12;

/// Coupon structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CouponType {
    /// Fixed coupon: predictable cash flow.
    #[default]
    Fixed,
    /// Floating coupon reset against an index.
    Floating,
    /// Zero coupon: no interim cash flow.
    Zero,
}

impl CouponType {
    /// Upper-case label used in step values.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fixed => "FIXED",
            Self::Floating => "FLOATING",
            Self::Zero => "ZERO",
        }
    }

    /// Lower-case name as it appears on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Floating => "floating",
            Self::Zero => "zero",
        }
    }
}

/// Secondary-market liquidity as judged by the bid/ask spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Liquidity {
    /// Tight spread.
    Tight,
    /// Moderate spread.
    Moderate,
    /// Wide spread.
    Wide,
}

impl Liquidity {
    /// Wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tight => "tight",
            Self::Moderate => "moderate",
            Self::Wide => "wide",
        }
    }
}

/// Exposure to a foreign currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyRisk {
    /// Bond is in the investor's home currency.
    None,
    /// Stable foreign currency.
    Low,
    /// Volatile foreign currency.
    High,
}

impl CurrencyRisk {
    /// Wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

/// How long the investor intends to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoldingPlan {
    /// Hold until redemption.
    Maturity,
    /// Sell before maturity.
    Trade,
}

impl HoldingPlan {
    /// Wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maturity => "maturity",
            Self::Trade => "trade",
        }
    }
}

/// How well the bond's duration fits the investment horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationMatch {
    /// Duration at or inside the horizon.
    Good,
    /// Slightly longer than the horizon.
    Moderate,
    /// Far longer than the horizon.
    Poor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coupon_type_wire_names() {
        let parsed: CouponType = serde_json::from_str("\"floating\"").unwrap();
        assert_eq!(parsed, CouponType::Floating);
        assert_eq!(serde_json::to_string(&CouponType::Zero).unwrap(), "\"zero\"");
        assert_eq!(CouponType::Fixed.label(), "FIXED");
    }

    #[test]
    fn test_unknown_variant_rejected() {
        assert!(serde_json::from_str::<Liquidity>("\"murky\"").is_err());
        assert!(serde_json::from_str::<DurationMatch>("\"great\"").is_err());
    }
}
