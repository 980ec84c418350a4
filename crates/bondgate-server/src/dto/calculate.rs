//! Request bodies for the `/api/v1/calculate/*` endpoints.
//!
//! Rates arrive in percent and are converted to decimals here, so the
//! pipelines only ever see decimals.

use bondgate_analytics::pipelines::complete::CompleteInputs;
use bondgate_analytics::pipelines::flowchart::FlowchartInputs;
use bondgate_analytics::pipelines::screener::ScreenerInputs;
use bondgate_analytics::pipelines::screener_pro::ScreenerProInputs;
use bondgate_analytics::pipelines::valuation::ValuationInputs;
use bondgate_core::{CouponType, CreditRating, CurrencyRisk, DurationMatch, HoldingPlan, Liquidity};
use serde::Deserialize;

use super::coerce;

fn from_pct(percent: f64) -> f64 {
    percent / 100.0
}

/// `POST /api/v1/calculate/screener`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerRequest {
    #[serde(deserialize_with = "coerce::number")]
    pub face_value: f64,
    #[serde(alias = "bondPrice", deserialize_with = "coerce::number")]
    pub market_price: f64,
    /// Percent.
    #[serde(deserialize_with = "coerce::number")]
    pub coupon_rate: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub years_to_maturity: f64,
    /// Percent.
    #[serde(deserialize_with = "coerce::number")]
    pub inflation: f64,
    /// Percent.
    #[serde(rename = "riskFreeYTM", alias = "riskFreeYtm", deserialize_with = "coerce::number")]
    pub risk_free_ytm: f64,
    /// Percent.
    #[serde(deserialize_with = "coerce::number")]
    pub currency_depreciation: f64,
    /// Percent.
    #[serde(deserialize_with = "coerce::number")]
    pub home_inflation: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub holding_period: f64,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub is_callable: bool,
    /// Millions per day.
    #[serde(deserialize_with = "coerce::number")]
    pub trading_volume: f64,
    #[serde(alias = "creditRating")]
    pub bond_rating: CreditRating,
}

impl From<ScreenerRequest> for ScreenerInputs {
    fn from(r: ScreenerRequest) -> Self {
        Self {
            face_value: r.face_value,
            market_price: r.market_price,
            coupon_rate: from_pct(r.coupon_rate),
            years_to_maturity: r.years_to_maturity,
            inflation: from_pct(r.inflation),
            risk_free_rate: from_pct(r.risk_free_ytm),
            currency_depreciation: from_pct(r.currency_depreciation),
            home_inflation: from_pct(r.home_inflation),
            holding_period: r.holding_period,
            is_callable: r.is_callable,
            trading_volume: r.trading_volume,
            rating: r.bond_rating,
        }
    }
}

/// `POST /api/v1/calculate/screener-pro`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenerProRequest {
    #[serde(alias = "price", deserialize_with = "coerce::number")]
    pub bond_price: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub face_value: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub coupon_rate: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub years_to_maturity: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub ytm: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub current_yield: f64,
    #[serde(rename = "treasuryYTM", alias = "treasuryYtm", deserialize_with = "coerce::number")]
    pub treasury_ytm: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub inflation: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub duration: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub holding_period: f64,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub is_callable: bool,
    #[serde(deserialize_with = "coerce::number")]
    pub trading_volume: f64,
    #[serde(alias = "bondRating")]
    pub credit_rating: CreditRating,
    pub coupon_type: CouponType,
}

impl From<ScreenerProRequest> for ScreenerProInputs {
    fn from(r: ScreenerProRequest) -> Self {
        Self {
            price: r.bond_price,
            face_value: r.face_value,
            coupon_rate: from_pct(r.coupon_rate),
            years_to_maturity: r.years_to_maturity,
            ytm: from_pct(r.ytm),
            current_yield: from_pct(r.current_yield),
            treasury_ytm: from_pct(r.treasury_ytm),
            inflation: from_pct(r.inflation),
            duration: r.duration,
            holding_period: r.holding_period,
            is_callable: r.is_callable,
            trading_volume: r.trading_volume,
            rating: r.credit_rating,
            coupon_type: r.coupon_type,
        }
    }
}

/// `POST /api/v1/calculate/valuation`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationRequest {
    #[serde(alias = "price", deserialize_with = "coerce::number")]
    pub bond_price: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub face_value: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub coupon_rate: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub years_to_maturity: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub ytm: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub required_yield: f64,
    /// Coupons per year.
    #[serde(deserialize_with = "coerce::count")]
    pub frequency: u32,
    pub coupon_type: CouponType,
    #[serde(alias = "bondRating")]
    pub credit_rating: CreditRating,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub is_callable: bool,
    pub liquidity: Liquidity,
    pub currency_risk: CurrencyRisk,
    pub holding_plan: HoldingPlan,
}

impl From<ValuationRequest> for ValuationInputs {
    fn from(r: ValuationRequest) -> Self {
        Self {
            price: r.bond_price,
            face_value: r.face_value,
            coupon_rate: from_pct(r.coupon_rate),
            years_to_maturity: r.years_to_maturity,
            ytm: from_pct(r.ytm),
            required_yield: from_pct(r.required_yield),
            frequency: r.frequency,
            coupon_type: r.coupon_type,
            rating: r.credit_rating,
            is_callable: r.is_callable,
            liquidity: r.liquidity,
            currency_risk: r.currency_risk,
            holding_plan: r.holding_plan,
        }
    }
}

/// `POST /api/v1/calculate/complete`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRequest {
    #[serde(alias = "price", deserialize_with = "coerce::number")]
    pub bond_price: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub face_value: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub coupon_rate: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub years_to_maturity: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub ytm: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub inflation: f64,
    #[serde(rename = "riskFreeYTM", alias = "riskFreeYtm", deserialize_with = "coerce::number")]
    pub risk_free_ytm: f64,
    #[serde(alias = "creditRating")]
    pub bond_rating: CreditRating,
    #[serde(deserialize_with = "coerce::number")]
    pub duration: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub holding_period: f64,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub is_callable: bool,
    #[serde(deserialize_with = "coerce::number")]
    pub trading_volume: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub currency_depreciation: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub home_inflation: f64,
}

impl From<CompleteRequest> for CompleteInputs {
    fn from(r: CompleteRequest) -> Self {
        Self {
            price: r.bond_price,
            face_value: r.face_value,
            coupon_rate: from_pct(r.coupon_rate),
            years_to_maturity: r.years_to_maturity,
            ytm: from_pct(r.ytm),
            inflation: from_pct(r.inflation),
            risk_free_rate: from_pct(r.risk_free_ytm),
            rating: r.bond_rating,
            duration: r.duration,
            holding_period: r.holding_period,
            is_callable: r.is_callable,
            trading_volume: r.trading_volume,
            currency_depreciation: from_pct(r.currency_depreciation),
            home_inflation: from_pct(r.home_inflation),
        }
    }
}

/// `POST /api/v1/calculate/flowchart`
///
/// A `rateOutlook` field is accepted and ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowchartRequest {
    #[serde(alias = "price", deserialize_with = "coerce::number")]
    pub bond_price: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub face_value: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub coupon_rate: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub years_to_maturity: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub required_yield: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub credit_spread: f64,
    pub coupon_type: CouponType,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub is_callable: bool,
    pub duration_match: DurationMatch,
}

impl From<FlowchartRequest> for FlowchartInputs {
    fn from(r: FlowchartRequest) -> Self {
        Self {
            price: r.bond_price,
            face_value: r.face_value,
            coupon_rate: from_pct(r.coupon_rate),
            years_to_maturity: r.years_to_maturity,
            required_yield: from_pct(r.required_yield),
            credit_spread: from_pct(r.credit_spread),
            coupon_type: r.coupon_type,
            is_callable: r.is_callable,
            duration_match: r.duration_match,
        }
    }
}
