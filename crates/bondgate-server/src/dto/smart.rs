//! Request body for the Smart Evaluator. Rates are decimals.

use bondgate_analytics::pipelines::smart::{Band, EvaluationMode, SmartInputs};
use bondgate_core::{BuySignal, CouponType, CreditRating, Date};
use serde::Deserialize;

use super::coerce;

fn default_face_value() -> f64 {
    100.0
}

/// `POST /api/tools/smart-evaluator`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartRequest {
    #[serde(default)]
    pub mode: EvaluationMode,
    #[serde(deserialize_with = "coerce::number")]
    pub dirty_price: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub ytm: f64,
    #[serde(default, deserialize_with = "coerce::number")]
    pub coupon_rate: f64,
    #[serde(default = "default_face_value", deserialize_with = "coerce::number")]
    pub face_value: f64,
    #[serde(default, deserialize_with = "coerce::number")]
    pub accrued_interest: f64,
    pub coupon_type: CouponType,
    pub maturity_date: Date,
    #[serde(alias = "rating", alias = "creditRating")]
    pub fitch_rating: CreditRating,
    #[serde(deserialize_with = "coerce::number")]
    pub modified_duration: f64,
    #[serde(deserialize_with = "coerce::number")]
    pub inflation_rate: f64,
    #[serde(default, alias = "currencyDevaluation", deserialize_with = "coerce::number")]
    pub currency_dev: f64,
    #[serde(default, deserialize_with = "coerce::number")]
    pub risk_free_rate: f64,

    #[serde(default, deserialize_with = "coerce::optional_number")]
    pub day_price_high: Option<f64>,
    #[serde(default, deserialize_with = "coerce::optional_number")]
    pub day_price_low: Option<f64>,
    #[serde(default, alias = "priceYearHigh", deserialize_with = "coerce::optional_number")]
    pub year_price_high: Option<f64>,
    #[serde(default, alias = "priceYearLow", deserialize_with = "coerce::optional_number")]
    pub year_price_low: Option<f64>,
    #[serde(default, deserialize_with = "coerce::optional_number")]
    pub year_yield_high: Option<f64>,
    #[serde(default, deserialize_with = "coerce::optional_number")]
    pub year_yield_low: Option<f64>,

    #[serde(default, deserialize_with = "coerce::optional_number")]
    pub purchase_price: Option<f64>,
    #[serde(default)]
    pub buy_signal: Option<BuySignal>,

    /// Valuation date for the maturity step; today when absent.
    #[serde(default)]
    pub as_of: Option<Date>,
}

fn band(high: Option<f64>, low: Option<f64>) -> Option<Band> {
    Some(Band::new(high?, low?))
}

impl SmartRequest {
    /// Valuation date, falling back to `today`.
    pub fn as_of_or(&self, today: Date) -> Date {
        self.as_of.unwrap_or(today)
    }
}

impl From<SmartRequest> for SmartInputs {
    fn from(r: SmartRequest) -> Self {
        Self {
            mode: r.mode,
            dirty_price: r.dirty_price,
            ytm: r.ytm,
            coupon_rate: r.coupon_rate,
            face_value: r.face_value,
            accrued_interest: r.accrued_interest,
            coupon_type: r.coupon_type,
            maturity_date: r.maturity_date,
            rating: r.fitch_rating,
            modified_duration: r.modified_duration,
            inflation_rate: r.inflation_rate,
            currency_devaluation: r.currency_dev,
            risk_free_rate: r.risk_free_rate,
            day_price: band(r.day_price_high, r.day_price_low),
            year_price: band(r.year_price_high, r.year_price_low),
            year_yield: band(r.year_yield_high, r.year_yield_low),
            purchase_price: r.purchase_price,
            buy_signal: r.buy_signal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> serde_json::Value {
        json!({
            "dirtyPrice": 98.5,
            "ytm": 0.055,
            "couponType": "fixed",
            "maturityDate": "2031-06-15",
            "fitchRating": "A-",
            "modifiedDuration": 4.2,
            "inflationRate": 0.025,
            "priceYearHigh": "101",
            "priceYearLow": "96"
        })
    }

    #[test]
    fn test_defaults_and_aliases() {
        let request: SmartRequest = serde_json::from_value(minimal()).unwrap();
        assert_eq!(request.mode, EvaluationMode::Buy);
        assert_eq!(request.face_value, 100.0);
        assert!(request.as_of.is_none());

        let inputs = SmartInputs::from(request);
        assert_eq!(inputs.year_price, Some(Band::new(101.0, 96.0)));
        assert_eq!(inputs.day_price, None);
        assert_eq!(inputs.rating, CreditRating::AMinus);
    }

    #[test]
    fn test_half_band_is_absent() {
        let mut body = minimal();
        body["yearYieldHigh"] = json!(0.06);
        let inputs = SmartInputs::from(serde_json::from_value::<SmartRequest>(body).unwrap());
        assert_eq!(inputs.year_yield, None);
    }

    #[test]
    fn test_sell_mode_and_signal() {
        let mut body = minimal();
        body["mode"] = json!("sell");
        body["buySignal"] = json!("yield-percentile");
        body["asOf"] = json!("2026-01-02");
        let request: SmartRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.mode, EvaluationMode::Hold);
        assert_eq!(request.buy_signal, Some(BuySignal::YieldPercentile));
        assert_eq!(
            request.as_of_or(Date::from_ymd(2030, 1, 1).unwrap()),
            Date::from_ymd(2026, 1, 2).unwrap()
        );
    }

    #[test]
    fn test_bad_maturity_date_rejected() {
        let mut body = minimal();
        body["maturityDate"] = json!("15/06/2031");
        let err = serde_json::from_value::<SmartRequest>(body).unwrap_err();
        assert!(err.to_string().contains("'15/06/2031' is not YYYY-MM-DD"));
    }

    #[test]
    fn test_padded_dates_are_trimmed() {
        let mut body = minimal();
        body["maturityDate"] = json!(" 2031-06-15 ");
        let request: SmartRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.maturity_date, Date::from_ymd(2031, 6, 15).unwrap());
    }
}
