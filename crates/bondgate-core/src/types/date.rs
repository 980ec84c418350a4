//! Calendar dates for maturity arithmetic.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Year length used to turn a day count into years to maturity.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// A day on the calendar, written `YYYY-MM-DD` on the wire.
///
/// Deserialization goes through [`Date::parse`], so surrounding whitespace is
/// accepted and a bad value reports which text was rejected.
///
/// ```rust
/// use bondgate_core::types::Date;
///
/// let settle = Date::from_ymd(2025, 1, 1).unwrap();
/// let maturity = Date::parse("2030-01-01").unwrap();
/// assert!((settle.years_until(&maturity) - 5.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Date(NaiveDate);

impl Date {
    /// Builds a date from its parts, rejecting impossible days like Feb 30.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => Ok(Self(date)),
            None => Err(CoreError::invalid_date(format!(
                "{year}-{month:02}-{day:02} does not exist"
            ))),
        }
    }

    /// Reads `YYYY-MM-DD`, ignoring surrounding whitespace.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|e| CoreError::invalid_date(format!("'{s}' is not YYYY-MM-DD ({e})")))
    }

    /// Current UTC date.
    #[must_use]
    pub fn today() -> Self {
        Self(chrono::Utc::now().date_naive())
    }

    /// Years from `self` to `later` on a 365.25-day year.
    ///
    /// Negative when `later` is in the past.
    #[must_use]
    pub fn years_until(&self, later: &Date) -> f64 {
        let days = later.0.signed_duration_since(self.0).num_days();
        days as f64 / DAYS_PER_YEAR
    }
}

impl TryFrom<String> for Date {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Date> for String {
    fn from(date: Date) -> Self {
        date.to_string()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        let date = Date::parse(" 2031-06-15 ").unwrap();
        assert_eq!(date.to_string(), "2031-06-15");
        assert_eq!(date, Date::from_ymd(2031, 6, 15).unwrap());
    }

    #[test]
    fn rejects_impossible_or_garbled_dates() {
        assert!(Date::from_ymd(2024, 2, 30).is_err());
        assert!(Date::parse("15/06/2031").is_err());
        assert!(Date::parse("").is_err());
    }

    #[test]
    fn leap_year_counts_366_days() {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 1).unwrap();

        assert!((start.years_until(&end) - 366.0 / 365.25).abs() < 1e-12);
        assert!(end.years_until(&start) < 0.0);
    }

    #[test]
    fn wire_form_is_a_bare_string() {
        let date = Date::from_ymd(2030, 12, 31).unwrap();
        assert_eq!(serde_json::to_value(date).unwrap(), "2030-12-31");
        assert_eq!(serde_json::from_str::<Date>("\"2030-12-31\"").unwrap(), date);
        assert_eq!(serde_json::from_str::<Date>("\" 2030-12-31\"").unwrap(), date);

        let err = serde_json::from_str::<Date>("\"2030-13-01\"").unwrap_err();
        assert!(err.to_string().contains("'2030-13-01' is not YYYY-MM-DD"));
    }
}
