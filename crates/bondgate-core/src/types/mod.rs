//! Domain types for bond screening.
//!
//! - [`Date`]: Calendar date with a 365.25-day year fraction
//! - [`CreditRating`]: Notched credit rating scale
//! - [`CouponType`], [`Liquidity`], [`CurrencyRisk`], [`HoldingPlan`], [`DurationMatch`]:
//!   qualitative bond terms
//! - [`Checkpoint`], [`Status`], [`RiskCheck`], [`ScoredStep`]: pipeline outcomes

mod assessment;
mod date;
mod rating;
mod terms;

pub use assessment::{Checkpoint, RiskCheck, ScoredStep, Status};
pub use date::{Date, DAYS_PER_YEAR};
pub use rating::{CreditRating, RatingBucket};
pub use terms::{
    CouponType, CurrencyRisk, DurationMatch, HoldingPlan, Liquidity, MAX_COUPON_FREQUENCY,
    MAX_YEARS_TO_MATURITY,
};
