//! # Bondgate Core
//!
//! Core types and configuration for the Bondgate bond screening engine.
//!
//! - **Types**: `CreditRating`, `CouponType`, `Date` and the pipeline outcome
//!   types (`Checkpoint`, `Status`, `RiskCheck`, `ScoredStep`)
//! - **Policy**: `ScreeningPolicy`, the threshold tables every pipeline reads
//! - **Validation**: the `Validate` trait used to check policies at load time
//!
//! ## Example
//!
//! ```rust
//! use bondgate_core::prelude::*;
//!
//! let rating: CreditRating = "BBB-".parse().unwrap();
//! let policy = ScreeningPolicy::default();
//! assert!(policy.is_valid());
//! assert_eq!(policy.credit_spread.minimum_for(rating), 0.015);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod policy;
pub mod types;
pub mod validate;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::policy::{BuySignal, CreditSpreadTable, ScoreTiers, ScreeningPolicy};
    pub use crate::types::{
        Checkpoint, CouponType, CreditRating, CurrencyRisk, Date, DurationMatch, HoldingPlan,
        Liquidity, RatingBucket, RiskCheck, ScoredStep, Status,
    };
    pub use crate::validate::{Validate, ValidationError};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use policy::{BuySignal, ScreeningPolicy};
pub use types::*;
