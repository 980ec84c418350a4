//! # Bondgate Analytics
//!
//! Bond math primitives and the decision pipelines built on them.
//!
//! - **Yields**: Newton-Raphson yield-to-maturity, current yield, real yields
//! - **Risk**: Macaulay and modified duration, first-order price sensitivity
//! - **Pricing**: present-value fair price at a required yield
//! - **Pipelines**: Screener, Screener Pro, Valuation, Complete Evaluation,
//!   Flowchart and Smart Evaluator
//!
//! Every pipeline is a pure function of its inputs and a
//! [`ScreeningPolicy`](bondgate_core::ScreeningPolicy). Inputs are validated
//! before any computation and non-finite metrics surface as
//! [`AnalyticsError::ComputationFailed`].
//!
//! ## Usage
//!
//! ```rust
//! use bondgate_analytics::prelude::*;
//!
//! let solution = solve_ytm(95.0, 100.0, 0.05, 10.0).unwrap();
//! assert!(solution.converged);
//! assert!((solution.ytm - 0.0567).abs() < 1e-3);
//!
//! let price = fair_price(100.0, 0.05, 0.05, 10.0, 1).unwrap();
//! assert!((price - 100.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cashflows;
pub mod error;
pub mod pipelines;
pub mod pricing;
pub mod risk;
pub mod yields;

pub use error::{AnalyticsError, AnalyticsResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::pipelines::{complete, flowchart, screener, screener_pro, smart, valuation};
    pub use crate::pricing::fair_price;
    pub use crate::risk::{macaulay_duration, modified_duration, price_sensitivity};
    pub use crate::yields::{
        bond_price, current_yield, fisher_real_yield, fx_adjusted_real_yield,
        home_currency_return, solve_ytm, YtmSolution,
    };
}
