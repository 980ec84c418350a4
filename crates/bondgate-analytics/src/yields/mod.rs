//! Yield calculations.
//!
//! # Yield Types
//!
//! - **Yield-to-Maturity (YTM)**: the annually compounded rate that discounts
//!   the coupon stream and redemption back to the market price. Solved with
//!   Newton-Raphson, see [`solve_ytm`].
//!
//! - **Current Yield**: annual coupon divided by price. Ignores time value and
//!   the pull to par.
//!
//! - **Real Yields**: nominal yield deflated by inflation (Fisher), optionally
//!   adjusted for currency moves between the bond's currency and the
//!   investor's home currency.
//!
//! # Usage
//!
//! ```rust
//! use bondgate_analytics::yields::{current_yield, fisher_real_yield, solve_ytm};
//!
//! let ytm = solve_ytm(95.0, 100.0, 0.05, 10.0).unwrap().ytm;
//! let cy = current_yield(100.0, 0.05, 95.0);
//! assert!(ytm > cy);
//!
//! let real = fisher_real_yield(0.05, 0.03);
//! assert!((real - 0.019417).abs() < 1e-6);
//! ```

mod real;
mod ytm;

pub use real::{current_yield, fisher_real_yield, fx_adjusted_real_yield, home_currency_return};
pub use ytm::{bond_price, solve_ytm, YtmSolution, YTM_FLOOR, YTM_INITIAL_GUESS};
