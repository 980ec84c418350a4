//! Interest rate risk measures.
//!
//! - [`macaulay_duration`]: present-value weighted time to cash flows
//! - [`modified_duration`]: Macaulay duration scaled by `1 / (1 + y/m)`
//! - [`price_sensitivity`]: first-order relative price change for a yield shock

mod duration;

pub use duration::{macaulay_duration, modified_duration, price_sensitivity};
