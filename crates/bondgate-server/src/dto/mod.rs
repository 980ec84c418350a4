//! Request bodies and their conversion into pipeline inputs.
//!
//! Field names mirror the camelCase JSON keys.

pub mod coerce;
#[allow(missing_docs)]
mod calculate;
#[allow(missing_docs)]
mod smart;

pub use calculate::{
    CompleteRequest, FlowchartRequest, ScreenerProRequest, ScreenerRequest, ValuationRequest,
};
pub use smart::SmartRequest;
