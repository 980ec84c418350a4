//! Route definitions.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use bondgate_core::ScreeningPolicy;

use crate::handlers::{self, AppState};

/// Create the API router.
///
/// # Arguments
/// * `policy` - Thresholds applied by every pipeline
pub fn create_router(policy: ScreeningPolicy) -> Router {
    let state = Arc::new(AppState { policy });

    Router::new()
        // Health
        .route("/health", get(handlers::health))
        .route("/api/v1/health", get(handlers::health))
        // Calculators
        .route("/api/v1/calculate/screener", post(handlers::calculate_screener))
        .route("/api/v1/calculate/screener-pro", post(handlers::calculate_screener_pro))
        .route("/api/v1/calculate/valuation", post(handlers::calculate_valuation))
        .route("/api/v1/calculate/complete", post(handlers::calculate_complete))
        .route("/api/v1/calculate/flowchart", post(handlers::calculate_flowchart))
        // Smart Evaluator
        .route("/api/tools/smart-evaluator", post(handlers::smart_evaluator))
        .route("/api/v1/calculate/smart-evaluator", post(handlers::smart_evaluator))
        // State
        .with_state(state)
}
