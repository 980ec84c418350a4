//! Request handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use bondgate_analytics::pipelines::complete::{self, CompleteReport};
use bondgate_analytics::pipelines::flowchart::{self, FlowchartReport};
use bondgate_analytics::pipelines::screener::{self, ScreenerOutcome};
use bondgate_analytics::pipelines::screener_pro::{self, ScreenerProReport};
use bondgate_analytics::pipelines::smart::{self, SmartReport};
use bondgate_analytics::pipelines::valuation::{self, ValuationReport};
use bondgate_core::{Date, ScreeningPolicy};

use crate::dto::{
    CompleteRequest, FlowchartRequest, ScreenerProRequest, ScreenerRequest, SmartRequest,
    ValuationRequest,
};
use crate::error::ApiResult;

/// Application state.
pub struct AppState {
    /// Thresholds applied by every pipeline
    pub policy: ScreeningPolicy,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Bond Screener: nine pass/fail checkpoints.
pub async fn calculate_screener(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScreenerRequest>, JsonRejection>,
) -> ApiResult<Json<ScreenerOutcome>> {
    let Json(request) = payload?;
    let outcome = screener::evaluate(&request.into(), &state.policy)?;
    tracing::debug!(decision = %outcome.decision(), "screener evaluated");
    Ok(Json(outcome))
}

/// Bond Screener Pro: additive score.
pub async fn calculate_screener_pro(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScreenerProRequest>, JsonRejection>,
) -> ApiResult<Json<ScreenerProReport>> {
    let Json(request) = payload?;
    let report = screener_pro::evaluate(&request.into(), &state.policy)?;
    tracing::debug!(
        score = report.total_score,
        recommendation = %report.recommendation,
        "screener pro evaluated"
    );
    Ok(Json(report))
}

/// Valuation: fair price plus qualitative risks.
pub async fn calculate_valuation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ValuationRequest>, JsonRejection>,
) -> ApiResult<Json<ValuationReport>> {
    let Json(request) = payload?;
    let report = valuation::evaluate(&request.into(), &state.policy)?;
    Ok(Json(report))
}

/// Complete Analysis: six checks, all must pass.
pub async fn calculate_complete(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CompleteRequest>, JsonRejection>,
) -> ApiResult<Json<CompleteReport>> {
    let Json(request) = payload?;
    let report = complete::evaluate(&request.into(), &state.policy)?;
    Ok(Json(report))
}

/// Decision Flowchart: gated phases.
pub async fn calculate_flowchart(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FlowchartRequest>, JsonRejection>,
) -> ApiResult<Json<FlowchartReport>> {
    let Json(request) = payload?;
    let report = flowchart::evaluate(&request.into(), &state.policy)?;
    Ok(Json(report))
}

/// Smart Evaluator: weighted six-step score.
///
/// The maturity step is measured from the request's `asOf` date, or today.
pub async fn smart_evaluator(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SmartRequest>, JsonRejection>,
) -> ApiResult<Json<SmartReport>> {
    let Json(request) = payload?;
    let as_of = request.as_of_or(Date::today());
    let report = smart::evaluate(&request.into(), &state.policy, as_of)?;
    tracing::debug!(
        score = report.total_score,
        recommendation = %report.recommendation,
        "smart evaluator finished"
    );
    Ok(Json(report))
}
