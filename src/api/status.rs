use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::AppState;
use crate::types::{BannerResponse, HealthResponse};

pub async fn root(State(state): State<Arc<AppState>>) -> Json<BannerResponse> {
    let model = state.predictor.model_name();

    Json(BannerResponse {
        message: "MarketScan AI Backend",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
        gemini_configured: model.is_some(),
        gemini_model: model.map(str::to_string),
    })
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let model = state.predictor.model_name();

    Json(HealthResponse {
        status: "healthy",
        gemini_available: model.is_some(),
        gemini_model: model.map(str::to_string),
        timestamp: Utc::now().to_rfc3339(),
    })
}
