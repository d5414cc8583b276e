use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;
use std::time::Instant;

use crate::api::AppState;
use crate::services::prediction::error_result;
use crate::types::{PredictionRequest, PredictionResult};
use crate::AppError;

/// Always answers 200; body, model and lookup faults come back as fallback content.
pub async fn handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> Json<PredictionResult> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return Json(error_result(&AppError::Validation(rejection.body_text())));
        }
    };

    let start = Instant::now();
    let market = request.market.clone();
    let commodity = request.commodity.clone();

    let result = state.predictor.predict(request).await;

    tracing::info!(
        "Prediction for {}/{} served in {}ms",
        market,
        commodity,
        start.elapsed().as_millis()
    );
    Json(result)
}
