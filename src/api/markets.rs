use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::AppState;
use crate::dataset::Dataset;
use crate::types::{CommoditiesResponse, MarketsResponse};
use crate::Result;

pub async fn list_markets(State(state): State<Arc<AppState>>) -> Json<MarketsResponse> {
    Json(state.query.list_markets())
}

pub async fn list_commodities(
    State(state): State<Arc<AppState>>,
    Path(market): Path<String>,
) -> Result<Json<CommoditiesResponse>> {
    let commodities = state.query.list_commodities(&market).map_err(|e| {
        tracing::debug!("Commodity listing failed: {}", e);
        e
    })?;

    Ok(Json(commodities))
}

pub async fn sample_data(State(state): State<Arc<AppState>>) -> Json<Dataset> {
    Json(state.query.dataset().clone())
}
