use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::AppState;
use crate::services::query::DEFAULT_FEATURED_LIMIT;
use crate::types::{FeaturedParams, FeaturedResponse, PriceSeries};
use crate::{AppError, Result};

pub async fn price_series(
    State(state): State<Arc<AppState>>,
    Path((market, commodity)): Path<(String, String)>,
) -> Result<Json<PriceSeries>> {
    let series = state.query.get_price_series(&market, &commodity)?;
    Ok(Json(series))
}

// TODO: cap `limit` once the frontend settles on a page size; it is unbounded today.
pub async fn featured(
    State(state): State<Arc<AppState>>,
    params: std::result::Result<Query<FeaturedParams>, QueryRejection>,
) -> Result<Json<FeaturedResponse>> {
    let Query(params) = params.map_err(|e| AppError::Validation(e.body_text()))?;
    let limit = params.limit.unwrap_or(DEFAULT_FEATURED_LIMIT);
    let items = state.query.get_featured(limit, params.city.as_deref());

    Ok(Json(FeaturedResponse { items }))
}
