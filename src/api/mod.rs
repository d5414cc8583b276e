pub mod markets;
pub mod predict;
pub mod prices;
pub mod status;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::services::{Predictor, QueryService};

#[derive(Clone)]
pub struct AppState {
    pub query: Arc<QueryService>,
    pub predictor: Arc<Predictor>,
}

pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(status::root))
        .route("/health", get(status::health_check))
        .route("/markets", get(markets::list_markets))
        .route("/commodities/:market", get(markets::list_commodities))
        .route("/prices/:market/:commodity", get(prices::price_series))
        .route("/featured", get(prices::featured))
        .route("/predict", post(predict::handler))
        .route("/sample-data", get(markets::sample_data))
}
