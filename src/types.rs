use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Query Types
#[derive(Debug, Serialize)]
pub struct MarketsResponse {
    pub markets: Vec<String>,
    pub markets_meta: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct CommoditiesResponse {
    pub commodities: Vec<String>,
    pub items_meta: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct PriceSeries {
    pub market: String,
    pub commodity: String,
    pub prices: Vec<f64>,
    pub dates: Vec<String>,
    pub latest_price: Option<f64>,
    pub change_percent: f64,
    pub meta: Map<String, Value>,
    pub market_meta: Option<Value>,
    pub item_meta: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeaturedItem {
    pub market: String,
    pub commodity: String,
    pub city: Option<String>,
    pub latest_price: Option<f64>,
    pub change_percent: f64,
    pub market_meta: Option<Value>,
    pub item_meta: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct FeaturedResponse {
    pub items: Vec<FeaturedItem>,
}

#[derive(Debug, Deserialize)]
pub struct FeaturedParams {
    pub limit: Option<usize>,
    pub city: Option<String>,
}

// Prediction Types
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionRequest {
    #[serde(default)]
    pub market: String,
    #[serde(default)]
    pub commodity: String,
    pub prices: Option<Vec<f64>>,
    pub dates: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: String,
    pub confidence: String,
    pub tip: String,
    pub raw_response: String,
}

impl PredictionResult {
    pub fn new(
        prediction: impl Into<String>,
        confidence: impl Into<String>,
        tip: impl Into<String>,
        raw_response: impl Into<String>,
    ) -> Self {
        Self {
            prediction: prediction.into(),
            confidence: confidence.into(),
            tip: tip.into(),
            raw_response: raw_response.into(),
        }
    }
}

// Status Types
#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub gemini_configured: bool,
    pub gemini_model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub gemini_available: bool,
    pub gemini_model: Option<String>,
    pub timestamp: String,
}
