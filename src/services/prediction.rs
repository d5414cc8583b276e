use std::sync::Arc;

use crate::clients::ai::parser::parse_prediction_response;
use crate::clients::ai::prompts::build_prediction_prompt;
use crate::clients::AiClient;
use crate::services::QueryService;
use crate::types::{PredictionRequest, PredictionResult};
use crate::{AppError, Result};

/// Runs prompt building, the model call and reply parsing. Every call yields
/// a well-formed result; faults become fixed fallback content.
pub struct Predictor {
    client: Option<Arc<dyn AiClient>>,
    query: Arc<QueryService>,
    currency: String,
}

impl Predictor {
    pub fn new(client: Option<Arc<dyn AiClient>>, query: Arc<QueryService>, default_currency: &str) -> Self {
        let currency = query
            .dataset()
            .currency()
            .unwrap_or(default_currency)
            .to_string();

        Self {
            client,
            query,
            currency,
        }
    }

    pub fn model_name(&self) -> Option<&str> {
        self.client.as_ref().map(|c| c.model_name())
    }

    pub async fn predict(&self, request: PredictionRequest) -> PredictionResult {
        let Some(client) = &self.client else {
            return not_configured();
        };

        match self.generate(client.as_ref(), request).await {
            Ok(result) => result,
            Err(e) => error_result(&e),
        }
    }

    async fn generate(&self, client: &dyn AiClient, request: PredictionRequest) -> Result<PredictionResult> {
        if request.market.trim().is_empty() {
            return Err(AppError::Validation("market is required".to_string()));
        }
        if request.commodity.trim().is_empty() {
            return Err(AppError::Validation("commodity is required".to_string()));
        }

        let dataset = self.query.dataset();
        let prices = match request.prices {
            Some(prices) => prices,
            None => dataset.prices_for(&request.market, &request.commodity)?.to_vec(),
        };
        let dates = request.dates.unwrap_or_else(|| dataset.dates.clone());

        let prompt = build_prediction_prompt(
            &prices,
            &request.market,
            &request.commodity,
            &dates,
            &self.currency,
        )?;

        let reply = client.generate(prompt).await?;
        Ok(parse_prediction_response(&reply))
    }
}

/// Fallback returned for any fault while producing a prediction.
pub fn error_result(err: &AppError) -> PredictionResult {
    tracing::warn!("Prediction failed, returning fallback: {}", err);
    PredictionResult::new(
        "Error occurred while generating prediction",
        "50%",
        "Try again later or check market manually",
        format!("Error: {}", err),
    )
}

fn not_configured() -> PredictionResult {
    PredictionResult::new(
        "Gemini AI not configured - using fallback prediction",
        "60%",
        "Configure GEMINI_API_KEY for real predictions",
        "Fallback response",
    )
}
