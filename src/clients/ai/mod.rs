pub mod gemini;
pub mod parser;
pub mod prompts;

pub use gemini::GeminiClient;

use crate::config::GeminiConfig;
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// A text-generation model: one prompt in, the model's text reply out.
#[async_trait]
pub trait AiClient: Send + Sync {
    async fn generate(&self, prompt: String) -> Result<String>;
    fn model_name(&self) -> &str;
}

/// Builds the configured model client, or `None` when no API key is set.
pub fn create_ai_client(config: &GeminiConfig) -> Result<Option<Arc<dyn AiClient>>> {
    match config.api_key {
        Some(_) => Ok(Some(Arc::new(GeminiClient::new(config)?))),
        None => {
            tracing::warn!("GEMINI_API_KEY not set, predictions will use the fallback response");
            Ok(None)
        }
    }
}
