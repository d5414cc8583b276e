pub mod ai;

pub use ai::{create_ai_client, AiClient, GeminiClient};
