use marketscan_ai::api;
use marketscan_ai::clients::create_ai_client;
use marketscan_ai::config::Config;
use marketscan_ai::dataset::Dataset;
use marketscan_ai::services::{Predictor, QueryService};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marketscan_ai=debug,tower_http=info".into()),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{}", e))?;

    // The service never starts without its dataset
    let dataset = Arc::new(Dataset::load(&config.dataset_path).map_err(|e| anyhow::anyhow!("{}", e))?);
    let query = Arc::new(QueryService::new(dataset));

    let ai_client = create_ai_client(&config.gemini).map_err(|e| anyhow::anyhow!("{}", e))?;
    if let Some(client) = &ai_client {
        tracing::info!("Gemini model configured: {}", client.model_name());
    }
    let predictor = Arc::new(Predictor::new(ai_client, query.clone(), &config.default_currency));

    // Create app state
    let app_state = Arc::new(api::AppState { query, predictor });

    // Create router with state
    let app = api::create_router()
        .layer(cors_layer(&config.allowed_origins)?)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(allowed_origins: &[String]) -> anyhow::Result<CorsLayer> {
    if allowed_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = allowed_origins
        .iter()
        .map(|o| o.parse())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow::anyhow!("Invalid ALLOWED_ORIGINS entry: {}", e))?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}
