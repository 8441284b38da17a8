use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use souschef_agent::CookingWorkflow;
use souschef_llm::OpenAiCompatibleClient;
use souschef_server::{cors_layer, router, AppConfig};
use souschef_tools::SerpApiSearch;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; the environment may be set directly.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set; LLM calls will fail into their fallbacks");
    }

    let mut llm_builder = OpenAiCompatibleClient::builder()
        .base_url(&config.openai_base_url)?
        .default_model(config.model.clone());
    if let Some(key) = &config.openai_api_key {
        llm_builder = llm_builder.api_key(key.clone());
    }
    let llm = Arc::new(llm_builder.build()?);
    let search = Arc::new(SerpApiSearch::new(config.serpapi_key.clone()));

    let workflow = Arc::new(CookingWorkflow::new(llm, search));
    let app = router(workflow, cors_layer(&config.cors_origin)?);

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    tracing::info!(addr = %config.addr, "souschef server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
