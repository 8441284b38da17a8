use std::env;

/// Server configuration, read from the environment. Missing keys degrade
/// rather than abort: without a search key the search tool reports an
/// unsuccessful outcome, without an LLM key the collaborator calls fail into
/// their per-step fallbacks.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub addr: String,
    pub cors_origin: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub model: String,
    pub serpapi_key: Option<String>,
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            addr: var("SOUSCHEF_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string()),
            cors_origin: var("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string()),
            openai_api_key: var("OPENAI_API_KEY"),
            openai_base_url: var("OPENAI_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: var("SOUSCHEF_MODEL").unwrap_or_else(|| "gpt-4o".to_string()),
            serpapi_key: var("SERPAPI_KEY"),
        }
    }
}
