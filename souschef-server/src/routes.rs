use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderValue, Method};
use axum::response::sse::{Event, Sse};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tokio_stream::{Stream, StreamExt};
use tower_http::cors::CorsLayer;

use souschef_agent::CookingWorkflow;
use souschef_core::SousChefError;

/// Delay between simulated word chunks on the streaming endpoint.
const CHUNK_DELAY: Duration = Duration::from_millis(30);

fn default_user_id() -> String {
    "default".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    pub message: String,
    /// Accepted for API compatibility; the workflow is stateless per request.
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

#[derive(Clone)]
struct AppState {
    workflow: Arc<CookingWorkflow>,
}

pub fn cors_layer(origin: &str) -> Result<CorsLayer, SousChefError> {
    let origin = origin
        .parse::<HeaderValue>()
        .map_err(|err| SousChefError::InvalidConfig(format!("invalid CORS origin: {err}")))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

pub fn router(workflow: Arc<CookingWorkflow>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/chat", post(chat))
        .route("/chat/stream", post(chat_stream))
        .layer(cors)
        .with_state(AppState { workflow })
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "SousChef API is running!" }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

/// Synchronous request/response endpoint. Internal workflow failures never
/// surface as transport errors; the report always carries a best-effort or
/// apologetic message.
async fn chat(
    State(state): State<AppState>,
    Json(message): Json<ChatMessage>,
) -> Json<souschef_agent::ChatReport> {
    tracing::debug!(user_id = %message.user_id, "chat request");
    Json(state.workflow.run(&message.message).await)
}

/// Incremental-delivery variant: the workflow runs to completion first, then
/// the response text is replayed as word chunks with a small delay, followed
/// by a final event carrying the full report. Presentation only.
async fn chat_stream(
    State(state): State<AppState>,
    Json(message): Json<ChatMessage>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let report = state.workflow.run(&message.message).await;

    let words: Vec<String> = report
        .response
        .split_whitespace()
        .map(|word| format!("{word} "))
        .collect();

    let chunks = tokio_stream::iter(words).then(|word| async move {
        tokio::time::sleep(CHUNK_DELAY).await;
        Ok::<_, Infallible>(
            Event::default()
                .json_data(json!({ "chunk": word }))
                .unwrap_or_default(),
        )
    });
    let done = tokio_stream::once(report).map(|report| {
        Ok::<_, Infallible>(
            Event::default()
                .event("done")
                .json_data(&report)
                .unwrap_or_default(),
        )
    });

    Sse::new(chunks.chain(done))
}
