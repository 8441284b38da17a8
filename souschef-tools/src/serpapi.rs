//! Recipe search over the SerpApi Google endpoint.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use souschef_core::{RecipeSearch, SearchOutcome, SearchResult};

const DEFAULT_ENDPOINT: &str = "https://serpapi.com/search";

/// Appended to every query to bias results toward actionable recipe pages.
const QUERY_SUFFIX: &str = "recipe cooking instructions";

#[derive(Deserialize, Debug)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Deserialize, Debug, Default)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    displayed_link: String,
}

#[derive(Clone)]
pub struct SerpApiSearch {
    http: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl SerpApiSearch {
    /// A missing key is not fatal here; searches degrade into unsuccessful
    /// outcomes until one is configured.
    pub fn new(api_key: Option<String>) -> Self {
        if api_key.is_none() {
            tracing::warn!("SERPAPI_KEY not configured; web search will be degraded");
        }
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("valid default endpoint"),
            api_key,
        }
    }

    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }
}

#[async_trait::async_trait]
impl RecipeSearch for SerpApiSearch {
    async fn search(&self, query: &str, max_results: usize) -> SearchOutcome {
        let Some(api_key) = &self.api_key else {
            return SearchOutcome::failure("SERP API key not configured");
        };

        let enhanced_query = format!("{query} {QUERY_SUFFIX}");
        let num = max_results.to_string();
        let request = self.http.get(self.endpoint.clone()).query(&[
            ("q", enhanced_query.as_str()),
            ("num", num.as_str()),
            ("api_key", api_key.as_str()),
            ("engine", "google"),
        ]);

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "web search request failed");
                return SearchOutcome::failure(format!("HTTP error: {err}"));
            }
        };

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "web search returned error status");
                return SearchOutcome::failure(format!("HTTP error: {err}"));
            }
        };

        let parsed: SerpResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!(error = %err, "web search response was not valid JSON");
                return SearchOutcome::failure(format!("Search error: {err}"));
            }
        };

        let results = parsed
            .organic_results
            .into_iter()
            .map(|result| SearchResult {
                title: result.title,
                link: result.link,
                snippet: result.snippet,
                displayed_link: result.displayed_link,
            })
            .collect::<Vec<_>>();

        tracing::info!(query, results = results.len(), "web search succeeded");
        SearchOutcome::found(query, results)
    }
}
