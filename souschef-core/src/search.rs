use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub displayed_link: String,
}

/// Outcome of one web search. Providers degrade into an unsuccessful outcome
/// instead of erroring: a missing API key or a failed call must not take the
/// rest of the workflow down with it.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct SearchOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub results: Vec<SearchResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchOutcome {
    pub fn found(query: impl Into<String>, results: Vec<SearchResult>) -> Self {
        Self {
            success: true,
            query: Some(query.into()),
            results,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            query: None,
            results: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Human-readable digest of the top results for prompt injection.
    pub fn digest(&self) -> String {
        if self.results.is_empty() {
            return "No web search results available.".to_string();
        }

        let mut lines = vec!["Here's what I found from web search:".to_string(), String::new()];
        for (i, result) in self.results.iter().take(3).enumerate() {
            let title = if result.title.is_empty() {
                "Unknown Recipe"
            } else {
                &result.title
            };
            let snippet = if result.snippet.is_empty() {
                "No description available"
            } else {
                &result.snippet
            };
            lines.push(format!("{}. **{}**", i + 1, title));
            lines.push(format!("   {snippet}"));
            if !result.link.is_empty() {
                lines.push(format!("   Source: {}", result.link));
            }
            lines.push(String::new());
        }
        lines.join("\n")
    }
}

#[async_trait::async_trait]
pub trait RecipeSearch: Send + Sync + 'static {
    /// Fetch candidate recipe pages for a query. Infallible by contract;
    /// failures are reported inside the outcome.
    async fn search(&self, query: &str, max_results: usize) -> SearchOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str, link: &str, snippet: &str) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            link: link.to_string(),
            snippet: snippet.to_string(),
            displayed_link: String::new(),
        }
    }

    #[test]
    fn digest_limits_to_top_three() {
        let outcome = SearchOutcome::found(
            "pancakes",
            (1..=5)
                .map(|i| result(&format!("Recipe {i}"), "https://example.com", "Fluffy."))
                .collect(),
        );
        let digest = outcome.digest();
        assert!(digest.contains("3. **Recipe 3**"));
        assert!(!digest.contains("Recipe 4"));
    }

    #[test]
    fn digest_handles_empty_results() {
        assert_eq!(
            SearchOutcome::failure("no key").digest(),
            "No web search results available."
        );
    }

    #[test]
    fn digest_fills_missing_fields() {
        let outcome = SearchOutcome::found("x", vec![result("", "", "")]);
        let digest = outcome.digest();
        assert!(digest.contains("Unknown Recipe"));
        assert!(digest.contains("No description available"));
        assert!(!digest.contains("Source:"));
    }
}
