use std::sync::Arc;

use serde_json::Value;

use souschef_core::{json, ChatLlm, ChatRequest, SousChefError, AVAILABLE_COOKWARE};
use souschef_graph::{GraphNode, GraphState, StateUpdate};

use crate::state::{ChatState, CookwareVerdict};

const REQUIRED_FIELDS: [&str; 7] = [
    "can_make",
    "required_items",
    "available_items",
    "missing_items",
    "confidence",
    "suggestions",
    "reasoning",
];

fn system_prompt() -> String {
    let available_items = AVAILABLE_COOKWARE.join(", ");
    format!(
        r#"You are a cooking assistant analyzing recipe feasibility.

Available cookware and tools:
{available_items}

Analyze the provided recipe and determine:
1. What cookware/tools are required
2. Whether the recipe can be made with available items
3. What items are missing (if any)
4. Suggested alternatives or modifications

CRITICAL: You must respond with ONLY a valid JSON object. Do not include any markdown, explanations, or other text.

Use this EXACT format (copy exactly):
{{
    "can_make": true,
    "required_items": ["item1", "item2"],
    "available_items": ["item1", "item2"],
    "missing_items": [],
    "confidence": 0.8,
    "suggestions": "Brief suggestions for alternatives or modifications",
    "reasoning": "Brief explanation of the analysis"
}}

Replace the values appropriately but keep the exact structure and field names.
The confidence should be a number between 0.0 and 1.0."#
    )
}

fn full_inventory() -> Vec<String> {
    AVAILABLE_COOKWARE.iter().map(|s| s.to_string()).collect()
}

fn verdict_from_value(value: &Value, require_all_fields: bool) -> Option<CookwareVerdict> {
    let object = value.as_object()?;
    if require_all_fields && !REQUIRED_FIELDS.iter().all(|field| object.contains_key(*field)) {
        return None;
    }

    let null = Value::Null;
    let field = |name: &str| object.get(name).unwrap_or(&null);
    Some(CookwareVerdict {
        can_make: field("can_make").as_bool().unwrap_or(true),
        required_items: json::coerce_string_list(field("required_items")),
        available_items: json::coerce_string_list(field("available_items")),
        missing_items: json::coerce_string_list(field("missing_items")),
        confidence: json::normalize_confidence(field("confidence")),
        suggestions: field("suggestions").as_str().unwrap_or_default().to_string(),
        reasoning: field("reasoning").as_str().unwrap_or_default().to_string(),
    })
}

/// Parsing contract, in order of preference: strict parse with all fields
/// present; first-brace-to-last-brace substring parse; fallback verdict that
/// carries an excerpt of the unparseable response for diagnosis.
fn parse_verdict(raw: &str) -> CookwareVerdict {
    let cleaned = json::strip_code_fences(raw);

    if let Some(verdict) = serde_json::from_str::<Value>(cleaned)
        .ok()
        .as_ref()
        .and_then(|value| verdict_from_value(value, true))
    {
        return verdict;
    }

    tracing::warn!("direct JSON parsing of cookware response failed, extracting substring");
    if let Some(verdict) = json::extract_object(cleaned)
        .and_then(|candidate| serde_json::from_str::<Value>(candidate).ok())
        .as_ref()
        .and_then(|value| verdict_from_value(value, false))
    {
        return verdict;
    }

    tracing::warn!(output = %raw, "cookware response could not be parsed at all");
    let excerpt: String = raw.chars().take(100).collect();
    CookwareVerdict {
        can_make: true,
        required_items: Vec::new(),
        available_items: full_inventory(),
        missing_items: Vec::new(),
        confidence: 0.5,
        suggestions: "Unable to analyze cookware requirements - response parsing failed"
            .to_string(),
        reasoning: format!("Failed to parse LLM response as JSON. Response: {excerpt}..."),
    }
}

fn call_failure_verdict(err: &SousChefError) -> CookwareVerdict {
    CookwareVerdict {
        can_make: true,
        required_items: Vec::new(),
        available_items: full_inventory(),
        missing_items: Vec::new(),
        confidence: 0.3,
        suggestions: format!("Error during analysis: {err}"),
        reasoning: format!("Analysis failed: {err}"),
    }
}

/// What the checker reasons about: the top search hits when the search
/// succeeded, otherwise the raw user message.
fn recipe_content(state: &ChatState) -> String {
    if let Some(outcome) = &state.web_search {
        if outcome.success && !outcome.results.is_empty() {
            return outcome
                .results
                .iter()
                .take(2)
                .map(|result| format!("{} {}", result.title, result.snippet))
                .collect::<Vec<_>>()
                .join(" ");
        }
    }
    state.user_message.clone()
}

/// The `cookware_check` node: asks the LLM whether the recipe is feasible
/// with the fixed inventory.
pub struct CookwareNode {
    llm: Arc<dyn ChatLlm>,
}

impl CookwareNode {
    pub fn new(llm: Arc<dyn ChatLlm>) -> Self {
        Self { llm }
    }

    async fn check_feasibility(&self, recipe_content: &str) -> CookwareVerdict {
        let request = ChatRequest::from_prompts(
            system_prompt(),
            format!("Recipe to analyze: {recipe_content}"),
        )
        .with_temperature(0.1);

        match self.llm.invoke(request).await {
            Ok(response) => parse_verdict(&response.content),
            Err(err) => {
                tracing::warn!(error = %err, "cookware check call failed");
                call_failure_verdict(&err)
            }
        }
    }
}

#[async_trait::async_trait]
impl GraphNode<ChatState> for CookwareNode {
    async fn run(
        &self,
        input: GraphState<ChatState>,
    ) -> Result<StateUpdate<ChatState>, SousChefError> {
        let mut data = input.data;
        tracing::info!("checking cookware requirements");

        let content = recipe_content(&data);
        let verdict = self.check_feasibility(&content).await;
        tracing::info!(
            can_make = verdict.can_make,
            confidence = verdict.confidence,
            "cookware check completed"
        );

        data.cookware_check = Some(verdict);
        data.tools_used.push("cookware_check".to_string());
        Ok(StateUpdate::new(data))
    }
}
