use std::sync::Arc;

use serde_json::Value;

use souschef_core::{json, ChatLlm, ChatRequest, SousChefError};
use souschef_graph::{GraphNode, GraphState, StateUpdate};

use crate::state::{ChatState, Classification};

const CLASSIFIER_SYSTEM_PROMPT: &str = r#"You are a query classifier for a cooking chatbot.
Determine if the user's query is related to cooking, recipes, food preparation, ingredients, or kitchen activities.

Respond with ONLY a JSON object in this exact format:
{
    "is_cooking_related": true/false,
    "confidence": 0.0-1.0,
    "reasoning": "brief explanation"
}

Examples of cooking-related queries:
- "How do I make scrambled eggs?"
- "What can I cook with chicken and rice?"
- "Recipe for chocolate chip cookies"
- "How long should I boil pasta?"

Examples of non-cooking queries:
- "What's the weather like?"
- "Tell me about programming"
- "How do I fix my car?""#;

/// Fallback when the judgment cannot be obtained: ambiguous input is treated
/// as cooking-related, since a wrong rejection costs more than an unnecessary
/// cooking workflow.
fn fallback(reasoning: String) -> Classification {
    Classification {
        is_cooking_related: true,
        confidence: 0.5,
        reasoning,
    }
}

fn parse_classification(raw: &str) -> Option<Classification> {
    let cleaned = json::strip_code_fences(raw);
    let value: Value = serde_json::from_str(cleaned).ok()?;
    Some(Classification {
        is_cooking_related: value
            .get("is_cooking_related")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        confidence: json::normalize_confidence(value.get("confidence").unwrap_or(&Value::Null)),
        reasoning: value
            .get("reasoning")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

/// The `classify` node: asks the LLM whether the message is cooking-related.
pub struct ClassifyNode {
    llm: Arc<dyn ChatLlm>,
}

impl ClassifyNode {
    pub fn new(llm: Arc<dyn ChatLlm>) -> Self {
        Self { llm }
    }

    async fn classify(&self, query: &str) -> Classification {
        let request = ChatRequest::from_prompts(CLASSIFIER_SYSTEM_PROMPT, format!("Query: {query}"))
            .with_temperature(0.1);

        match self.llm.invoke(request).await {
            Ok(response) => match parse_classification(&response.content) {
                Some(classification) => classification,
                None => {
                    tracing::warn!(
                        output = %response.content,
                        "failed to parse classification response"
                    );
                    fallback(
                        "Failed to parse classification, defaulting to cooking-related"
                            .to_string(),
                    )
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "query classification call failed");
                fallback(format!("Classification error: {err}"))
            }
        }
    }
}

#[async_trait::async_trait]
impl GraphNode<ChatState> for ClassifyNode {
    async fn run(
        &self,
        input: GraphState<ChatState>,
    ) -> Result<StateUpdate<ChatState>, SousChefError> {
        let mut data = input.data;
        tracing::info!(message = %data.user_message, "classifying query");

        let classification = self.classify(&data.user_message).await;
        tracing::info!(
            is_cooking_related = classification.is_cooking_related,
            confidence = classification.confidence,
            "query classified"
        );

        data.is_cooking_related = classification.is_cooking_related;
        data.debug.classification = Some(classification.clone());
        data.classification = Some(classification);
        Ok(StateUpdate::new(data))
    }
}
