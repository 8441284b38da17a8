use std::sync::Arc;

use souschef_core::{ChatLlm, ChatRequest, SousChefError};
use souschef_graph::{GraphNode, GraphState, StateUpdate};

use crate::state::ChatState;

/// The fixed redirect for messages the classifier rejects.
pub const NON_COOKING_REPLY: &str = "I'm a cooking and recipe assistant! I'd be happy to help you \
with cooking questions, recipe suggestions, ingredient substitutions, cooking techniques, or meal \
planning. What would you like to cook today?";

/// Last line of defense before the whole-workflow fallback.
pub const RESPONSE_APOLOGY: &str = "I apologize, but I encountered an error while generating your \
response. Please try asking your cooking question again!";

const RESPONSE_SYSTEM_PROMPT: &str = r#"You are a helpful cooking assistant. Based on the user's question and any available context from web search and cookware analysis, provide a comprehensive and helpful response.

Guidelines:
- Be friendly and encouraging
- Provide clear, step-by-step instructions when relevant
- Include helpful tips and alternatives
- If cookware analysis shows missing items, suggest alternatives
- Keep responses practical and easy to follow
- Use the provided context to enhance your response

If you have web search results, incorporate the most relevant information.
If you have cookware analysis, address any limitations or suggestions."#;

fn build_context(state: &ChatState) -> String {
    let mut parts = Vec::new();

    if let Some(outcome) = &state.web_search {
        if outcome.success {
            parts.push(format!("Web search results:\n{}", outcome.digest()));
        }
    }
    if let Some(verdict) = &state.cookware_check {
        parts.push(format!("Cookware analysis:\n{}", verdict.summary()));
    }

    parts.join("\n\n")
}

/// The `generate_response` node: synthesizes the final prose from the message
/// plus whatever context the optional steps gathered.
pub struct RespondNode {
    llm: Arc<dyn ChatLlm>,
}

impl RespondNode {
    pub fn new(llm: Arc<dyn ChatLlm>) -> Self {
        Self { llm }
    }
}

#[async_trait::async_trait]
impl GraphNode<ChatState> for RespondNode {
    async fn run(
        &self,
        input: GraphState<ChatState>,
    ) -> Result<StateUpdate<ChatState>, SousChefError> {
        let mut data = input.data;
        tracing::info!("generating final response");

        let context = build_context(&data);
        let user_prompt = format!(
            "User question: {}\n\nAvailable context:\n{}\n\nPlease provide a helpful cooking response.",
            data.user_message, context
        );
        let request =
            ChatRequest::from_prompts(RESPONSE_SYSTEM_PROMPT, user_prompt).with_temperature(0.3);

        data.final_response = match self.llm.invoke(request).await {
            Ok(response) => response.content,
            Err(err) => {
                tracing::warn!(error = %err, "response generation failed");
                RESPONSE_APOLOGY.to_string()
            }
        };
        Ok(StateUpdate::new(data))
    }
}

/// The `non_cooking_reply` terminal node.
pub struct NonCookingNode;

#[async_trait::async_trait]
impl GraphNode<ChatState> for NonCookingNode {
    async fn run(
        &self,
        input: GraphState<ChatState>,
    ) -> Result<StateUpdate<ChatState>, SousChefError> {
        let mut data = input.data;
        tracing::info!("handling non-cooking query");
        data.final_response = NON_COOKING_REPLY.to_string();
        data.tools_used.clear();
        Ok(StateUpdate::new(data))
    }
}
