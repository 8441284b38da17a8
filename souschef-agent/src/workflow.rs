use std::sync::Arc;

use souschef_core::{ChatLlm, RecipeSearch};
use souschef_graph::{ExecutableGraph, GraphBuilder, GraphState, START};

use crate::classify::ClassifyNode;
use crate::cookware::CookwareNode;
use crate::respond::{NonCookingNode, RespondNode};
use crate::routing::{
    route_after_classify, route_after_decide_tools, route_after_web_search, DecideToolsNode,
};
use crate::search::WebSearchNode;
use crate::state::{ChatReport, ChatState, DebugInfo};

/// Returned when an error escapes every per-step fallback. The caller still
/// gets a well-formed report.
pub const WORKFLOW_APOLOGY: &str =
    "I apologize, but I encountered an error processing your request. Please try again!";

/// The decision graph for one cooking question.
///
/// ```text
/// classify ──► non_cooking_reply                     (terminal)
///    └──────► decide_tools ──► web_search ──► cookware_check ──► generate_response
///                   │               │                                  ▲
///                   │               └──────────────────────────────────┤
///                   └──────────────────────────────────────────────────┘
/// ```
pub struct CookingWorkflow {
    graph: ExecutableGraph<ChatState>,
}

impl CookingWorkflow {
    pub fn new(llm: Arc<dyn ChatLlm>, search: Arc<dyn RecipeSearch>) -> Self {
        let graph = GraphBuilder::new()
            .add_node("classify", ClassifyNode::new(llm.clone()))
            .add_node("non_cooking_reply", NonCookingNode)
            .add_node("decide_tools", DecideToolsNode)
            .add_node("web_search", WebSearchNode::new(search))
            .add_node("cookware_check", CookwareNode::new(llm.clone()))
            .add_node("generate_response", RespondNode::new(llm))
            .add_edge(START, "classify")
            .add_conditional_edge("classify", route_after_classify)
            .add_conditional_edge("decide_tools", route_after_decide_tools)
            .add_conditional_edge("web_search", route_after_web_search)
            .add_edge("cookware_check", "generate_response")
            .build();

        Self { graph }
    }

    /// Run the complete workflow for one user message. Never fails: an
    /// unexpected error anywhere in the run degrades into an apology report.
    pub async fn run(&self, user_message: &str) -> ChatReport {
        tracing::info!(message = %user_message, "starting workflow");

        let state = GraphState::new(ChatState::for_message(user_message));
        match self.graph.invoke(state).await {
            Ok(final_state) => {
                let data = final_state.data;
                tracing::info!(tools_used = ?data.tools_used, "workflow completed");
                ChatReport {
                    response: data.final_response,
                    is_cooking_related: data.is_cooking_related,
                    tools_used: data.tools_used,
                    cookware_check: data.cookware_check,
                    debug_info: data.debug,
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "workflow execution failed");
                ChatReport {
                    response: WORKFLOW_APOLOGY.to_string(),
                    is_cooking_related: false,
                    tools_used: Vec::new(),
                    cookware_check: None,
                    debug_info: DebugInfo {
                        error: Some(err.to_string()),
                        ..DebugInfo::default()
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use souschef_core::SousChefError;
    use souschef_graph::{GraphNode, StateUpdate};

    /// Every node in the real graph absorbs collaborator failures, so the
    /// graph-level error arm only fires for failures none of them caught.
    struct FailingNode;

    #[async_trait::async_trait]
    impl GraphNode<ChatState> for FailingNode {
        async fn run(
            &self,
            _input: GraphState<ChatState>,
        ) -> Result<StateUpdate<ChatState>, SousChefError> {
            Err(SousChefError::Custom("state corrupted".to_string()))
        }
    }

    fn broken_workflow() -> CookingWorkflow {
        let graph = GraphBuilder::new()
            .add_node("classify", FailingNode)
            .add_edge(START, "classify")
            .build();
        CookingWorkflow { graph }
    }

    #[tokio::test]
    async fn unabsorbed_failure_degrades_into_the_apology_report() {
        let report = broken_workflow().run("recipe for pancakes").await;

        assert_eq!(report.response, WORKFLOW_APOLOGY);
        assert!(!report.is_cooking_related);
        assert!(report.tools_used.is_empty());
        assert!(report.cookware_check.is_none());

        let error = report.debug_info.error.unwrap();
        assert!(error.contains("classify"));
        assert!(report.debug_info.classification.is_none());
    }
}
