use std::sync::Arc;

use souschef_core::{RecipeSearch, SousChefError};
use souschef_graph::{GraphNode, GraphState, StateUpdate};

use crate::state::ChatState;

const MAX_SEARCH_RESULTS: usize = 5;

/// The `web_search` node: fetches candidate recipe pages for the message.
/// The provider reports failures inside the outcome, so this node never
/// fails the graph.
pub struct WebSearchNode {
    search: Arc<dyn RecipeSearch>,
}

impl WebSearchNode {
    pub fn new(search: Arc<dyn RecipeSearch>) -> Self {
        Self { search }
    }
}

#[async_trait::async_trait]
impl GraphNode<ChatState> for WebSearchNode {
    async fn run(
        &self,
        input: GraphState<ChatState>,
    ) -> Result<StateUpdate<ChatState>, SousChefError> {
        let mut data = input.data;
        tracing::info!("performing web search");

        let outcome = self
            .search
            .search(&data.user_message, MAX_SEARCH_RESULTS)
            .await;
        if !outcome.success {
            tracing::warn!(error = ?outcome.error, "web search was unsuccessful");
        }

        data.web_search = Some(outcome);
        data.tools_used.push("web_search".to_string());
        Ok(StateUpdate::new(data))
    }
}
