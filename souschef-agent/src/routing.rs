//! Keyword routing policy. The phrase lists and the combination rules are the
//! product's fixed decision policy; changing them changes which requests hit
//! which collaborators.

use souschef_core::SousChefError;
use souschef_graph::{GraphNode, GraphState, StateUpdate};

use crate::state::{ChatState, ToolDecisions};

/// Phrases that indicate the user wants an actual recipe or instructions.
const SEARCH_TRIGGERS: [&str; 5] = [
    "recipe for",
    "how to make",
    "how do i",
    "recipe",
    "instructions",
];

/// Phrases that indicate a purely informational query, which suppresses the
/// cookware check.
const INFORMATIONAL_EXCLUSIONS: [&str; 10] = [
    "what is",
    "define",
    "explain",
    "tell me about",
    "history of",
    "nutrition",
    "calories",
    "where does",
    "when was",
    "who invented",
];

fn contains_any(message: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| message.contains(phrase))
}

/// The tool-selection predicate. Both booleans are derived independently and
/// then combined; a cooking query that is not purely informational is biased
/// toward searching even without an explicit trigger phrase.
pub fn decide_tools(user_message: &str) -> ToolDecisions {
    let message = user_message.to_lowercase();

    let mut needs_web_search = contains_any(&message, &SEARCH_TRIGGERS);
    let needs_cookware_check = !contains_any(&message, &INFORMATIONAL_EXCLUSIONS);

    if !needs_web_search && needs_cookware_check {
        needs_web_search = true;
    }

    ToolDecisions {
        needs_web_search,
        needs_cookware_check,
    }
}

/// The post-search cookware predicate. Consults the stored decision first,
/// then re-scans the message against the exclusion list. The re-scan is
/// intentionally redundant with `decide_tools` and must stay independent of
/// it; do not collapse the two into a single stored flag.
pub fn should_check_cookware(state: &ChatState) -> bool {
    if state
        .debug
        .tool_decisions
        .is_some_and(|decisions| decisions.needs_cookware_check)
    {
        return true;
    }

    let message = state.user_message.to_lowercase();
    if contains_any(&message, &INFORMATIONAL_EXCLUSIONS) {
        tracing::info!("skipping cookware check for informational query");
        return false;
    }

    tracing::info!("including cookware check for recipe/cooking query");
    true
}

/// Router out of `classify`.
pub fn route_after_classify(state: &GraphState<ChatState>) -> String {
    if state.data.is_cooking_related {
        "decide_tools".to_string()
    } else {
        "non_cooking_reply".to_string()
    }
}

/// Router out of `decide_tools`. `both` and web-only land on `web_search`;
/// cookware is rechecked after the search completes.
pub fn route_after_decide_tools(state: &GraphState<ChatState>) -> String {
    let decisions = state.data.debug.tool_decisions.unwrap_or_default();
    match (decisions.needs_web_search, decisions.needs_cookware_check) {
        (true, _) => "web_search".to_string(),
        (false, true) => "cookware_check".to_string(),
        (false, false) => "generate_response".to_string(),
    }
}

/// Router out of `web_search`.
pub fn route_after_web_search(state: &GraphState<ChatState>) -> String {
    if should_check_cookware(&state.data) {
        "cookware_check".to_string()
    } else {
        "generate_response".to_string()
    }
}

/// The `decide_tools` node: records the tool decisions for the downstream
/// routers and for observability. Pure; no collaborator call.
pub struct DecideToolsNode;

#[async_trait::async_trait]
impl GraphNode<ChatState> for DecideToolsNode {
    async fn run(
        &self,
        input: GraphState<ChatState>,
    ) -> Result<StateUpdate<ChatState>, SousChefError> {
        let mut data = input.data;
        let decisions = decide_tools(&data.user_message);
        tracing::info!(
            needs_web_search = decisions.needs_web_search,
            needs_cookware_check = decisions.needs_cookware_check,
            "tool decisions"
        );
        data.debug.tool_decisions = Some(decisions);
        Ok(StateUpdate::new(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_query_wants_both_tools() {
        let decisions = decide_tools("Recipe for pancakes");
        assert!(decisions.needs_web_search);
        assert!(decisions.needs_cookware_check);
    }

    #[test]
    fn informational_query_wants_neither() {
        // "what is" and "tell me about" both suppress cookware, and with no
        // trigger phrase the default search bias is also suppressed.
        let decisions = decide_tools("What is sous vide");
        assert!(!decisions.needs_web_search);
        assert!(!decisions.needs_cookware_check);
    }

    #[test]
    fn informational_query_with_trigger_still_searches() {
        let decisions = decide_tools("what is the recipe for bechamel");
        assert!(decisions.needs_web_search);
        assert!(!decisions.needs_cookware_check);
    }

    #[test]
    fn plain_cooking_query_is_biased_toward_search() {
        let decisions = decide_tools("my hollandaise keeps splitting");
        assert!(decisions.needs_web_search);
        assert!(decisions.needs_cookware_check);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let decisions = decide_tools("HOW TO MAKE RISOTTO");
        assert!(decisions.needs_web_search);
    }

    #[test]
    fn post_search_predicate_trusts_a_positive_stored_flag() {
        let mut state = ChatState::for_message("what is a roux");
        state.debug.tool_decisions = Some(ToolDecisions {
            needs_web_search: true,
            needs_cookware_check: true,
        });
        assert!(should_check_cookware(&state));
    }

    #[test]
    fn post_search_predicate_rescans_on_a_negative_flag() {
        let mut state = ChatState::for_message("what is the recipe for bechamel");
        state.debug.tool_decisions = Some(ToolDecisions {
            needs_web_search: true,
            needs_cookware_check: false,
        });
        assert!(!should_check_cookware(&state));
    }

    #[test]
    fn post_search_predicate_defaults_to_yes() {
        let state = ChatState::for_message("pancake recipe please");
        assert!(should_check_cookware(&state));
    }
}
