use serde::{Deserialize, Serialize};

use souschef_core::SearchOutcome;
use souschef_graph::StateSchema;

/// Judgment from the classification step.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Classification {
    pub is_cooking_related: bool,
    pub confidence: f64,
    pub reasoning: String,
}

/// Verdict from the cookware feasibility step.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct CookwareVerdict {
    pub can_make: bool,
    pub required_items: Vec<String>,
    pub available_items: Vec<String>,
    pub missing_items: Vec<String>,
    pub confidence: f64,
    pub suggestions: String,
    pub reasoning: String,
}

impl CookwareVerdict {
    /// Short markdown summary for prompt injection.
    pub fn summary(&self) -> String {
        let mut summary = if self.can_make {
            "✅ **Good news!** You can make this recipe with your available cookware.".to_string()
        } else {
            "⚠️ **Heads up!** This recipe requires some cookware you don't have.".to_string()
        };
        if !self.missing_items.is_empty() {
            summary.push_str(&format!(
                "\n\n**Missing items:** {}",
                self.missing_items.join(", ")
            ));
        }
        if !self.suggestions.is_empty() {
            summary.push_str(&format!("\n\n**Suggestions:** {}", self.suggestions));
        }
        summary
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ToolDecisions {
    pub needs_web_search: bool,
    pub needs_cookware_check: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct DebugInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_decisions: Option<ToolDecisions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The mutable record threaded through every workflow step. One instance per
/// request; nothing survives across requests.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ChatState {
    pub user_message: String,
    pub is_cooking_related: bool,
    pub classification: Option<Classification>,
    pub web_search: Option<SearchOutcome>,
    pub cookware_check: Option<CookwareVerdict>,
    pub final_response: String,
    pub tools_used: Vec<String>,
    pub debug: DebugInfo,
}

impl StateSchema for ChatState {}

impl ChatState {
    pub fn for_message(user_message: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            ..Self::default()
        }
    }
}

/// The payload handed back to the boundary layer once the graph terminates.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ChatReport {
    pub response: String,
    pub is_cooking_related: bool,
    pub tools_used: Vec<String>,
    pub cookware_check: Option<CookwareVerdict>,
    pub debug_info: DebugInfo,
}
