mod classify;
mod cookware;
mod respond;
pub mod routing;
mod search;
mod state;
mod workflow;

pub use respond::{NON_COOKING_REPLY, RESPONSE_APOLOGY};
pub use state::{
    ChatReport, ChatState, Classification, CookwareVerdict, DebugInfo, ToolDecisions,
};
pub use workflow::{CookingWorkflow, WORKFLOW_APOLOGY};
