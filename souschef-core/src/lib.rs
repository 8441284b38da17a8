mod error;
mod inventory;
pub mod json;
mod llm;
mod search;

pub use error::SousChefError;
pub use inventory::AVAILABLE_COOKWARE;
pub use llm::{ChatLlm, ChatRequest, ChatResponse, Message, Role};
pub use search::{RecipeSearch, SearchOutcome, SearchResult};
