mod config;
mod error;
mod graph;
mod state;

pub use config::ExecutionConfig;
pub use error::GraphError;
pub use graph::{ExecutableGraph, GraphBuilder, GraphNode, END, START};
pub use state::{GraphState, StateSchema, StateUpdate};
