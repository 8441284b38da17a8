use std::collections::{HashMap, HashSet};

use crate::{ExecutionConfig, GraphError, GraphState, StateSchema, StateUpdate};
use souschef_core::SousChefError;

pub const START: &str = "__start__";
pub const END: &str = "__end__";

/// A named step in the graph. Nodes are the only place side effects
/// (collaborator calls) happen; the engine itself is a pure interpreter.
#[async_trait::async_trait]
pub trait GraphNode<S: StateSchema>: Send + Sync {
    async fn run(&self, input: GraphState<S>) -> Result<StateUpdate<S>, SousChefError>;
}

type Router<S> = Box<dyn Fn(&GraphState<S>) -> String + Send + Sync>;

pub struct GraphBuilder<S: StateSchema> {
    nodes: HashMap<String, Box<dyn GraphNode<S>>>,
    edges: HashMap<String, String>,
    routers: HashMap<String, Router<S>>,
    entry: Option<String>,
    config: ExecutionConfig,
}

impl<S: StateSchema> Default for GraphBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateSchema> GraphBuilder<S> {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
            routers: HashMap::new(),
            entry: None,
            config: ExecutionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ExecutionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn add_node<N>(mut self, name: &str, node: N) -> Self
    where
        N: GraphNode<S> + 'static,
    {
        self.nodes.insert(name.to_string(), Box::new(node));
        self
    }

    /// Unconditional edge. An edge from [`START`] sets the entry point.
    pub fn add_edge(mut self, from: &str, to: &str) -> Self {
        if from == START {
            self.entry = Some(to.to_string());
        } else {
            self.edges.insert(from.to_string(), to.to_string());
        }
        self
    }

    /// Conditional edge: after `from` runs, the router inspects the state and
    /// names the next node (or [`END`]).
    pub fn add_conditional_edge<F>(mut self, from: &str, router: F) -> Self
    where
        F: Fn(&GraphState<S>) -> String + Send + Sync + 'static,
    {
        self.routers.insert(from.to_string(), Box::new(router));
        self
    }

    pub fn set_entry(mut self, name: &str) -> Self {
        self.entry = Some(name.to_string());
        self
    }

    pub fn build(self) -> ExecutableGraph<S> {
        ExecutableGraph {
            nodes: self.nodes,
            edges: self.edges,
            routers: self.routers,
            entry: self.entry.expect("entry"),
            config: self.config,
        }
    }
}

pub struct ExecutableGraph<S: StateSchema> {
    nodes: HashMap<String, Box<dyn GraphNode<S>>>,
    edges: HashMap<String, String>,
    routers: HashMap<String, Router<S>>,
    entry: String,
    config: ExecutionConfig,
}

impl<S: StateSchema> ExecutableGraph<S> {
    /// Run the graph to a terminal node: a node with no outgoing edge, or a
    /// router returning [`END`]. Exactly one path executes per invocation.
    pub async fn invoke(&self, mut state: GraphState<S>) -> Result<GraphState<S>, GraphError> {
        let mut current = self.entry.clone();
        let mut steps = 0usize;
        let mut visited: HashSet<String> = HashSet::new();

        loop {
            steps += 1;
            if let Some(max) = self.config.max_steps {
                if steps > max {
                    return Err(GraphError::MaxStepsExceeded {
                        max,
                        reached: steps,
                    });
                }
            }
            if self.config.cycle_detection && !visited.insert(current.clone()) {
                return Err(GraphError::CycleDetected { node: current });
            }

            let node = self
                .nodes
                .get(&current)
                .ok_or_else(|| GraphError::MissingNode {
                    node: current.clone(),
                })?;

            tracing::debug!(node = %current, "executing graph node");
            let update = node
                .run(state)
                .await
                .map_err(|source| GraphError::NodeFailed {
                    node: current.clone(),
                    source,
                })?;
            state = update.into_state();

            let next = match self.routers.get(&current) {
                Some(router) => Some(router(&state)),
                None => self.edges.get(&current).cloned(),
            };

            match next {
                None => break,
                Some(name) if name == END => break,
                Some(name) => {
                    if !self.nodes.contains_key(&name) {
                        return Err(GraphError::InvalidEdge { node: name });
                    }
                    current = name;
                }
            }
        }

        Ok(state)
    }
}
