use serde::{Deserialize, Serialize};
use souschef_core::SousChefError;
use souschef_graph::{
    ExecutionConfig, GraphBuilder, GraphError, GraphNode, GraphState, StateSchema, StateUpdate,
};

#[derive(Clone, Default, Debug, Serialize, Deserialize, PartialEq)]
struct DemoState {
    count: i32,
}

impl StateSchema for DemoState {}

struct Inc;

#[async_trait::async_trait]
impl GraphNode<DemoState> for Inc {
    async fn run(
        &self,
        input: GraphState<DemoState>,
    ) -> Result<StateUpdate<DemoState>, SousChefError> {
        Ok(StateUpdate::new(DemoState {
            count: input.data.count + 1,
        }))
    }
}

struct Explode;

#[async_trait::async_trait]
impl GraphNode<DemoState> for Explode {
    async fn run(
        &self,
        _input: GraphState<DemoState>,
    ) -> Result<StateUpdate<DemoState>, SousChefError> {
        Err(SousChefError::Custom("boom".to_string()))
    }
}

#[tokio::test]
async fn edge_to_unknown_node_fails() {
    let graph = GraphBuilder::new()
        .add_node("a", Inc)
        .add_edge("a", "ghost")
        .set_entry("a")
        .build();

    let err = graph.invoke(GraphState::new(DemoState::default())).await.unwrap_err();
    assert!(matches!(err, GraphError::InvalidEdge { node } if node == "ghost"));
}

#[tokio::test]
async fn node_failure_names_the_node() {
    let graph = GraphBuilder::new()
        .add_node("explode", Explode)
        .set_entry("explode")
        .build();

    let err = graph.invoke(GraphState::new(DemoState::default())).await.unwrap_err();
    match err {
        GraphError::NodeFailed { node, source } => {
            assert_eq!(node, "explode");
            assert_eq!(source.to_string(), "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn revisiting_a_node_is_a_cycle() {
    let graph = GraphBuilder::new()
        .add_node("a", Inc)
        .add_node("b", Inc)
        .add_edge("a", "b")
        .add_edge("b", "a")
        .set_entry("a")
        .build();

    let err = graph.invoke(GraphState::new(DemoState::default())).await.unwrap_err();
    assert!(matches!(err, GraphError::CycleDetected { node } if node == "a"));
}

#[tokio::test]
async fn step_budget_stops_loops_when_cycle_detection_is_off() {
    let graph = GraphBuilder::new()
        .with_config(ExecutionConfig {
            max_steps: Some(5),
            cycle_detection: false,
        })
        .add_node("a", Inc)
        .add_edge("a", "a")
        .set_entry("a")
        .build();

    let err = graph.invoke(GraphState::new(DemoState::default())).await.unwrap_err();
    assert!(matches!(err, GraphError::MaxStepsExceeded { max: 5, .. }));
}
