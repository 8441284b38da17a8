use serde::{Deserialize, Serialize};
use souschef_core::SousChefError;
use souschef_graph::{GraphBuilder, GraphNode, GraphState, StateSchema, StateUpdate, END, START};

#[derive(Clone, Default, Debug, Serialize, Deserialize, PartialEq)]
struct DemoState {
    count: i32,
    path: Vec<String>,
}

impl StateSchema for DemoState {}

struct Step(&'static str);

#[async_trait::async_trait]
impl GraphNode<DemoState> for Step {
    async fn run(
        &self,
        input: GraphState<DemoState>,
    ) -> Result<StateUpdate<DemoState>, SousChefError> {
        let mut data = input.data;
        data.count += 1;
        data.path.push(self.0.to_string());
        Ok(StateUpdate::new(data))
    }
}

#[tokio::test]
async fn graph_follows_default_edges() {
    let graph = GraphBuilder::new()
        .add_node("a", Step("a"))
        .add_node("b", Step("b"))
        .add_edge(START, "a")
        .add_edge("a", "b")
        .build();

    let out = graph.invoke(GraphState::new(DemoState::default())).await.unwrap();
    assert_eq!(out.data.count, 2);
    assert_eq!(out.data.path, vec!["a", "b"]);
}

#[tokio::test]
async fn graph_conditional_routes_by_state() {
    let graph = GraphBuilder::new()
        .add_node("inc", Step("inc"))
        .add_node("low", Step("low"))
        .add_node("high", Step("high"))
        .add_conditional_edge("inc", |state: &GraphState<DemoState>| {
            if state.data.count > 1 {
                "high".to_string()
            } else {
                "low".to_string()
            }
        })
        .set_entry("inc")
        .build();

    let out = graph
        .invoke(GraphState::new(DemoState {
            count: 1,
            path: Vec::new(),
        }))
        .await
        .unwrap();
    assert_eq!(out.data.path, vec!["inc", "high"]);
}

#[tokio::test]
async fn router_can_terminate_with_end() {
    let graph = GraphBuilder::new()
        .add_node("only", Step("only"))
        .add_conditional_edge("only", |_: &GraphState<DemoState>| END.to_string())
        .set_entry("only")
        .build();

    let out = graph.invoke(GraphState::new(DemoState::default())).await.unwrap();
    assert_eq!(out.data.path, vec!["only"]);
}

#[tokio::test]
async fn node_without_outgoing_edge_is_terminal() {
    let graph = GraphBuilder::new()
        .add_node("solo", Step("solo"))
        .set_entry("solo")
        .build();

    let out = graph.invoke(GraphState::new(DemoState::default())).await.unwrap();
    assert_eq!(out.data.count, 1);
}
