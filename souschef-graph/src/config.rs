#[derive(Clone, Debug)]
pub struct ExecutionConfig {
    pub max_steps: Option<usize>,
    /// When set, a node executing twice in one run is an error. The cooking
    /// workflow is a DAG per request, so this stays on.
    pub cycle_detection: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            max_steps: Some(50),
            cycle_detection: true,
        }
    }
}
