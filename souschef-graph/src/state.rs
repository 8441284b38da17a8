use serde::{de::DeserializeOwned, Serialize};

/// Marker for state types that flow through a graph. The bounds are what the
/// engine needs to move state between steps plus what boundary layers need to
/// get data in and out.
pub trait StateSchema:
    Serialize + DeserializeOwned + Clone + Default + Send + Sync + 'static
{
}

/// The state a node receives. Nodes see the whole state and hand back a
/// whole-state replacement; there is no field-level merging.
#[derive(Debug, Clone)]
pub struct GraphState<S: StateSchema> {
    pub data: S,
}

impl<S: StateSchema> GraphState<S> {
    pub fn new(data: S) -> Self {
        Self { data }
    }
}

/// A node's output: the replacement state the engine carries into the next
/// step.
#[derive(Debug, Clone)]
pub struct StateUpdate<S: StateSchema> {
    data: S,
}

impl<S: StateSchema> StateUpdate<S> {
    pub fn new(data: S) -> Self {
        Self { data }
    }

    pub(crate) fn into_state(self) -> GraphState<S> {
        GraphState { data: self.data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Demo {
        count: i32,
        note: String,
    }

    impl StateSchema for Demo {}

    #[test]
    fn update_replaces_the_whole_state() {
        let update = StateUpdate::new(Demo {
            count: 2,
            note: "replaced".to_string(),
        });
        let state = update.into_state();
        assert_eq!(state.data.count, 2);
        assert_eq!(state.data.note, "replaced");
    }
}
