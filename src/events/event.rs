use serde::Serialize;

/// A structured event emitted by a search engine.
///
/// Serialized as a JSON object tagged by `"event"`. Infinite bounds
/// (`alpha`/`beta` at the top of the tree, UCB of unvisited nodes) serialize
/// as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event")]
pub enum SearchEvent {
    /// Minimax entered a node with the given window
    NodeEntered { id: String, alpha: f64, beta: f64 },

    /// Minimax resolved the value of a node
    ValueComputed { id: String, value: f64 },

    /// A child was skipped because of a cutoff at its parent
    ChildPruned { parent_id: String, child_id: String },

    /// MCTS began a new iteration (1-based)
    IterationStarted { iteration: usize },

    /// Selection moved from one node to a child with the given UCB1 score
    SelectionStep { from_id: String, to_id: String, ucb: f64 },

    /// Expansion activated a previously unvisited child
    ExpansionChosen { parent_id: String, child_id: String },

    /// A rollout reached a leaf with this result
    SimulationResult { leaf_id: String, result: f64 },

    /// Backpropagation updated a node's statistics
    BackpropagationStep { id: String, visits: u64, wins: u64 },

    /// Final recommendation of an MCTS run
    BestChildChosen { id: String, win_rate: f64 },
}

impl SearchEvent {
    /// Short name of the event variant, as used in the serialized tag
    pub fn name(&self) -> &'static str {
        match self {
            SearchEvent::NodeEntered { .. } => "NodeEntered",
            SearchEvent::ValueComputed { .. } => "ValueComputed",
            SearchEvent::ChildPruned { .. } => "ChildPruned",
            SearchEvent::IterationStarted { .. } => "IterationStarted",
            SearchEvent::SelectionStep { .. } => "SelectionStep",
            SearchEvent::ExpansionChosen { .. } => "ExpansionChosen",
            SearchEvent::SimulationResult { .. } => "SimulationResult",
            SearchEvent::BackpropagationStep { .. } => "BackpropagationStep",
            SearchEvent::BestChildChosen { .. } => "BestChildChosen",
        }
    }
}
