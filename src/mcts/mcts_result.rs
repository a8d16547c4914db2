use crate::mcts::node::MctsStats;
use crate::tree::NodeId;

/// Best root child after a run
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub node: NodeId,
    pub id: String,
    /// `wins / visits`, reported as 0.0 for a child that was never visited
    pub win_rate: f64,
    pub visits: u64,
    pub wins: u64,
}

/// What one iteration did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playout {
    /// Node where selection stopped
    pub selected: NodeId,
    /// Node the rollout started from (and backpropagation too)
    pub expanded: NodeId,
    /// Leaf the rollout reached
    pub leaf: NodeId,
    /// Rollout result; only `1.0` counts as a win
    pub result: f64,
}

impl Playout {
    pub fn is_win(&self) -> bool {
        self.result == 1.0
    }
}

/// Outcome of an MCTS run
#[derive(Debug, Clone, PartialEq)]
pub struct MctsResult {
    /// `None` when the root is a leaf
    pub best: Option<Recommendation>,
    /// Iterations actually completed
    pub iterations: usize,
    /// True if the run stopped before the configured iteration count
    pub aborted: bool,
    /// Counters at the end of the run
    pub stats: MctsStats,
}

impl MctsResult {
    pub fn best_child_id(&self) -> Option<&str> {
        self.best.as_ref().map(|best| best.id.as_str())
    }

    pub fn win_rate(&self) -> Option<f64> {
        self.best.as_ref().map(|best| best.win_rate)
    }
}
