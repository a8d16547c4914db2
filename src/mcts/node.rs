//! Per-node MCTS statistics
//!
//! Kept apart from the tree so that a minimax run and an MCTS run over the
//! same [`GameTree`](crate::tree::GameTree) never share mutable state.

use crate::tree::NodeId;

/// Statistics of one node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStats {
    /// Number of iterations whose backpropagation passed through this node
    pub visits: u64,

    /// Number of those iterations whose rollout was a win (`wins <= visits`)
    pub wins: u64,

    /// Last UCB1 score computed for this node. Derived and recomputable
    /// from the counters; never read back by the search.
    pub ucb: f64,
}

impl Default for NodeStats {
    fn default() -> Self {
        Self {
            visits: 0,
            wins: 0,
            ucb: 0.0,
        }
    }
}

impl NodeStats {
    /// Returns the observed win rate of this node
    pub fn win_rate(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins as f64 / self.visits as f64
        }
    }
}

/// Statistics side table indexed by [`NodeId`]
#[derive(Debug, Clone, PartialEq)]
pub struct MctsStats {
    nodes: Vec<NodeStats>,
}

impl MctsStats {
    /// Zeroed statistics for a tree of `node_count` nodes
    pub fn new(node_count: usize) -> Self {
        Self {
            nodes: vec![NodeStats::default(); node_count],
        }
    }

    pub fn get(&self, node: NodeId) -> &NodeStats {
        &self.nodes[node.index()]
    }

    pub fn visits(&self, node: NodeId) -> u64 {
        self.nodes[node.index()].visits
    }

    pub fn wins(&self, node: NodeId) -> u64 {
        self.nodes[node.index()].wins
    }

    pub fn win_rate(&self, node: NodeId) -> f64 {
        self.nodes[node.index()].win_rate()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeStats)> {
        self.nodes.iter().enumerate().map(|(i, stats)| (NodeId(i), stats))
    }

    /// Counts one more visit and, in lockstep, a win if `win` is set.
    /// Returns the updated `(visits, wins)`.
    pub(crate) fn record_visit(&mut self, node: NodeId, win: bool) -> (u64, u64) {
        let stats = &mut self.nodes[node.index()];
        stats.visits += 1;
        if win {
            stats.wins += 1;
        }
        (stats.visits, stats.wins)
    }

    pub(crate) fn cache_ucb(&mut self, node: NodeId, ucb: f64) {
        self.nodes[node.index()].ucb = ucb;
    }

    /// Zeroes every counter
    pub fn reset(&mut self) {
        self.nodes.iter_mut().for_each(|stats| *stats = NodeStats::default());
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, node: NodeId, visits: u64, wins: u64) {
        let stats = &mut self.nodes[node.index()];
        stats.visits = visits;
        stats.wins = wins;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_zeroed() {
        let stats = MctsStats::new(3);
        for (_, node) in stats.iter() {
            assert_eq!(node.visits, 0);
            assert_eq!(node.wins, 0);
        }
    }

    #[test]
    fn test_record_visit_counts_wins_in_lockstep() {
        let mut stats = MctsStats::new(1);
        assert_eq!(stats.record_visit(NodeId(0), true), (1, 1));
        assert_eq!(stats.record_visit(NodeId(0), false), (2, 1));
        assert!((stats.win_rate(NodeId(0)) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_win_rate_of_unvisited_node() {
        assert_eq!(NodeStats::default().win_rate(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut stats = MctsStats::new(2);
        stats.record_visit(NodeId(1), true);
        stats.cache_ucb(NodeId(1), 2.5);
        stats.reset();
        assert_eq!(*stats.get(NodeId(1)), NodeStats::default());
    }
}
