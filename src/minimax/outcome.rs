//! Run-scoped results of a minimax evaluation

use crate::tree::{GameTree, NodeId};

/// What a run recorded for one entered node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRecord {
    /// Lower bound in effect when the node was entered
    pub alpha: f64,
    /// Upper bound in effect when the node was entered
    pub beta: f64,
    /// Resolved minimax value; `None` until the node is finished
    pub computed_value: Option<f64>,
    /// Child that produced the value (first strictly best), `None` for leaves
    pub best_child: Option<NodeId>,
}

/// Side table produced by one minimax run, indexed by [`NodeId`].
#[derive(Debug, Clone, PartialEq)]
pub struct MinimaxOutcome {
    start: NodeId,
    value: f64,
    records: Vec<Option<NodeRecord>>,
    pruned: Vec<bool>,
    pruned_edges: Vec<(NodeId, NodeId)>,
    visit_order: Vec<NodeId>,
}

impl MinimaxOutcome {
    pub(crate) fn new(node_count: usize, start: NodeId) -> Self {
        Self {
            start,
            value: f64::NAN,
            records: vec![None; node_count],
            pruned: vec![false; node_count],
            pruned_edges: Vec::new(),
            visit_order: Vec::new(),
        }
    }

    pub(crate) fn enter(&mut self, node: NodeId, alpha: f64, beta: f64) {
        self.records[node.index()] = Some(NodeRecord {
            alpha,
            beta,
            computed_value: None,
            best_child: None,
        });
        self.visit_order.push(node);
    }

    pub(crate) fn resolve(&mut self, node: NodeId, value: f64, best_child: Option<NodeId>) {
        if let Some(record) = self.records[node.index()].as_mut() {
            record.computed_value = Some(value);
            record.best_child = best_child;
        }
    }

    pub(crate) fn prune(&mut self, parent: NodeId, child: NodeId) {
        self.pruned[child.index()] = true;
        self.pruned_edges.push((parent, child));
    }

    pub(crate) fn finish(&mut self, value: f64) {
        self.value = value;
    }

    /// Node the evaluation started from (the root for a full run)
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Value of the start node
    pub fn root_value(&self) -> f64 {
        self.value
    }

    pub fn record(&self, node: NodeId) -> Option<&NodeRecord> {
        self.records.get(node.index()).and_then(Option::as_ref)
    }

    pub fn value(&self, node: NodeId) -> Option<f64> {
        self.record(node).and_then(|record| record.computed_value)
    }

    pub fn best_child(&self, node: NodeId) -> Option<NodeId> {
        self.record(node).and_then(|record| record.best_child)
    }

    /// True if the edge into this node was cut off
    pub fn is_pruned(&self, node: NodeId) -> bool {
        self.pruned.get(node.index()).copied().unwrap_or(false)
    }

    /// `(parent, child)` edges cut off, in the order they were pruned
    pub fn pruned_edges(&self) -> &[(NodeId, NodeId)] {
        &self.pruned_edges
    }

    /// Nodes in the order they were entered
    pub fn visit_order(&self) -> &[NodeId] {
        &self.visit_order
    }

    pub fn was_visited(&self, node: NodeId) -> bool {
        self.record(node).is_some()
    }

    /// Follows recorded best edges from the start node down to a leaf.
    pub fn principal_variation(&self) -> Vec<NodeId> {
        std::iter::successors(Some(self.start), |&node| self.best_child(node)).collect()
    }

    /// Principal variation as external ids.
    pub fn principal_variation_ids<'t>(&self, tree: &'t GameTree) -> Vec<&'t str> {
        self.principal_variation()
            .into_iter()
            .map(|node| tree[node].id())
            .collect()
    }
}
