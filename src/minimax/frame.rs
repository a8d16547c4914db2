//! Bookkeeping for one internal node while its children are evaluated.
//!
//! Shared by the recursive and the explicit-stack traversals so both apply
//! exactly the same comparison, bound update and cutoff test.

use crate::tree::{NodeId, NodeKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Frame {
    pub node: NodeId,
    pub kind: NodeKind,
    pub alpha: f64,
    pub beta: f64,
    pub value: f64,
    pub best: Option<NodeId>,
    /// Index of the next child to evaluate
    pub next: usize,
}

impl Frame {
    pub fn new(node: NodeId, kind: NodeKind, alpha: f64, beta: f64) -> Self {
        let value = match kind {
            NodeKind::Max => f64::NEG_INFINITY,
            NodeKind::Min => f64::INFINITY,
        };
        Self {
            node,
            kind,
            alpha,
            beta,
            value,
            best: None,
            next: 0,
        }
    }

    /// Window handed to the next child
    pub fn window(&self) -> (f64, f64) {
        (self.alpha, self.beta)
    }

    /// Takes the next child in order, if any remain.
    pub fn next_child(&mut self, children: &[NodeId]) -> Option<NodeId> {
        let child = children.get(self.next).copied();
        if child.is_some() {
            self.next += 1;
        }
        child
    }

    /// Folds a child's value into this node. Returns true on a cutoff.
    ///
    /// Only a strictly better value replaces the current best, so the
    /// leftmost child wins ties. Bounds only move when pruning is enabled;
    /// otherwise the window stays fixed at whatever the node was entered with.
    pub fn absorb(&mut self, child: NodeId, child_value: f64, pruning: bool) -> bool {
        let better = match self.kind {
            NodeKind::Max => child_value > self.value,
            NodeKind::Min => child_value < self.value,
        };
        if better {
            self.value = child_value;
            self.best = Some(child);
        }

        if !pruning {
            return false;
        }
        match self.kind {
            NodeKind::Max => self.alpha = self.alpha.max(self.value),
            NodeKind::Min => self.beta = self.beta.min(self.value),
        }
        self.beta <= self.alpha
    }

    /// Children that will never be evaluated after a cutoff.
    pub fn skip_remaining<'c>(&mut self, children: &'c [NodeId]) -> &'c [NodeId] {
        let rest = &children[self.next.min(children.len())..];
        self.next = children.len();
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<NodeId> {
        (1..=n).map(NodeId).collect()
    }

    #[test]
    fn test_max_keeps_leftmost_on_tie() {
        let children = ids(2);
        let mut frame = Frame::new(NodeId(0), NodeKind::Max, f64::NEG_INFINITY, f64::INFINITY);

        frame.absorb(children[0], 4.0, false);
        frame.absorb(children[1], 4.0, false);

        assert_eq!(frame.value, 4.0);
        assert_eq!(frame.best, Some(children[0]));
    }

    #[test]
    fn test_min_takes_strictly_lower() {
        let children = ids(3);
        let mut frame = Frame::new(NodeId(0), NodeKind::Min, f64::NEG_INFINITY, f64::INFINITY);

        frame.absorb(children[0], 5.0, false);
        frame.absorb(children[1], 2.0, false);
        frame.absorb(children[2], 2.0, false);

        assert_eq!(frame.value, 2.0);
        assert_eq!(frame.best, Some(children[1]));
    }

    #[test]
    fn test_window_fixed_without_pruning() {
        let mut frame = Frame::new(NodeId(0), NodeKind::Max, f64::NEG_INFINITY, f64::INFINITY);
        assert!(!frame.absorb(NodeId(1), 7.0, false));
        assert_eq!(frame.window(), (f64::NEG_INFINITY, f64::INFINITY));
    }

    #[test]
    fn test_min_cutoff_against_alpha() {
        let mut frame = Frame::new(NodeId(0), NodeKind::Min, 3.0, f64::INFINITY);
        assert!(frame.absorb(NodeId(1), 2.0, true));
        assert_eq!(frame.beta, 2.0);
    }

    #[test]
    fn test_max_cutoff_on_equal_bounds() {
        let mut frame = Frame::new(NodeId(0), NodeKind::Max, f64::NEG_INFINITY, 4.0);
        assert!(frame.absorb(NodeId(1), 4.0, true));
    }

    #[test]
    fn test_skip_remaining() {
        let children = ids(4);
        let mut frame = Frame::new(NodeId(0), NodeKind::Max, f64::NEG_INFINITY, f64::INFINITY);
        frame.next_child(&children);

        assert_eq!(frame.skip_remaining(&children), &children[1..]);
        assert_eq!(frame.next_child(&children), None);
    }
}
