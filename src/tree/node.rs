//! Node structures for the game tree arena

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node in its [`GameTree`](super::GameTree) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which player moves at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Max,
    Min,
}

impl NodeKind {
    /// Kind of a node at the given depth. The root (depth 0) is always `Max`.
    pub fn at_depth(depth: usize) -> Self {
        if depth % 2 == 0 {
            NodeKind::Max
        } else {
            NodeKind::Min
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Max => write!(f, "MAX"),
            NodeKind::Min => write!(f, "MIN"),
        }
    }
}

/// A decision node in the game tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Externally supplied id, unique within the tree
    pub(crate) id: String,

    /// Static payoff, present on leaves only
    pub(crate) static_value: Option<f64>,

    /// Ordered children; order drives tie-breaking and pruning ranges
    pub(crate) children: Vec<NodeId>,

    /// Parent index, `None` for the root
    pub(crate) parent: Option<NodeId>,

    /// Distance from the root
    pub(crate) depth: usize,
}

impl Node {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn static_value(&self) -> Option<f64> {
        self.static_value
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Derived from depth, never stored
    pub fn kind(&self) -> NodeKind {
        NodeKind::at_depth(self.depth)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_alternates_by_depth() {
        assert_eq!(NodeKind::at_depth(0), NodeKind::Max);
        assert_eq!(NodeKind::at_depth(1), NodeKind::Min);
        assert_eq!(NodeKind::at_depth(2), NodeKind::Max);
        assert_eq!(NodeKind::at_depth(7), NodeKind::Min);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(NodeKind::Max.to_string(), "MAX");
        assert_eq!(NodeKind::Min.to_string(), "MIN");
    }
}
