//! Flat node arena and the builder that fills it from a [`TreeSpec`].

use crate::tree::error::TreeFormatError;
use crate::tree::node::{Node, NodeId};
use crate::tree::spec::{TreeDocument, TreeSpec};
use std::collections::{HashMap, VecDeque};
use std::ops::Index;
use std::path::Path;

/// Limits applied while building a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Deepest allowed node depth (root is depth 0)
    pub max_depth: usize,

    /// Accept leaves without a static value. Such trees can be searched with
    /// MCTS (rollouts fall back to a random 0/1 payoff) but not with minimax.
    pub allow_valueless_leaves: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            max_depth: 1024,
            allow_valueless_leaves: false,
        }
    }
}

impl BuildOptions {
    pub fn lenient() -> Self {
        Self {
            allow_valueless_leaves: true,
            ..Self::default()
        }
    }
}

/// Immutable-shape game tree.
///
/// The root is always the first node of the arena. Nodes are stored in
/// breadth-first order, children keep the order of the specification.
#[derive(Debug, Clone, PartialEq)]
pub struct GameTree {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
    valueless_leaf: Option<NodeId>,
}

impl GameTree {
    /// Builds a tree with the default [`BuildOptions`].
    pub fn from_spec(spec: &TreeSpec) -> Result<Self, TreeFormatError> {
        Self::build(spec, BuildOptions::default())
    }

    /// Builds a tree, assigning depth (and therefore kind) top-down.
    ///
    /// # Errors
    /// Returns a [`TreeFormatError`] for a missing or duplicated id, an
    /// internal node with a value, a leaf without a value (unless allowed),
    /// a non-finite value, or a node deeper than `options.max_depth`.
    pub fn build(spec: &TreeSpec, options: BuildOptions) -> Result<Self, TreeFormatError> {
        let mut tree = GameTree {
            nodes: Vec::new(),
            index: HashMap::new(),
            valueless_leaf: None,
        };

        let mut queue: VecDeque<(&TreeSpec, Option<NodeId>, usize, String)> = VecDeque::new();
        queue.push_back((spec, None, 0, "root".to_string()));

        while let Some((spec, parent, depth, path)) = queue.pop_front() {
            let id = match &spec.id {
                Some(id) => id.clone(),
                None => return Err(TreeFormatError::MissingId { path }),
            };

            if depth > options.max_depth {
                return Err(TreeFormatError::TooDeep {
                    id,
                    depth,
                    limit: options.max_depth,
                });
            }
            if tree.index.contains_key(&id) {
                return Err(TreeFormatError::DuplicateId(id));
            }

            match (spec.value, spec.children.is_empty()) {
                (Some(_), false) => return Err(TreeFormatError::ValueOnInternalNode(id)),
                (None, true) if !options.allow_valueless_leaves => {
                    return Err(TreeFormatError::LeafWithoutValue(id));
                }
                (Some(value), true) if !value.is_finite() => {
                    return Err(TreeFormatError::NonFiniteValue { id, value });
                }
                _ => {}
            }

            let node_id = NodeId(tree.nodes.len());
            if spec.value.is_none() && spec.children.is_empty() && tree.valueless_leaf.is_none() {
                tree.valueless_leaf = Some(node_id);
            }

            tree.nodes.push(Node {
                id: id.clone(),
                static_value: spec.value,
                children: Vec::with_capacity(spec.children.len()),
                parent,
                depth,
            });
            tree.index.insert(id, node_id);
            if let Some(parent) = parent {
                tree.nodes[parent.0].children.push(node_id);
            }

            for (i, child) in spec.children.iter().enumerate() {
                queue.push_back((child, Some(node_id), depth + 1, format!("{path}.children[{i}]")));
            }
        }

        log::debug!(
            "built game tree: {} nodes, {} leaves, height {}",
            tree.len(),
            tree.leaves().count(),
            tree.height()
        );

        Ok(tree)
    }

    /// Parses a tree document (bare or `{ "root": ... }`) from JSON text.
    pub fn from_json_str(json: &str, options: BuildOptions) -> crate::Result<Self> {
        let document = TreeDocument::from_json_str(json)?;
        Ok(Self::build(&document.into_root(), options)?)
    }

    /// Loads and builds a tree from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P, options: BuildOptions) -> crate::Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        log::info!("loading game tree from {}", path.as_ref().display());
        Self::from_json_str(&json, options)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a built tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Looks a node up by its external id.
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// All nodes in arena (breadth-first) order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter().filter(|(_, node)| node.is_leaf()).map(|(id, _)| id)
    }

    /// Depth-first preorder, children visited left to right.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    /// The node itself followed by each ancestor up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&current| self.parent(current))
    }

    /// Depth of the deepest node
    pub fn height(&self) -> usize {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    /// Fails if any leaf lacks a static value. Only trees built with
    /// [`BuildOptions::allow_valueless_leaves`] can fail here; the leaf is
    /// recorded at build time so this is a constant-time check.
    pub fn require_leaf_values(&self) -> Result<(), TreeFormatError> {
        match self.valueless_leaf {
            Some(leaf) => Err(TreeFormatError::LeafWithoutValue(self.node(leaf).id.clone())),
            None => Ok(()),
        }
    }
}

impl Index<NodeId> for GameTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.node(id)
    }
}
