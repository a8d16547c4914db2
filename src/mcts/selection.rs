//! Selection strategy for MCTS
//!
//! UCB1 scoring and the best-child routine shared by the selection phase and
//! the final recommendation (the latter with an exploration weight of 0).

use crate::events::{EventSink, SearchEvent};
use crate::mcts::node::MctsStats;
use crate::tree::{GameTree, NodeId};
use rand::prelude::*;
use rand::rngs::StdRng;

/// UCB1 score of a node
///
/// Formula: wins / visits + c × sqrt(ln(N_parent) / visits)
///
/// # Arguments
/// * `tree` - The tree the node belongs to
/// * `stats` - Current visit/win counters
/// * `node` - The node to score
/// * `exploration_weight` - Exploration constant `c` (1.4 by default)
///
/// # Returns
/// * `+inf` for an unvisited node
/// * the bare win rate for the root (no exploration term at the root)
/// * `+inf` exploration when the parent has no visits yet
pub fn ucb1(tree: &GameTree, stats: &MctsStats, node: NodeId, exploration_weight: f64) -> f64 {
    let visits = stats.visits(node);
    if visits == 0 {
        return f64::INFINITY;
    }

    let exploitation = stats.wins(node) as f64 / visits as f64;
    let exploration = match tree.parent(node) {
        // Only the root has no parent; it is scored greedily
        None => 0.0,
        Some(parent) => match stats.visits(parent) {
            0 => f64::INFINITY,
            parent_visits => {
                exploration_weight * ((parent_visits as f64).ln() / visits as f64).sqrt()
            }
        },
    };

    exploitation + exploration
}

/// Selects the child with the highest UCB1 score
///
/// Ties among maximal children (including several unvisited children, all
/// scoring `+inf`) are broken uniformly at random. Every scored child gets
/// its UCB cached in `stats`.
///
/// # Returns
/// The chosen child and its score, or `None` if `node` is a leaf
pub fn best_child(
    tree: &GameTree,
    stats: &mut MctsStats,
    node: NodeId,
    exploration_weight: f64,
    rng: &mut StdRng,
) -> Option<(NodeId, f64)> {
    let mut best_score = f64::NEG_INFINITY;
    let mut best_children: Vec<NodeId> = Vec::new();

    for &child in tree.children(node) {
        let score = ucb1(tree, stats, child, exploration_weight);
        stats.cache_ucb(child, score);

        if score > best_score {
            best_score = score;
            best_children.clear();
            best_children.push(child);
        } else if score == best_score {
            best_children.push(child);
        }
    }

    best_children.choose(rng).map(|&child| (child, best_score))
}

/// Walks down from `start` while the current node has children and every
/// one of them has been visited, moving to the UCB1-best child each step.
///
/// Stops at the first node that is a leaf or has at least one unvisited
/// child; that node is returned.
pub fn select(
    tree: &GameTree,
    stats: &mut MctsStats,
    start: NodeId,
    exploration_weight: f64,
    rng: &mut StdRng,
    sink: &mut dyn EventSink,
) -> NodeId {
    let mut current = start;

    loop {
        let children = tree.children(current);
        if children.is_empty() || children.iter().any(|&child| stats.visits(child) == 0) {
            return current;
        }

        let Some((next, ucb)) = best_child(tree, stats, current, exploration_weight, rng) else {
            return current;
        };

        log::trace!(
            "selection: {} -> {} (ucb {:.3}, visits {}, wins {})",
            tree[current].id(),
            tree[next].id(),
            ucb,
            stats.visits(next),
            stats.wins(next)
        );
        if sink.enabled() {
            sink.emit(SearchEvent::SelectionStep {
                from_id: tree[current].id().to_string(),
                to_id: tree[next].id().to_string(),
                ucb,
            });
        }
        current = next;
    }
}
