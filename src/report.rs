//! Plain-text rendering of a finished search
//!
//! One line per node, indented by depth, in preorder. Presentation only: the
//! reports read outcomes, they never feed anything back into a search.

use crate::mcts::MctsStats;
use crate::minimax::MinimaxOutcome;
use crate::tree::GameTree;
use std::fmt::Write;

fn bound(value: f64) -> String {
    if value == f64::INFINITY {
        "+inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{}", value)
    }
}

/// Renders the tree with minimax annotations.
///
/// ```text
/// R [MAX] = 3  (α=-inf, β=+inf)
///   A [MIN] = 3  (α=-inf, β=+inf)
/// ```
pub fn render_minimax(tree: &GameTree, outcome: &MinimaxOutcome) -> String {
    let mut out = String::new();

    for id in tree.preorder() {
        let node = &tree[id];
        let indent = "  ".repeat(node.depth());
        let _ = write!(out, "{}{} [{}]", indent, node.id(), node.kind());

        if outcome.is_pruned(id) {
            let _ = writeln!(out, " pruned");
            continue;
        }
        match outcome.record(id) {
            Some(record) => {
                match record.computed_value {
                    Some(value) => {
                        let _ = write!(out, " = {}", value);
                    }
                    None => {
                        let _ = write!(out, " = ?");
                    }
                }
                let _ = writeln!(out, "  (α={}, β={})", bound(record.alpha), bound(record.beta));
            }
            None => {
                let _ = writeln!(out, " not visited");
            }
        }
    }

    let path = outcome.principal_variation_ids(tree).join(" -> ");
    let _ = writeln!(out, "value: {}", outcome.root_value());
    let _ = writeln!(out, "principal variation: {}", path);
    out
}

/// Renders the tree with MCTS visit/win counters and the last cached UCB.
pub fn render_mcts(tree: &GameTree, stats: &MctsStats) -> String {
    let mut out = String::new();

    for id in tree.preorder() {
        let node = &tree[id];
        let node_stats = stats.get(id);
        let indent = "  ".repeat(node.depth());
        let _ = write!(
            out,
            "{}{} visits={} wins={} rate={:.2}",
            indent,
            node.id(),
            node_stats.visits,
            node_stats.wins,
            node_stats.win_rate()
        );
        if !node.is_root() && node_stats.visits > 0 {
            let _ = write!(out, " ucb={}", bound_ucb(node_stats.ucb));
        }
        let _ = writeln!(out);
    }
    out
}

fn bound_ucb(ucb: f64) -> String {
    if ucb.is_infinite() {
        bound(ucb)
    } else {
        format!("{:.3}", ucb)
    }
}
