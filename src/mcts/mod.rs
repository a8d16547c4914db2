//! Monte Carlo Tree Search
//!
//! UCB1 selection, random-child expansion, uniform random rollouts and
//! backpropagation over a pre-built [`GameTree`](crate::tree::GameTree).
//! The tree is never reshaped: "expansion" activates a pre-existing child
//! whose visit count is still zero.
//!
//! Visit and win counters live in a [`MctsStats`] side table owned by the
//! engine, zeroed for every new engine.

pub mod algorithm;
pub mod mcts_result;
pub mod node;
pub mod selection;

pub use algorithm::MctsEngine;
pub use mcts_result::{MctsResult, Playout, Recommendation};
pub use node::{MctsStats, NodeStats};
pub use selection::{best_child, select, ucb1};
