//! Minimax / Alpha-Beta Engine
//!
//! Depth-first evaluation of a [`GameTree`](crate::tree::GameTree) with
//! optional alpha-beta cutoffs. A run never mutates the tree: computed values,
//! entry windows and pruned edges are returned in a [`MinimaxOutcome`].

pub mod algorithm;
pub mod error;
pub mod frame;
pub mod outcome;

pub use algorithm::MinimaxEngine;
pub use error::MinimaxError;
pub use outcome::{MinimaxOutcome, NodeRecord};
