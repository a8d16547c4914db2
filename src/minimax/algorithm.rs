//! Minimax evaluation with optional alpha-beta pruning
//!
//! # Example
//!
//! ```rust
//! use game_tree_search::events::EventLog;
//! use game_tree_search::minimax::MinimaxEngine;
//! use game_tree_search::tree::{GameTree, TreeSpec};
//!
//! let spec = TreeSpec::node("R", vec![
//!     TreeSpec::node("A", vec![TreeSpec::leaf("A1", 3.0), TreeSpec::leaf("A2", 5.0)]),
//!     TreeSpec::node("B", vec![TreeSpec::leaf("B1", 2.0), TreeSpec::leaf("B2", 9.0)]),
//! ]);
//! let tree = GameTree::from_spec(&spec).unwrap();
//!
//! let mut events = EventLog::new();
//! let outcome = MinimaxEngine::new(&tree, true).run(&mut events).unwrap();
//! assert_eq!(outcome.root_value(), 3.0);
//! assert!(outcome.is_pruned(tree.find("B2").unwrap()));
//! ```

use crate::config::SearchConfig;
use crate::events::{EventSink, SearchEvent};
use crate::minimax::error::MinimaxError;
use crate::minimax::frame::Frame;
use crate::minimax::outcome::MinimaxOutcome;
use crate::tree::{GameTree, NodeId, TreeFormatError};

/// Minimax engine over a borrowed tree.
///
/// The engine holds no mutable state; every run builds a fresh
/// [`MinimaxOutcome`], so runs can be repeated without any reset.
#[derive(Debug, Clone, Copy)]
pub struct MinimaxEngine<'t> {
    tree: &'t GameTree,
    pruning: bool,
}

impl<'t> MinimaxEngine<'t> {
    /// Creates an engine
    ///
    /// # Arguments
    /// * `tree` - The tree to evaluate
    /// * `pruning` - Enables alpha-beta cutoffs. When disabled the window is
    ///   fixed at `(-inf, +inf)` for the whole tree and nothing is pruned.
    pub fn new(tree: &'t GameTree, pruning: bool) -> Self {
        Self { tree, pruning }
    }

    pub fn from_config(tree: &'t GameTree, config: &SearchConfig) -> Self {
        Self::new(tree, config.pruning)
    }

    pub fn pruning(&self) -> bool {
        self.pruning
    }

    /// Evaluates the whole tree recursively.
    pub fn run(&self, sink: &mut dyn EventSink) -> Result<MinimaxOutcome, MinimaxError> {
        self.evaluate(self.tree.root(), f64::NEG_INFINITY, f64::INFINITY, sink)
    }

    /// Evaluates the whole tree with an explicit stack. Same outcome and
    /// same event stream as [`run`](Self::run), without recursion depth
    /// tied to tree height.
    pub fn run_iterative(&self, sink: &mut dyn EventSink) -> Result<MinimaxOutcome, MinimaxError> {
        self.evaluate_iterative(self.tree.root(), f64::NEG_INFINITY, f64::INFINITY, sink)
    }

    /// Evaluates the subtree under `node` with the window `(alpha, beta)`.
    ///
    /// The window must satisfy `alpha <= beta` with neither bound NaN. It is
    /// ignored when pruning is disabled.
    ///
    /// # Returns
    /// The outcome side table; [`MinimaxOutcome::root_value`] is the value of `node`.
    ///
    /// # Errors
    /// * [`MinimaxError::InvalidWindow`] for an inverted or NaN window
    /// * [`MinimaxError::TreeFormat`] if the tree was built leniently and has
    ///   a leaf without a static value. Checked once, before any node is entered.
    pub fn evaluate(
        &self,
        node: NodeId,
        alpha: f64,
        beta: f64,
        sink: &mut dyn EventSink,
    ) -> Result<MinimaxOutcome, MinimaxError> {
        let (alpha, beta) = self.initial_window(alpha, beta)?;

        let mut outcome = MinimaxOutcome::new(self.tree.len(), node);
        let value = self.descend(node, alpha, beta, &mut outcome, sink)?;
        outcome.finish(value);

        self.log_summary(&outcome);
        Ok(outcome)
    }

    /// Explicit-stack variant of [`evaluate`](Self::evaluate).
    pub fn evaluate_iterative(
        &self,
        node: NodeId,
        alpha: f64,
        beta: f64,
        sink: &mut dyn EventSink,
    ) -> Result<MinimaxOutcome, MinimaxError> {
        let (alpha, beta) = self.initial_window(alpha, beta)?;

        let mut outcome = MinimaxOutcome::new(self.tree.len(), node);
        let value = match self.enter(node, alpha, beta, &mut outcome, sink)? {
            Some(value) => value,
            None => self.drain(node, alpha, beta, &mut outcome, sink)?,
        };
        outcome.finish(value);

        self.log_summary(&outcome);
        Ok(outcome)
    }

    fn initial_window(&self, alpha: f64, beta: f64) -> Result<(f64, f64), MinimaxError> {
        self.tree.require_leaf_values()?;
        if !self.pruning {
            return Ok((f64::NEG_INFINITY, f64::INFINITY));
        }
        if alpha.is_nan() || beta.is_nan() || alpha > beta {
            return Err(MinimaxError::InvalidWindow { alpha, beta });
        }
        Ok((alpha, beta))
    }

    fn descend(
        &self,
        node: NodeId,
        alpha: f64,
        beta: f64,
        outcome: &mut MinimaxOutcome,
        sink: &mut dyn EventSink,
    ) -> Result<f64, MinimaxError> {
        if let Some(value) = self.enter(node, alpha, beta, outcome, sink)? {
            return Ok(value);
        }

        let children = self.tree.children(node);
        let mut frame = Frame::new(node, self.tree[node].kind(), alpha, beta);

        while let Some(child) = frame.next_child(children) {
            let (alpha, beta) = frame.window();
            let child_value = self.descend(child, alpha, beta, outcome, sink)?;
            if frame.absorb(child, child_value, self.pruning) {
                self.prune_remaining(&mut frame, children, outcome, sink);
            }
        }

        Ok(self.resolve(frame, outcome, sink))
    }

    // Iterative traversal below an already entered internal node. The start
    // node's frame sits outside the stack and is resolved last.
    fn drain(
        &self,
        node: NodeId,
        alpha: f64,
        beta: f64,
        outcome: &mut MinimaxOutcome,
        sink: &mut dyn EventSink,
    ) -> Result<f64, MinimaxError> {
        let mut start = Frame::new(node, self.tree[node].kind(), alpha, beta);
        let mut stack: Vec<Frame> = Vec::new();

        // Value handed up by the most recently finished child
        let mut carried: Option<f64> = None;

        loop {
            let frame = match stack.last_mut() {
                Some(frame) => frame,
                None => &mut start,
            };
            let children = self.tree.children(frame.node);

            if let Some(child_value) = carried.take() {
                let child = children[frame.next - 1];
                if frame.absorb(child, child_value, self.pruning) {
                    self.prune_remaining(frame, children, outcome, sink);
                }
            }

            match frame.next_child(children) {
                Some(child) => {
                    let (alpha, beta) = frame.window();
                    carried = self.enter(child, alpha, beta, outcome, sink)?;
                    if carried.is_none() {
                        stack.push(Frame::new(child, self.tree[child].kind(), alpha, beta));
                    }
                }
                None => match stack.pop() {
                    Some(done) => carried = Some(self.resolve(done, outcome, sink)),
                    None => return Ok(self.resolve(start, outcome, sink)),
                },
            }
        }
    }

    // Records the entry window. Leaves resolve immediately to their static
    // value; internal nodes return None and are resolved once their children
    // have been processed.
    fn enter(
        &self,
        node: NodeId,
        alpha: f64,
        beta: f64,
        outcome: &mut MinimaxOutcome,
        sink: &mut dyn EventSink,
    ) -> Result<Option<f64>, MinimaxError> {
        let current = &self.tree[node];
        outcome.enter(node, alpha, beta);
        if sink.enabled() {
            sink.emit(SearchEvent::NodeEntered {
                id: current.id().to_string(),
                alpha,
                beta,
            });
        }

        if !current.is_leaf() {
            return Ok(None);
        }

        let value = current
            .static_value()
            .ok_or_else(|| TreeFormatError::LeafWithoutValue(current.id().to_string()))?;
        outcome.resolve(node, value, None);
        if sink.enabled() {
            sink.emit(SearchEvent::ValueComputed {
                id: current.id().to_string(),
                value,
            });
        }
        Ok(Some(value))
    }

    fn resolve(&self, frame: Frame, outcome: &mut MinimaxOutcome, sink: &mut dyn EventSink) -> f64 {
        outcome.resolve(frame.node, frame.value, frame.best);
        if sink.enabled() {
            sink.emit(SearchEvent::ValueComputed {
                id: self.tree[frame.node].id().to_string(),
                value: frame.value,
            });
        }
        frame.value
    }

    fn prune_remaining(
        &self,
        frame: &mut Frame,
        children: &[NodeId],
        outcome: &mut MinimaxOutcome,
        sink: &mut dyn EventSink,
    ) {
        let skipped = frame.skip_remaining(children);
        log::debug!(
            "cutoff at {} {} (alpha={}, beta={}): pruning {} children",
            self.tree[frame.node].kind(),
            self.tree[frame.node].id(),
            frame.alpha,
            frame.beta,
            skipped.len()
        );

        for &child in skipped {
            outcome.prune(frame.node, child);
            if sink.enabled() {
                sink.emit(SearchEvent::ChildPruned {
                    parent_id: self.tree[frame.node].id().to_string(),
                    child_id: self.tree[child].id().to_string(),
                });
            }
        }
    }

    fn log_summary(&self, outcome: &MinimaxOutcome) {
        log::info!(
            "minimax{} finished at '{}': value {}, {} nodes entered, {} edges pruned",
            if self.pruning { " (alpha-beta)" } else { "" },
            self.tree[outcome.start()].id(),
            outcome.root_value(),
            outcome.visit_order().len(),
            outcome.pruned_edges().len()
        );
    }
}
