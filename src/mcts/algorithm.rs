//! MCTS run loop
//!
//! Each iteration runs four phases to completion before the next starts:
//! 1. Selection: descend by UCB1 while every child has been visited
//! 2. Expansion: activate a random unvisited child, if any
//! 3. Simulation: random playout down to a leaf
//! 4. Backpropagation: update visits/wins from the expansion node to the root
//!
//! # Example
//!
//! ```rust
//! use game_tree_search::events::NullSink;
//! use game_tree_search::mcts::MctsEngine;
//! use game_tree_search::tree::{GameTree, TreeSpec};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let spec = TreeSpec::node("R", vec![TreeSpec::leaf("win", 1.0), TreeSpec::leaf("loss", 0.0)]);
//! let tree = GameTree::from_spec(&spec).unwrap();
//!
//! let mut engine = MctsEngine::new(&tree, 20, 1.4).unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//! let result = engine.run(&mut rng, &mut NullSink);
//! assert_eq!(result.best_child_id(), Some("win"));
//! ```

use crate::config::{validate_exploration_weight, ConfigError, SearchConfig};
use crate::events::{EventSink, SearchEvent};
use crate::mcts::mcts_result::{MctsResult, Playout, Recommendation};
use crate::mcts::node::MctsStats;
use crate::mcts::selection::{best_child, select};
use crate::tree::{GameTree, NodeId};
use rand::prelude::*;
use rand::rngs::StdRng;

/// MCTS engine over a borrowed tree
#[derive(Debug, Clone)]
pub struct MctsEngine<'t> {
    tree: &'t GameTree,
    iterations: usize,
    exploration_weight: f64,
    stats: MctsStats,
    completed: usize,
}

impl<'t> MctsEngine<'t> {
    /// Creates an engine with zeroed statistics
    ///
    /// # Arguments
    /// * `tree` - The tree to search
    /// * `iterations` - Number of iterations for [`run`](Self::run), at least 1
    /// * `exploration_weight` - UCB1 exploration constant, finite and non-negative
    ///
    /// # Errors
    /// [`ConfigError`] if either parameter is out of range
    pub fn new(tree: &'t GameTree, iterations: usize, exploration_weight: f64) -> Result<Self, ConfigError> {
        if iterations < 1 {
            return Err(ConfigError::IterationsBelowOne(0));
        }
        validate_exploration_weight(exploration_weight)?;

        Ok(Self {
            tree,
            iterations,
            exploration_weight,
            stats: MctsStats::new(tree.len()),
            completed: 0,
        })
    }

    pub fn from_config(tree: &'t GameTree, config: &SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::new(tree, config.iterations()?, config.exploration_weight)
    }

    pub fn stats(&self) -> &MctsStats {
        &self.stats
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn exploration_weight(&self) -> f64 {
        self.exploration_weight
    }

    /// Iterations completed since creation or the last reset
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Zeroes all statistics
    pub fn reset(&mut self) {
        self.stats.reset();
        self.completed = 0;
    }

    /// Runs the configured number of iterations from zeroed statistics and
    /// recommends a root child.
    pub fn run(&mut self, rng: &mut StdRng, sink: &mut dyn EventSink) -> MctsResult {
        self.run_while(rng, sink, |_, _| true)
    }

    /// Like [`run`](Self::run), but consults `keep_going` before every
    /// iteration with the number of iterations done so far and the current
    /// statistics. Returning false stops the run; an iteration is never
    /// interrupted once started.
    ///
    /// Statistics left by an earlier run or by manual [`iterate`](Self::iterate)
    /// calls are cleared first.
    pub fn run_while<F>(&mut self, rng: &mut StdRng, sink: &mut dyn EventSink, mut keep_going: F) -> MctsResult
    where
        F: FnMut(usize, &MctsStats) -> bool,
    {
        self.reset();
        let mut done = 0;
        let mut aborted = false;

        while done < self.iterations {
            if !keep_going(done, &self.stats) {
                log::info!("MCTS stopped early after {}/{} iterations", done, self.iterations);
                aborted = true;
                break;
            }
            self.iterate(rng, sink);
            done += 1;
        }

        let best = self.recommend(rng);
        match &best {
            Some(best) => {
                log::info!(
                    "MCTS finished {} iterations: best move {} (win rate {:.2}, {} visits)",
                    done,
                    best.id,
                    best.win_rate,
                    best.visits
                );
                if sink.enabled() {
                    sink.emit(SearchEvent::BestChildChosen {
                        id: best.id.clone(),
                        win_rate: best.win_rate,
                    });
                }
            }
            None => log::info!("MCTS finished {} iterations: root is a leaf, no move to recommend", done),
        }

        MctsResult {
            best,
            iterations: done,
            aborted,
            stats: self.stats.clone(),
        }
    }

    /// Performs one full iteration
    pub fn iterate(&mut self, rng: &mut StdRng, sink: &mut dyn EventSink) -> Playout {
        self.completed += 1;
        if sink.enabled() {
            sink.emit(SearchEvent::IterationStarted {
                iteration: self.completed,
            });
        }

        let selected = select(
            self.tree,
            &mut self.stats,
            self.tree.root(),
            self.exploration_weight,
            rng,
            sink,
        );
        let expanded = self.expand(selected, rng, sink);
        let (leaf, result) = self.simulate(expanded, rng, sink);
        self.backpropagate(expanded, result, sink);

        log::debug!(
            "iteration {}: selected {}, expanded {}, rollout {} -> {}",
            self.completed,
            self.tree[selected].id(),
            self.tree[expanded].id(),
            self.tree[leaf].id(),
            result
        );

        Playout {
            selected,
            expanded,
            leaf,
            result,
        }
    }

    /// Picks a random unvisited child of `node`, or `node` itself when it is
    /// a leaf or all its children have been visited.
    pub fn expand(&self, node: NodeId, rng: &mut StdRng, sink: &mut dyn EventSink) -> NodeId {
        let unvisited: Vec<NodeId> = self
            .tree
            .children(node)
            .iter()
            .copied()
            .filter(|&child| self.stats.visits(child) == 0)
            .collect();

        match unvisited.choose(rng) {
            Some(&child) => {
                if sink.enabled() {
                    sink.emit(SearchEvent::ExpansionChosen {
                        parent_id: self.tree[node].id().to_string(),
                        child_id: self.tree[child].id().to_string(),
                    });
                }
                child
            }
            None => node,
        }
    }

    /// Random playout from `node` to a leaf, ignoring UCB1.
    ///
    /// # Returns
    /// The leaf reached and its static value. A leaf without a value (only
    /// possible in leniently built trees) yields a uniform random 0 or 1.
    pub fn simulate(&self, node: NodeId, rng: &mut StdRng, sink: &mut dyn EventSink) -> (NodeId, f64) {
        let mut current = node;
        while let Some(&next) = self.tree.children(current).choose(rng) {
            current = next;
        }

        let leaf = &self.tree[current];
        let result = match leaf.static_value() {
            Some(value) => value,
            None => {
                let fallback = f64::from(rng.random_range(0..=1u8));
                log::warn!("leaf '{}' has no value, rollout falls back to random result {}", leaf.id(), fallback);
                fallback
            }
        };

        if sink.enabled() {
            sink.emit(SearchEvent::SimulationResult {
                leaf_id: leaf.id().to_string(),
                result,
            });
        }
        (current, result)
    }

    /// Adds one visit (and one win iff `result == 1`) to `node` and each of
    /// its ancestors, bottom-up.
    pub fn backpropagate(&mut self, node: NodeId, result: f64, sink: &mut dyn EventSink) {
        let win = result == 1.0;
        for current in self.tree.ancestors(node) {
            let (visits, wins) = self.stats.record_visit(current, win);
            if sink.enabled() {
                sink.emit(SearchEvent::BackpropagationStep {
                    id: self.tree[current].id().to_string(),
                    visits,
                    wins,
                });
            }
        }
    }

    /// Best root child by win rate (UCB1 with exploration weight 0), ties
    /// broken at random. An unvisited child scores `+inf` and wins outright.
    pub fn recommend(&mut self, rng: &mut StdRng) -> Option<Recommendation> {
        let root = self.tree.root();
        let (node, _) = best_child(self.tree, &mut self.stats, root, 0.0, rng)?;
        let stats = *self.stats.get(node);

        if stats.visits == 0 {
            log::warn!(
                "recommended child '{}' was never visited; run more iterations",
                self.tree[node].id()
            );
        }

        Some(Recommendation {
            node,
            id: self.tree[node].id().to_string(),
            win_rate: stats.win_rate(),
            visits: stats.visits,
            wins: stats.wins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventLog, NullSink};
    use crate::mcts::selection::ucb1;
    use crate::tree::{BuildOptions, TreeSpec};

    fn win_loss_tree() -> GameTree {
        GameTree::from_spec(&TreeSpec::node(
            "R",
            vec![TreeSpec::leaf("win", 1.0), TreeSpec::leaf("loss", 0.0)],
        ))
        .unwrap()
    }

    fn two_ply_tree() -> GameTree {
        GameTree::from_spec(&TreeSpec::node(
            "R",
            vec![
                TreeSpec::node("A", vec![TreeSpec::leaf("A1", 1.0), TreeSpec::leaf("A2", 1.0)]),
                TreeSpec::node("B", vec![TreeSpec::leaf("B1", 0.0), TreeSpec::leaf("B2", 1.0)]),
                TreeSpec::node("C", vec![TreeSpec::leaf("C1", 0.0), TreeSpec::leaf("C2", 0.0)]),
            ],
        ))
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let tree = win_loss_tree();
        assert_eq!(
            MctsEngine::new(&tree, 0, 1.4).unwrap_err(),
            ConfigError::IterationsBelowOne(0)
        );
        assert_eq!(
            MctsEngine::new(&tree, 5, -1.0).unwrap_err(),
            ConfigError::NegativeExplorationWeight(-1.0)
        );
    }

    #[test]
    fn test_from_config() {
        let tree = win_loss_tree();
        let engine = MctsEngine::from_config(&tree, &SearchConfig::default()).unwrap();
        assert_eq!(engine.iterations(), 10);
        assert_eq!(engine.exploration_weight(), 1.4);

        let bad = SearchConfig {
            mcts_iterations: 0,
            ..SearchConfig::default()
        };
        assert!(MctsEngine::from_config(&tree, &bad).is_err());
    }

    #[test]
    fn test_first_iterations_expand_each_root_child() {
        let tree = win_loss_tree();
        let mut engine = MctsEngine::new(&tree, 10, 1.4).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let first = engine.iterate(&mut rng, &mut NullSink);
        let second = engine.iterate(&mut rng, &mut NullSink);

        assert_eq!(first.selected, tree.root());
        assert_eq!(second.selected, tree.root());
        assert_ne!(first.expanded, second.expanded);
        assert_eq!(engine.stats().visits(tree.root()), 2);
        assert_eq!(engine.stats().wins(tree.root()), 1);
    }

    #[test]
    fn test_recommends_winning_child() {
        let tree = win_loss_tree();
        let mut engine = MctsEngine::new(&tree, 10, 1.4).unwrap();
        let mut rng = StdRng::seed_from_u64(99);

        let result = engine.run(&mut rng, &mut NullSink);

        assert_eq!(result.best_child_id(), Some("win"));
        assert_eq!(result.win_rate(), Some(1.0));
        assert_eq!(result.iterations, 10);
        assert!(!result.aborted);
        assert_eq!(result.stats.visits(tree.root()), 10);
    }

    #[test]
    fn test_visits_monotonic_along_backprop_path() {
        let tree = two_ply_tree();
        let mut engine = MctsEngine::new(&tree, 50, 1.4).unwrap();
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..50 {
            let before = engine.stats().clone();
            let playout = engine.iterate(&mut rng, &mut NullSink);
            let path: Vec<NodeId> = tree.ancestors(playout.expanded).collect();

            for (node, after) in engine.stats().iter() {
                let prior = before.get(node);
                let expected = u64::from(path.contains(&node));
                assert_eq!(after.visits, prior.visits + expected);
                assert!(after.wins <= after.visits);
                if after.visits == 0 {
                    assert_eq!(after.wins, 0);
                }
            }
        }
    }

    #[test]
    fn test_expansion_returns_node_when_all_children_visited() {
        let tree = win_loss_tree();
        let mut engine = MctsEngine::new(&tree, 10, 1.4).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        engine.iterate(&mut rng, &mut NullSink);
        engine.iterate(&mut rng, &mut NullSink);

        let mut events = EventLog::new();
        assert_eq!(engine.expand(tree.root(), &mut rng, &mut events), tree.root());
        assert!(events.is_empty());

        let win = tree.find("win").unwrap();
        assert_eq!(engine.expand(win, &mut rng, &mut events), win);
    }

    #[test]
    fn test_simulation_from_leaf_returns_its_value() {
        let tree = win_loss_tree();
        let engine = MctsEngine::new(&tree, 1, 1.4).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let loss = tree.find("loss").unwrap();

        assert_eq!(engine.simulate(loss, &mut rng, &mut NullSink), (loss, 0.0));
    }

    #[test]
    fn test_simulation_fallback_for_valueless_leaf() {
        let spec = TreeSpec::node("R", vec![TreeSpec::node("E", vec![])]);
        let tree = GameTree::build(&spec, BuildOptions::lenient()).unwrap();
        let engine = MctsEngine::new(&tree, 1, 1.4).unwrap();

        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (leaf, result) = engine.simulate(tree.root(), &mut rng, &mut NullSink);
            assert_eq!(leaf, tree.find("E").unwrap());
            assert!(result == 0.0 || result == 1.0);
        }
    }

    #[test]
    fn test_non_unit_payoff_is_a_loss() {
        let tree = GameTree::from_spec(&TreeSpec::node("R", vec![TreeSpec::leaf("big", 5.0)])).unwrap();
        let mut engine = MctsEngine::new(&tree, 3, 1.4).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        let result = engine.run(&mut rng, &mut NullSink);

        assert_eq!(result.best_child_id(), Some("big"));
        assert_eq!(result.stats.wins(tree.root()), 0);
        assert_eq!(result.stats.visits(tree.root()), 3);
    }

    #[test]
    fn test_same_seed_same_run() {
        let tree = two_ply_tree();
        let run = |seed: u64| {
            let mut engine = MctsEngine::new(&tree, 40, 1.4).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut events = EventLog::new();
            let result = engine.run(&mut rng, &mut events);
            (result, events)
        };

        let (first, first_events) = run(17);
        let (second, second_events) = run(17);
        assert_eq!(first, second);
        assert_eq!(first_events, second_events);
    }

    #[test]
    fn test_run_while_aborts_between_iterations() {
        let tree = two_ply_tree();
        let mut engine = MctsEngine::new(&tree, 100, 1.4).unwrap();
        let mut rng = StdRng::seed_from_u64(6);

        let result = engine.run_while(&mut rng, &mut NullSink, |done, _| done < 7);

        assert!(result.aborted);
        assert_eq!(result.iterations, 7);
        assert_eq!(result.stats.visits(tree.root()), 7);
    }

    #[test]
    fn test_leaf_root_has_no_recommendation() {
        let tree = GameTree::from_spec(&TreeSpec::leaf("only", 1.0)).unwrap();
        let mut engine = MctsEngine::new(&tree, 4, 1.4).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let result = engine.run(&mut rng, &mut NullSink);

        assert_eq!(result.best, None);
        assert_eq!(result.stats.visits(tree.root()), 4);
        assert_eq!(result.stats.wins(tree.root()), 4);
    }

    #[test]
    fn test_event_order_of_one_iteration() {
        let tree = win_loss_tree();
        let mut engine = MctsEngine::new(&tree, 1, 1.4).unwrap();
        let mut rng = StdRng::seed_from_u64(12);
        let mut events = EventLog::new();
        engine.run(&mut rng, &mut events);

        let names: Vec<&str> = events.events().iter().map(SearchEvent::name).collect();
        assert_eq!(
            names,
            vec![
                "IterationStarted",
                "ExpansionChosen",
                "SimulationResult",
                "BackpropagationStep",
                "BackpropagationStep",
                "BestChildChosen",
            ]
        );
    }

    #[test]
    fn test_second_run_starts_from_zero() {
        let tree = win_loss_tree();
        let mut engine = MctsEngine::new(&tree, 10, 1.4).unwrap();
        let mut rng = StdRng::seed_from_u64(21);

        let first = engine.run(&mut rng, &mut NullSink);
        let mut events = EventLog::new();
        let second = engine.run(&mut rng, &mut events);

        for result in [&first, &second] {
            assert_eq!(result.iterations, 10);
            assert_eq!(result.stats.visits(tree.root()), 10);
        }
        assert_eq!(engine.completed(), 10);
        assert_eq!(events.events()[0], SearchEvent::IterationStarted { iteration: 1 });
        assert_eq!(events.count("IterationStarted"), 10);
    }

    #[test]
    fn test_run_discards_manual_iterations() {
        let tree = two_ply_tree();
        let mut engine = MctsEngine::new(&tree, 5, 1.4).unwrap();
        let mut rng = StdRng::seed_from_u64(30);
        for _ in 0..4 {
            engine.iterate(&mut rng, &mut NullSink);
        }

        let result = engine.run(&mut rng, &mut NullSink);
        assert_eq!(result.stats.visits(tree.root()), 5);
    }

    #[test]
    fn test_selection_and_backpropagation_event_payloads() {
        let tree = two_ply_tree();
        let mut engine = MctsEngine::new(&tree, 40, 1.4).unwrap();
        let mut rng = StdRng::seed_from_u64(77);
        let mut selection_steps = 0;

        for _ in 0..40 {
            let before = engine.stats().clone();
            let mut events = EventLog::new();
            let playout = engine.iterate(&mut rng, &mut events);

            let mut path = vec![tree[tree.root()].id()];
            for event in events.events() {
                match event {
                    SearchEvent::SelectionStep { from_id, to_id, ucb } => {
                        selection_steps += 1;
                        assert_eq!(from_id, path.last().unwrap());
                        let to = tree.find(to_id).unwrap();
                        assert_eq!(*ucb, ucb1(&tree, &before, to, 1.4));
                        path.push(tree[to].id());
                    }
                    SearchEvent::BackpropagationStep { id, visits, wins } => {
                        let node = tree.find(id).unwrap();
                        assert_eq!(*visits, engine.stats().visits(node));
                        assert_eq!(*wins, engine.stats().wins(node));
                        assert_eq!(*visits, before.visits(node) + 1);
                    }
                    _ => {}
                }
            }
            assert_eq!(path.last().copied(), Some(tree[playout.selected].id()));
            assert_eq!(events.count("BackpropagationStep"), tree.ancestors(playout.expanded).count());
        }

        assert!(selection_steps > 0);
    }

    #[test]
    fn test_reset_zeroes_statistics() {
        let tree = two_ply_tree();
        let mut engine = MctsEngine::new(&tree, 5, 1.4).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        engine.run(&mut rng, &mut NullSink);
        assert_eq!(engine.completed(), 5);

        engine.reset();
        assert_eq!(engine.completed(), 0);
        assert!(engine.stats().iter().all(|(_, stats)| stats.visits == 0 && stats.wins == 0));
    }
}
