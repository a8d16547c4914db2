//! # Game Tree Search Library
//!
//! Decision algorithms over a finite, statically-known game tree.
//!
//! ## Features
//!
//! - **Tree Model**: arena-backed tree built once from a nested `{id, value?, children?}` specification
//! - **Minimax Engine**: depth-first minimax with optional alpha-beta pruning, recursive or explicit-stack
//! - **MCTS Engine**: UCB1 selection, random expansion and rollout, backpropagation, seedable randomness
//! - **Events**: structured event stream for external renderers, with JSON-lines recording
//!
//! ## Usage
//!
//! ```rust
//! use game_tree_search::{
//!     events::NullSink,
//!     minimax::MinimaxEngine,
//!     tree::{GameTree, TreeSpec},
//! };
//!
//! let spec = TreeSpec::node("R", vec![TreeSpec::leaf("A", 1.0), TreeSpec::leaf("B", 4.0)]);
//! let tree = GameTree::from_spec(&spec)?;
//! let outcome = MinimaxEngine::new(&tree, true).run(&mut NullSink)?;
//! assert_eq!(outcome.root_value(), 4.0);
//! # Ok::<(), game_tree_search::GameTreeError>(())
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Tree model built from an external specification
pub mod tree;

/// Minimax / alpha-beta engine
pub mod minimax;

/// Monte Carlo Tree Search engine
pub mod mcts;

/// Events emitted by both engines
pub mod events;

/// Event stream persistence
pub mod recording;

/// Engine configuration
pub mod config;

/// Text rendering of finished searches
pub mod report;

/// Logger setup for binaries
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use config::{ConfigError, SearchConfig};
pub use events::{EventSink, SearchEvent};
pub use mcts::{MctsEngine, MctsResult};
pub use minimax::{MinimaxEngine, MinimaxError, MinimaxOutcome};
pub use tree::{BuildOptions, GameTree, NodeId, NodeKind, TreeFormatError, TreeSpec};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the game tree search library
#[derive(Debug, thiserror::Error)]
pub enum GameTreeError {
    #[error("Tree format error: {0}")]
    TreeFormat(#[from] TreeFormatError),

    #[error("Minimax error: {0}")]
    Minimax(#[from] MinimaxError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, GameTreeError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
