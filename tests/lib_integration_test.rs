//! Integration tests for the game tree search library public API

use assert_matches::assert_matches;
use game_tree_search::{
    ConfigError, GameTreeError, MinimaxError, Result, SearchConfig, TreeFormatError, DESCRIPTION, NAME, VERSION,
};

#[test]
fn test_library_metadata() {
    assert!(!VERSION.is_empty());
    assert_eq!(NAME, "game_tree_search");
    assert!(!DESCRIPTION.is_empty());
}

#[test]
fn test_error_conversions() {
    let tree_error: GameTreeError = TreeFormatError::DuplicateId("X".to_string()).into();
    assert_matches!(tree_error, GameTreeError::TreeFormat(TreeFormatError::DuplicateId(ref id)) if id == "X");

    let config_error: GameTreeError = ConfigError::IterationsBelowOne(0).into();
    assert_matches!(config_error, GameTreeError::Config(ConfigError::IterationsBelowOne(0)));

    let window_error: GameTreeError = MinimaxError::InvalidWindow { alpha: 1.0, beta: 0.0 }.into();
    assert_matches!(window_error, GameTreeError::Minimax(MinimaxError::InvalidWindow { .. }));

    let io_error: GameTreeError = std::io::Error::other("boom").into();
    assert_matches!(io_error, GameTreeError::Io(_));
}

#[test]
fn test_error_messages() {
    let err = GameTreeError::from(TreeFormatError::LeafWithoutValue("L".to_string()));
    assert_eq!(err.to_string(), "Tree format error: leaf node 'L' has no value");

    let err = GameTreeError::from(ConfigError::NegativeExplorationWeight(-1.0));
    assert_eq!(err.to_string(), "Config error: exploration_weight must be non-negative, got -1");
}

#[test]
fn test_result_type_alias() {
    let success: Result<i32> = Ok(42);
    assert_matches!(success, Ok(42));

    let failure: Result<i32> = Err(ConfigError::IterationsBelowOne(-1).into());
    assert!(failure.is_err());
}

#[test]
fn test_config_defaults() {
    let config = SearchConfig::default();
    assert!(!config.pruning);
    assert_eq!(config.mcts_iterations, 10);
    assert_eq!(config.exploration_weight, 1.4);
}
