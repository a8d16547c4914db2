//! Search configuration
//!
//! All fields are optional in a config file; missing ones take their
//! defaults. Keys that only matter to a renderer (`node_radius`,
//! `animation_speed`, ...) are ignored.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Invalid configuration, raised before any search starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("mcts_iterations must be at least 1, got {0}")]
    IterationsBelowOne(i64),

    #[error("exploration_weight must be non-negative, got {0}")]
    NegativeExplorationWeight(f64),

    #[error("exploration_weight must be finite, got {0}")]
    NonFiniteExplorationWeight(f64),
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Enables alpha-beta cutoffs in the minimax engine
    /// Default: false
    pub pruning: bool,

    /// Number of MCTS iterations (selection, expansion, simulation, backpropagation)
    /// Default: 10
    pub mcts_iterations: i64,

    /// UCB1 exploration constant
    /// Default: 1.4 (√2 rounded)
    pub exploration_weight: f64,

    /// Seed for every random draw of a run; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pruning: false,
            mcts_iterations: 10,
            exploration_weight: 1.4,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Loads a configuration from a JSON file and validates it.
    pub fn from_path<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config: SearchConfig = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("loaded search config from {}: {}", path.as_ref().display(), config.to_config_string());
        Ok(config)
    }

    /// Checks every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mcts_iterations < 1 {
            return Err(ConfigError::IterationsBelowOne(self.mcts_iterations));
        }
        validate_exploration_weight(self.exploration_weight)
    }

    /// Iteration count as an unsigned value.
    pub fn iterations(&self) -> Result<usize, ConfigError> {
        usize::try_from(self.mcts_iterations)
            .ok()
            .filter(|&n| n >= 1)
            .ok_or(ConfigError::IterationsBelowOne(self.mcts_iterations))
    }

    /// Create a configuration string for logging
    pub fn to_config_string(&self) -> String {
        format!(
            "pruning={}_iterations={}_c={:.3}_seed={}",
            self.pruning,
            self.mcts_iterations,
            self.exploration_weight,
            self.seed.map_or_else(|| "os".to_string(), |seed| seed.to_string())
        )
    }
}

pub(crate) fn validate_exploration_weight(weight: f64) -> Result<(), ConfigError> {
    if weight.is_nan() || weight.is_infinite() {
        return Err(ConfigError::NonFiniteExplorationWeight(weight));
    }
    if weight < 0.0 {
        return Err(ConfigError::NegativeExplorationWeight(weight));
    }
    Ok(())
}
