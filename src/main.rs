use clap::Parser;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::path::PathBuf;

use game_tree_search::events::{EventSink, LogSink};
use game_tree_search::logging::setup_logging;
use game_tree_search::recording::JsonLinesRecorder;
use game_tree_search::report::{render_mcts, render_minimax};
use game_tree_search::{BuildOptions, GameTree, MctsEngine, MinimaxEngine, SearchConfig};

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Algorithm {
    /// Minimax (pruning as set in the config file)
    Minimax,
    /// Minimax with alpha-beta pruning forced on
    Alphabeta,
    /// Monte Carlo Tree Search
    Mcts,
}

#[derive(Parser, Debug)]
#[command(name = "game_tree_search", version, about)]
struct Cli {
    /// Path to the tree file (JSON, bare or wrapped in {"root": ...})
    #[arg(short = 't', long)]
    tree: PathBuf,

    /// Path to a JSON configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Algorithm to run
    #[arg(short = 'a', long, value_enum, default_value = "minimax")]
    algorithm: Algorithm,

    /// Number of MCTS iterations (overrides the config file)
    #[arg(short = 'n', long)]
    iterations: Option<i64>,

    /// UCB1 exploration weight (overrides the config file)
    #[arg(long)]
    exploration_weight: Option<f64>,

    /// Seed for all random choices (overrides the config file)
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Use the explicit-stack minimax traversal
    #[arg(long, default_value_t = false)]
    iterative: bool,

    /// Accept leaves without a value (MCTS rollouts then draw a random 0/1 result)
    #[arg(long, default_value_t = false)]
    lenient: bool,

    /// Maximum tree depth accepted when building the tree
    #[arg(long, default_value_t = 1024)]
    max_depth: usize,

    /// Write every search event to this file as JSON lines
    #[arg(short = 'e', long)]
    events: Option<PathBuf>,

    /// Write logs to rotating files in this directory instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl Cli {
    fn search_config(&self) -> game_tree_search::Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::from_path(path)?,
            None => SearchConfig::default(),
        };

        if self.algorithm == Algorithm::Alphabeta {
            config.pruning = true;
        }
        if let Some(iterations) = self.iterations {
            config.mcts_iterations = iterations;
        }
        if let Some(weight) = self.exploration_weight {
            config.exploration_weight = weight;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }

    fn build_options(&self) -> BuildOptions {
        BuildOptions {
            max_depth: self.max_depth,
            allow_valueless_leaves: self.lenient,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let _logger = setup_logging("info", cli.log_dir.as_deref())?;

    let config = cli.search_config()?;
    let tree = GameTree::load(&cli.tree, cli.build_options())?;
    log::info!(
        "🌳 tree '{}': {} nodes, height {}",
        tree[tree.root()].id(),
        tree.len(),
        tree.height()
    );

    let mut recorder = match &cli.events {
        Some(path) => Some(JsonLinesRecorder::create(path)?),
        None => None,
    };

    {
        let mut sink: Box<dyn EventSink + '_> = match recorder.as_mut() {
            Some(recorder) => Box::new((LogSink, recorder)),
            None => Box::new(LogSink),
        };

        match cli.algorithm {
            Algorithm::Minimax | Algorithm::Alphabeta => {
                let engine = MinimaxEngine::from_config(&tree, &config);
                let outcome = if cli.iterative {
                    engine.run_iterative(sink.as_mut())?
                } else {
                    engine.run(sink.as_mut())?
                };

                print!("{}", render_minimax(&tree, &outcome));
                println!("Optimal value: {}", outcome.root_value());
            }
            Algorithm::Mcts => {
                let seed = config.seed.unwrap_or_else(|| rand::rng().random());
                log::info!("🎲 MCTS seed {} ({})", seed, config.to_config_string());

                let mut rng = StdRng::seed_from_u64(seed);
                let mut engine = MctsEngine::from_config(&tree, &config)?;
                let result = engine.run(&mut rng, sink.as_mut());

                print!("{}", render_mcts(&tree, &result.stats));
                match &result.best {
                    Some(best) => println!("Best move: {} (Win rate: {:.2})", best.id, best.win_rate),
                    None => println!("Root '{}' is a leaf: no move to recommend", tree[tree.root()].id()),
                }
            }
        }
    }

    if let Some(recorder) = recorder {
        let written = recorder.written();
        recorder.finish()?;
        log::info!("✅ {} events recorded", written);
    }

    Ok(())
}
