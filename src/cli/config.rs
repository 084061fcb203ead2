//! Shared configuration for CLI commands

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::{
    app::{App, DEFAULT_STATE_DIR, LearningConfig},
    game::GameKind,
};

/// Hyper-parameter overrides read from a JSON file.
///
/// Missing fields keep the per-game default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LearningOverrides {
    pub learning_rate: Option<f64>,
    pub discount_factor: Option<f64>,
    pub initial_epsilon: Option<f64>,
    pub min_epsilon: Option<f64>,
    pub epsilon_decay: Option<f64>,
    pub seed: Option<u64>,
}

impl LearningOverrides {
    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn apply(&self, mut config: LearningConfig) -> LearningConfig {
        if let Some(v) = self.learning_rate {
            config = config.with_learning_rate(v);
        }
        if let Some(v) = self.discount_factor {
            config = config.with_discount_factor(v);
        }
        if let Some(v) = self.initial_epsilon {
            config = config.with_epsilon(v);
        }
        if let Some(v) = self.min_epsilon {
            config = config.with_min_epsilon(v);
        }
        if let Some(v) = self.epsilon_decay {
            config = config.with_epsilon_decay(v);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

/// Which agent answers a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AgentKind {
    /// Win, else block, else random
    Heuristic,
    /// ε-greedy Q-learning with a persisted table
    QLearning,
}

/// Game and session options shared by every command
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Game to play (tic-tac-toe or connect-four)
    #[arg(long, short = 'g', default_value = "connect-four")]
    pub game: GameKind,

    /// Directory holding saved sessions
    #[arg(long, default_value = DEFAULT_STATE_DIR)]
    pub state_dir: PathBuf,

    /// JSON file with learning parameter overrides
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Learning rate α
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Discount factor γ
    #[arg(long)]
    pub discount_factor: Option<f64>,

    /// Initial exploration rate ε for a new session
    #[arg(long)]
    pub epsilon: Option<f64>,
}

impl SessionArgs {
    /// Per-game defaults, then the config file, then command-line flags.
    pub fn learning_config(&self) -> Result<LearningConfig> {
        let mut config = LearningConfig::for_game(self.game);
        if let Some(path) = &self.config {
            config = LearningOverrides::from_json_file(path)?.apply(config);
        }
        let flags = LearningOverrides {
            learning_rate: self.learning_rate,
            discount_factor: self.discount_factor,
            initial_epsilon: self.epsilon,
            seed: self.seed,
            ..LearningOverrides::default()
        };
        let config = flags.apply(config);
        config.validate()?;
        Ok(config)
    }

    pub fn app(&self) -> App {
        App::new().with_state_dir(&self.state_dir)
    }
}
