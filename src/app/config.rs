//! Configuration types for agent creation.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    game::GameKind,
    q_learning::{
        EpsilonGreedyPolicy, TdUpdate,
        policy::{DEFAULT_EPSILON_DECAY, DEFAULT_MIN_EPSILON},
    },
};

/// Hyper-parameters of a Q-learning session.
///
/// All values are fixed at startup except ε, which the session decays after
/// every learning request.
///
/// # Examples
///
/// ```
/// use gridmind::app::LearningConfig;
/// use gridmind::game::GameKind;
///
/// let config = LearningConfig::for_game(GameKind::ConnectFour)
///     .with_seed(42)
///     .with_learning_rate(0.25);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningConfig {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// ε for a fresh session
    pub initial_epsilon: f64,
    /// Floor ε decays toward
    pub min_epsilon: f64,
    /// Multiplicative ε decay per learning request
    pub epsilon_decay: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl LearningConfig {
    /// Defaults for a game.
    ///
    /// - Connect four: α = 0.5, γ = 0.9, ε₀ = 0.9
    /// - Tic-tac-toe: α = 0.1, γ = 0.9, ε₀ = 0.2
    ///
    /// Both decay ε by 0.997 per request down to 0.1.
    pub fn for_game(kind: GameKind) -> Self {
        let (learning_rate, initial_epsilon) = match kind {
            GameKind::ConnectFour => (0.5, 0.9),
            GameKind::TicTacToe => (0.1, 0.2),
        };
        Self {
            learning_rate,
            discount_factor: 0.9,
            initial_epsilon,
            min_epsilon: DEFAULT_MIN_EPSILON,
            epsilon_decay: DEFAULT_EPSILON_DECAY,
            seed: None,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.initial_epsilon = epsilon;
        self
    }

    pub fn with_min_epsilon(mut self, min_epsilon: f64) -> Self {
        self.min_epsilon = min_epsilon;
        self
    }

    pub fn with_epsilon_decay(mut self, epsilon_decay: f64) -> Self {
        self.epsilon_decay = epsilon_decay;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if α ∉ (0, 1], any of γ, ε₀,
    /// ε_min ∉ [0, 1], or the decay rate ∉ (0, 1].
    pub fn validate(&self) -> Result<()> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        let checks = [
            (
                self.learning_rate > 0.0 && self.learning_rate <= 1.0,
                "learning_rate must be in (0, 1]",
            ),
            (
                in_unit(self.discount_factor),
                "discount_factor must be in [0, 1]",
            ),
            (
                in_unit(self.initial_epsilon),
                "initial_epsilon must be in [0, 1]",
            ),
            (in_unit(self.min_epsilon), "min_epsilon must be in [0, 1]"),
            (
                self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0,
                "epsilon_decay must be in (0, 1]",
            ),
        ];
        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, message)) => Err(Error::InvalidConfiguration {
                message: (*message).to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn td_update(&self) -> TdUpdate {
        TdUpdate::new(self.learning_rate, self.discount_factor)
    }

    pub fn policy(&self) -> EpsilonGreedyPolicy {
        EpsilonGreedyPolicy::new(self.initial_epsilon, self.min_epsilon, self.epsilon_decay)
    }
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self::for_game(GameKind::ConnectFour)
    }
}
