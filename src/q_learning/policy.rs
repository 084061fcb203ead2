//! ε-greedy action selection with multiplicative decay

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    q_learning::q_table::QTable,
    types::{Action, StateKey},
};

/// Default exploration floor
pub const DEFAULT_MIN_EPSILON: f64 = 0.1;
/// Default multiplicative decay per learning request
pub const DEFAULT_EPSILON_DECAY: f64 = 0.997;

/// How an action was selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Uniformly random legal action
    Explore,
    /// Arg-max of the Q-values over legal actions
    Exploit,
}

/// ε-greedy policy over a [`QTable`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpsilonGreedyPolicy {
    epsilon: f64,
    min_epsilon: f64,
    epsilon_decay: f64,
}

impl EpsilonGreedyPolicy {
    pub fn new(epsilon: f64, min_epsilon: f64, epsilon_decay: f64) -> Self {
        Self {
            epsilon,
            min_epsilon,
            epsilon_decay,
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn min_epsilon(&self) -> f64 {
        self.min_epsilon
    }

    pub fn epsilon_decay(&self) -> f64 {
        self.epsilon_decay
    }

    /// Override the current exploration rate
    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    /// ε-greedy action selection
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalActions`] when `legal_actions` is empty.
    pub fn choose<R: Rng>(
        &self,
        table: &mut QTable,
        state: StateKey,
        legal_actions: &[Action],
        rng: &mut R,
    ) -> Result<(Action, Selection)> {
        if rng.random::<f64>() < self.epsilon {
            let action = legal_actions.choose(rng).ok_or(Error::NoLegalActions)?;
            Ok((*action, Selection::Explore))
        } else {
            let action = table
                .greedy_action(state, legal_actions)
                .ok_or(Error::NoLegalActions)?;
            Ok((action, Selection::Exploit))
        }
    }

    /// Decay epsilon after a learning request: `ε ← max(ε_min, ε · decay)`
    pub fn decay(&mut self) {
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.min_epsilon);
    }
}

impl Default for EpsilonGreedyPolicy {
    fn default() -> Self {
        Self::new(0.9, DEFAULT_MIN_EPSILON, DEFAULT_EPSILON_DECAY)
    }
}
