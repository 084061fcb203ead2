//! Serialization support for learning sessions.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    game::{GameKind, GameRules},
    q_learning::{q_table::QTable, reward_log::RewardLog},
};

/// Persisted learning state of one game: Q-table, reward log and current ε.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSession {
    pub version: u32,
    pub game: GameKind,
    pub rows: usize,
    pub cols: usize,
    pub epsilon: f64,
    pub q_table: QTable,
    pub reward_log: RewardLog,
}

impl SavedSession {
    pub const VERSION: u32 = 1;

    /// An empty saved session for a game
    pub fn empty(rules: &GameRules, epsilon: f64) -> Self {
        Self {
            version: Self::VERSION,
            game: rules.kind(),
            rows: rules.rows(),
            cols: rules.cols(),
            epsilon,
            q_table: QTable::new(rules.action_count()),
            reward_log: RewardLog::new(),
        }
    }

    /// Check that this snapshot can drive a session with `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleSnapshot`] on a version, game, board shape
    /// or action count mismatch, a Q-value vector of the wrong length, or an
    /// ε outside [0, 1].
    pub fn ensure_compatible(&self, rules: &GameRules) -> Result<()> {
        let mismatch = |message: String| Err(Error::IncompatibleSnapshot { message });
        if self.version != Self::VERSION {
            return mismatch(format!(
                "unsupported save format version {} (expected {})",
                self.version,
                Self::VERSION
            ));
        }
        if self.game != rules.kind() {
            return mismatch(format!(
                "session was saved for {} but {} was requested",
                self.game,
                rules.kind()
            ));
        }
        if (self.rows, self.cols) != (rules.rows(), rules.cols()) {
            return mismatch(format!(
                "board shape {}x{} does not match {}x{}",
                self.rows,
                self.cols,
                rules.rows(),
                rules.cols()
            ));
        }
        if self.q_table.action_count() != rules.action_count() {
            return mismatch(format!(
                "Q-table has {} action slots, rules need {}",
                self.q_table.action_count(),
                rules.action_count()
            ));
        }
        if let Some((state, len)) = self.q_table.find_misshapen() {
            return mismatch(format!(
                "state {state} has {len} Q-values, expected {}",
                rules.action_count()
            ));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return mismatch(format!("epsilon {} is outside [0, 1]", self.epsilon));
        }
        Ok(())
    }
}
