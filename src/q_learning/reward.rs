//! Shaped rewards for a single move
//!
//! Episodes are not tracked explicitly. A transition is "done" when the board
//! after the move is terminal; starting a fresh board to begin the next
//! episode is the caller's job.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Board, GameKind, GameRules, Player};

/// Outcome label of a transition from the mover's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Ongoing,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Win => "Win",
            Outcome::Loss => "Loss",
            Outcome::Ongoing => "Ongoing",
        };
        f.write_str(label)
    }
}

/// Which shaping terms apply to non-terminal moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shaping {
    /// Block and setup bonuses (gravity game)
    Tactical,
    /// A small penalty per move to favour quick wins (tic-tac-toe)
    StepPenalty,
}

/// A scored transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub reward: f64,
    pub outcome: Outcome,
    /// The board after the move is terminal (win, loss or full)
    pub done: bool,
}

/// Reward function for one move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardModel {
    pub shaping: Shaping,
    pub win: f64,
    pub loss: f64,
    pub draw: f64,
    pub step: f64,
    pub block_bonus: f64,
    pub setup_bonus: f64,
}

impl RewardModel {
    /// Block/setup shaping used for the gravity game
    pub fn tactical() -> Self {
        Self {
            shaping: Shaping::Tactical,
            win: 1.0,
            loss: -1.0,
            draw: 0.5,
            step: 0.0,
            block_bonus: 0.5,
            setup_bonus: 0.5,
        }
    }

    /// Per-move penalty used for tic-tac-toe
    pub fn step_penalty() -> Self {
        Self {
            shaping: Shaping::StepPenalty,
            win: 1.0,
            loss: -1.0,
            draw: 0.5,
            step: -0.1,
            block_bonus: 0.0,
            setup_bonus: 0.0,
        }
    }

    pub fn for_kind(kind: GameKind) -> Self {
        match kind {
            GameKind::TicTacToe => Self::step_penalty(),
            GameKind::ConnectFour => Self::tactical(),
        }
    }

    /// Score `player`'s move from `before` to `after`.
    ///
    /// A win or loss on `after` ends scoring. Otherwise the base is the draw
    /// reward on a full board, else the step reward. Under tactical shaping
    /// two independent bonuses are added on top:
    /// - block: the opponent had an immediate winning reply on `before` and
    ///   has fewer of them on `after`;
    /// - setup: `player` has more immediate winning actions on `after` than
    ///   on `before`.
    pub fn evaluate(&self, rules: &GameRules, before: &Board, after: &Board, player: Player) -> Transition {
        let opponent = player.opponent();

        if rules.has_win(after, player) {
            return Transition {
                reward: self.win,
                outcome: Outcome::Win,
                done: true,
            };
        }
        if rules.has_win(after, opponent) {
            return Transition {
                reward: self.loss,
                outcome: Outcome::Loss,
                done: true,
            };
        }

        let done = after.is_full();
        let mut reward = if done { self.draw } else { self.step };

        if self.shaping == Shaping::Tactical && !done {
            let threats_before = rules.winning_actions(before, opponent).len();
            let threats_after = rules.winning_actions(after, opponent).len();
            if threats_before > 0 && threats_after < threats_before {
                reward += self.block_bonus;
            }
            let setups_before = rules.winning_actions(before, player).len();
            let setups_after = rules.winning_actions(after, player).len();
            if setups_after > setups_before {
                reward += self.setup_bonus;
            }
        }

        Transition {
            reward,
            outcome: Outcome::Ongoing,
            done,
        }
    }
}
