//! Learning session: one Q-table, one policy and one reward log per game
//!
//! A session processes learning requests one at a time. [`SharedSession`]
//! wraps it in a mutex so that concurrent requests see every read, update
//! and persist of the table as a single step.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    app::LearningConfig,
    game::{Board, GameRules, Player},
    q_learning::{
        policy::{EpsilonGreedyPolicy, Selection},
        q_table::QTable,
        reward::{Outcome, RewardModel},
        reward_log::RewardLog,
        serialization::SavedSession,
        td::TdUpdate,
    },
    types::{Action, StateKey},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Result of one learning request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub row: usize,
    pub col: usize,
    pub selection: Selection,
    pub reward: f64,
    pub outcome: Outcome,
    /// The move ended the game
    pub done: bool,
    /// Q(s,a) after the update
    pub q_value: f64,
    pub episode: u64,
    /// ε after decay
    pub epsilon: f64,
}

/// Q-learning state for one game
#[derive(Debug)]
pub struct LearningSession {
    rules: GameRules,
    table: QTable,
    policy: EpsilonGreedyPolicy,
    td: TdUpdate,
    rewards: RewardModel,
    log: RewardLog,
    rng: StdRng,
}

impl LearningSession {
    /// Fresh session with an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` is out of range.
    pub fn new(rules: GameRules, config: &LearningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            table: QTable::new(rules.action_count()),
            policy: config.policy(),
            td: config.td_update(),
            rewards: RewardModel::for_kind(rules.kind()),
            log: RewardLog::new(),
            rng: build_rng(config.seed),
            rules,
        })
    }

    /// Resume from a saved session, continuing its ε.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleSnapshot`] if `saved` was written for
    /// other rules, or [`Error::InvalidConfiguration`] for a bad `config`.
    pub fn restore(rules: GameRules, config: &LearningConfig, saved: SavedSession) -> Result<Self> {
        saved.ensure_compatible(&rules)?;
        let mut session = Self::new(rules, config)?;
        session.table = saved.q_table;
        session.log = saved.reward_log;
        session.policy.set_epsilon(saved.epsilon);
        debug!(
            game = %session.rules.kind(),
            states = session.table.len(),
            episodes = session.log.len(),
            epsilon = saved.epsilon,
            "restored learning session"
        );
        Ok(session)
    }

    pub fn to_saved(&self) -> SavedSession {
        SavedSession {
            version: SavedSession::VERSION,
            game: self.rules.kind(),
            rows: self.rules.rows(),
            cols: self.rules.cols(),
            epsilon: self.policy.epsilon(),
            q_table: self.table.clone(),
            reward_log: self.log.clone(),
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn q_table(&self) -> &QTable {
        &self.table
    }

    pub fn reward_log(&self) -> &RewardLog {
        &self.log
    }

    pub fn epsilon(&self) -> f64 {
        self.policy.epsilon()
    }

    /// Choose a move for `player`, learn from its immediate result and return it.
    ///
    /// Steps, in order: select ε-greedily over the legal actions, apply the
    /// move, score it, run one TD update from the pre-move state to the
    /// post-move state, append to the reward log, then decay ε.
    ///
    /// # Errors
    ///
    /// Returns a board validation error for a malformed board, or
    /// [`Error::NoLegalActions`] if the board has no legal move. The session
    /// is unchanged on error.
    pub fn decide(&mut self, board: &Board, player: Player) -> Result<Decision> {
        self.rules.validate(board)?;
        let legal = self.rules.legal_actions(board);
        if legal.is_empty() {
            return Err(Error::NoLegalActions);
        }

        let state = StateKey::from(board);
        let (action, selection) = self
            .policy
            .choose(&mut self.table, state, &legal, &mut self.rng)?;
        let (row, col) = self
            .rules
            .landing(board, action)
            .ok_or(Error::IllegalMove { action })?;
        let next_board = self.rules.apply_move(board, action, player)?;

        let transition = self.rewards.evaluate(&self.rules, board, &next_board, player);
        let next_state = StateKey::from(&next_board);
        let q_value = self
            .td
            .update(&mut self.table, state, action, transition.reward, next_state)?;
        let entry = self.log.record(transition.reward, transition.outcome);
        self.policy.decay();

        debug!(
            %player,
            action,
            ?selection,
            reward = transition.reward,
            outcome = %transition.outcome,
            q_value,
            epsilon = self.policy.epsilon(),
            "learning step"
        );

        Ok(Decision {
            action,
            row,
            col,
            selection,
            reward: transition.reward,
            outcome: transition.outcome,
            done: transition.done,
            q_value,
            episode: entry.episode,
            epsilon: self.policy.epsilon(),
        })
    }
}

/// A [`LearningSession`] shared between threads
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<LearningSession>>,
}

impl SharedSession {
    pub fn new(session: LearningSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Run `f` while holding the session lock.
    ///
    /// Use this to pair a [`LearningSession::decide`] with persisting the
    /// resulting state so no other request interleaves.
    pub fn with_lock<T>(&self, f: impl FnOnce(&mut LearningSession) -> T) -> T {
        let mut session = self.inner.lock();
        f(&mut session)
    }

    pub fn decide(&self, board: &Board, player: Player) -> Result<Decision> {
        self.with_lock(|session| session.decide(board, player))
    }

    /// Copy of the current persisted form
    pub fn to_saved(&self) -> SavedSession {
        self.with_lock(|session| session.to_saved())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameKind;

    fn c4_session(seed: u64) -> LearningSession {
        let config = LearningConfig::for_game(GameKind::ConnectFour).with_seed(seed);
        LearningSession::new(GameRules::connect_four(), &config).unwrap()
    }

    #[test]
    fn test_first_request_on_empty_board() {
        let mut session = c4_session(3);
        let board = session.rules().empty_board();
        let decision = session.decide(&board, Player::X).unwrap();

        assert!(decision.action < 6);
        assert_eq!(decision.row, 5);
        assert_eq!(decision.col, decision.action);
        assert_eq!(decision.episode, 0);
        assert_eq!(decision.outcome, Outcome::Ongoing);
        assert!((decision.epsilon - 0.9 * 0.997).abs() < 1e-12);
        assert_eq!(session.reward_log().len(), 1);

        // Pre-move and post-move states both exist
        assert_eq!(session.q_table().len(), 2);
        let state = StateKey::from(&board);
        assert_eq!(
            session.q_table().value(&state, decision.action),
            decision.q_value
        );
    }

    #[test]
    fn test_full_board_leaves_session_untouched() {
        let mut session = LearningSession::new(
            GameRules::tic_tac_toe(),
            &LearningConfig::for_game(GameKind::TicTacToe).with_seed(1),
        )
        .unwrap();
        let board = session.rules().parse_board("XOX|XOO|OXO").unwrap();
        let before = session.to_saved();

        let err = session.decide(&board, Player::X).unwrap_err();
        assert!(matches!(err, Error::NoLegalActions));
        assert_eq!(session.to_saved(), before);
    }

    #[test]
    fn test_single_legal_column_is_forced() {
        let mut session = c4_session(9);
        let rules = session.rules().clone();
        let board = rules
            .parse_board("XOXOX.|OXOXO.|XOXOX.|XOXOX.|OXOXOX|OXOXOX")
            .unwrap();
        assert_eq!(rules.legal_actions(&board), vec![5]);

        let decision = session.decide(&board, Player::O).unwrap();
        assert_eq!(decision.action, 5);
        assert_eq!(decision.row, 3);
    }

    #[test]
    fn test_epsilon_floors_at_minimum() {
        let config = LearningConfig::for_game(GameKind::TicTacToe)
            .with_epsilon(0.1005)
            .with_seed(4);
        let mut session = LearningSession::new(GameRules::tic_tac_toe(), &config).unwrap();
        let board = session.rules().empty_board();
        for _ in 0..5 {
            session.decide(&board, Player::X).unwrap();
        }
        assert_eq!(session.epsilon(), 0.1);
    }

    #[test]
    fn test_restore_continues_log_and_epsilon() {
        let mut session = c4_session(5);
        let board = session.rules().empty_board();
        session.decide(&board, Player::X).unwrap();
        session.decide(&board, Player::O).unwrap();
        let saved = session.to_saved();

        let config = LearningConfig::for_game(GameKind::ConnectFour).with_seed(6);
        let mut restored = LearningSession::restore(GameRules::connect_four(), &config, saved.clone()).unwrap();
        assert_eq!(restored.epsilon(), saved.epsilon);
        assert_eq!(restored.q_table(), &saved.q_table);

        let decision = restored.decide(&board, Player::X).unwrap();
        assert_eq!(decision.episode, 2);
    }

    #[test]
    fn test_restore_rejects_truncated_q_vectors() {
        let rules = GameRules::connect_four();
        let board = rules.parse_board("X.....|O.....|X.....|O.....|X.....|O.....").unwrap();
        let values = std::collections::HashMap::from([(StateKey::from(&board), vec![0.0])]);
        let mut saved = SavedSession::empty(&rules, 0.0);
        saved.q_table = rmp_serde::from_slice(&rmp_serde::to_vec(&(6usize, values)).unwrap()).unwrap();

        let config = LearningConfig::for_game(GameKind::ConnectFour).with_seed(1);
        let err = LearningSession::restore(rules, &config, saved).unwrap_err();
        assert!(matches!(err, Error::IncompatibleSnapshot { .. }));
    }

    #[test]
    fn test_shared_session_serializes_requests() {
        let shared = SharedSession::new(c4_session(11));
        let board = GameRules::connect_four().empty_board();

        std::thread::scope(|scope| {
            for t in 0..4 {
                let shared = shared.clone();
                let board = board.clone();
                scope.spawn(move || {
                    let player = if t % 2 == 0 { Player::X } else { Player::O };
                    for _ in 0..25 {
                        shared.decide(&board, player).unwrap();
                    }
                });
            }
        });

        let saved = shared.to_saved();
        assert_eq!(saved.reward_log.len(), 100);
        for (i, entry) in saved.reward_log.entries().iter().enumerate() {
            assert_eq!(entry.episode, i as u64);
        }
        let expected_epsilon = (0.9 * 0.997f64.powi(100)).max(0.1);
        assert!((saved.epsilon - expected_epsilon).abs() < 1e-9);
    }
}
