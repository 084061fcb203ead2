//! Tabular Q-learning for board games
//!
//! Each learning request is a one-step transition: the agent picks a move
//! ε-greedily from the current board, the move is scored by a
//! [`RewardModel`], and the Q-value of the pre-move state is updated toward
//! the best value of the post-move state.
//!
//! ## Usage Example
//!
//! ```
//! use gridmind::app::LearningConfig;
//! use gridmind::game::{GameKind, GameRules, Player};
//! use gridmind::q_learning::LearningSession;
//!
//! let rules = GameRules::connect_four();
//! let config = LearningConfig::for_game(GameKind::ConnectFour).with_seed(7);
//! let mut session = LearningSession::new(rules.clone(), &config)?;
//!
//! let decision = session.decide(&rules.empty_board(), Player::X)?;
//! assert_eq!(decision.row, 5);
//! # Ok::<(), gridmind::Error>(())
//! ```

pub mod policy;
pub mod q_table;
pub mod reward;
pub mod reward_log;
pub mod serialization;
pub mod session;
pub mod td;

pub use policy::{EpsilonGreedyPolicy, Selection};
pub use q_table::QTable;
pub use reward::{Outcome, RewardModel, Shaping, Transition};
pub use reward_log::{RewardLog, RewardLogEntry, RewardSummary};
pub use serialization::SavedSession;
pub use session::{Decision, LearningSession, SharedSession};
pub use td::TdUpdate;
