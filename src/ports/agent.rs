//! Agent port: anything that picks a move for a board

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    game::{Board, Player},
    q_learning::{Outcome, Selection},
    types::Action,
};

/// What a learning agent did with a request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LearningReport {
    pub reward: f64,
    pub outcome: Outcome,
    pub episode: u64,
    pub epsilon: f64,
    pub selection: Selection,
    /// The updated session reached storage
    pub persisted: bool,
}

/// A chosen move with the cell it occupies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveChoice {
    pub action: Action,
    pub row: usize,
    pub col: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub learning: Option<LearningReport>,
}

/// Move selection for one side of a game.
///
/// Implementations must only return legal actions for `board`.
///
/// # Examples
///
/// ```
/// use gridmind::agents::HeuristicAgent;
/// use gridmind::game::{GameRules, Player};
/// use gridmind::ports::Agent;
///
/// let rules = GameRules::tic_tac_toe();
/// let mut agent = HeuristicAgent::with_seed(rules.clone(), 1);
/// let board = rules.parse_board("X..|X..|...")?;
/// assert_eq!(agent.select_move(&board, Player::X)?.action, 6);
/// # Ok::<(), gridmind::Error>(())
/// ```
pub trait Agent: Send {
    /// Select a move for `player`.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed board or when no legal move exists.
    fn select_move(&mut self, board: &Board, player: Player) -> Result<MoveChoice>;

    /// Short name for logs and output
    fn name(&self) -> &str;
}
