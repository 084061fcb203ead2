//! Move legality, placement and terminal detection for each game

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{
    Board, Cell, Player,
    lines::{LineSet, TIC_TAC_TOE_LINES},
};
use crate::{Error, Result, types::Action};

/// The two supported games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    /// 3×3 line game, actions are cell indices
    TicTacToe,
    /// 6×6 gravity game with four in a row, actions are columns
    ConnectFour,
}

impl GameKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GameKind::TicTacToe => "tic-tac-toe",
            GameKind::ConnectFour => "connect-four",
        }
    }

    /// Short name used for on-disk session files
    pub fn file_stem(self) -> &'static str {
        match self {
            GameKind::TicTacToe => "tictactoe",
            GameKind::ConnectFour => "connect4",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tic-tac-toe" | "tictactoe" | "ttt" => Ok(GameKind::TicTacToe),
            "connect-four" | "connect4" | "c4" => Ok(GameKind::ConnectFour),
            _ => Err(Error::UnknownGame {
                input: s.to_string(),
                expected: "tic-tac-toe, connect-four".to_string(),
            }),
        }
    }
}

/// Where a piece lands for a given action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// The action is the row-major index of the target cell
    Cell,
    /// The action is a column; the piece drops to the lowest empty row
    Gravity,
}

/// Rules of one game: board shape, placement semantics and winning lines.
#[derive(Debug, Clone)]
pub struct GameRules {
    kind: GameKind,
    rows: usize,
    cols: usize,
    placement: Placement,
    lines: LineSet,
}

impl GameRules {
    /// Standard 3×3 tic-tac-toe
    pub fn tic_tac_toe() -> Self {
        Self {
            kind: GameKind::TicTacToe,
            rows: 3,
            cols: 3,
            placement: Placement::Cell,
            lines: LineSet::fixed(&TIC_TAC_TOE_LINES),
        }
    }

    /// 6×6 gravity board with four in a row
    pub fn connect_four() -> Self {
        Self {
            kind: GameKind::ConnectFour,
            rows: 6,
            cols: 6,
            placement: Placement::Gravity,
            lines: LineSet::runs(6, 6, 4),
        }
    }

    pub fn for_kind(kind: GameKind) -> Self {
        match kind {
            GameKind::TicTacToe => Self::tic_tac_toe(),
            GameKind::ConnectFour => Self::connect_four(),
        }
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }


    /// Number of action slots: one per cell, or one per column under gravity.
    pub fn action_count(&self) -> usize {
        match self.placement {
            Placement::Cell => self.rows * self.cols,
            Placement::Gravity => self.cols,
        }
    }

    pub fn empty_board(&self) -> Board {
        Board::from_cells(
            self.rows,
            self.cols,
            vec![Cell::Empty; self.rows * self.cols],
        )
        .unwrap_or_else(|_| unreachable!("rule dimensions are validated on construction"))
    }

    /// Check a caller-supplied board against these rules.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBoardShape`] on a dimension mismatch and, for
    /// gravity boards, [`Error::FloatingPiece`] if a piece sits above an
    /// empty cell.
    pub fn validate(&self, board: &Board) -> Result<()> {
        if board.rows() != self.rows || board.cols() != self.cols {
            return Err(Error::InvalidBoardShape {
                expected: format!("{}x{}", self.rows, self.cols),
                got: format!("{}x{}", board.rows(), board.cols()),
            });
        }
        if self.placement == Placement::Gravity {
            for col in 0..self.cols {
                for row in 0..self.rows - 1 {
                    if board.get(row, col) != Cell::Empty && board.get(row + 1, col) == Cell::Empty
                    {
                        return Err(Error::FloatingPiece { row, col });
                    }
                }
            }
        }
        Ok(())
    }

    /// The (row, col) cell an action would fill, if it is legal.
    pub fn landing(&self, board: &Board, action: Action) -> Option<(usize, usize)> {
        match self.placement {
            Placement::Cell => {
                if action < board.cell_count() && board.cell(action) == Cell::Empty {
                    Some((action / board.cols(), action % board.cols()))
                } else {
                    None
                }
            }
            Placement::Gravity => {
                if action >= board.cols() {
                    return None;
                }
                (0..board.rows())
                    .rev()
                    .find(|&row| board.get(row, action) == Cell::Empty)
                    .map(|row| (row, action))
            }
        }
    }

    pub fn is_legal(&self, board: &Board, action: Action) -> bool {
        self.landing(board, action).is_some()
    }

    /// Legal actions in ascending order; empty on a full board.
    pub fn legal_actions(&self, board: &Board) -> Vec<Action> {
        (0..self.action_count())
            .filter(|&action| self.is_legal(board, action))
            .collect()
    }

    /// Apply an action for `player` and return the new board.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalMove`] if the action is not among
    /// [`legal_actions`](Self::legal_actions).
    #[must_use = "apply_move returns a new board; the original is unchanged"]
    pub fn apply_move(&self, board: &Board, action: Action, player: Player) -> Result<Board> {
        let (row, col) = self
            .landing(board, action)
            .ok_or(Error::IllegalMove { action })?;
        Ok(board.with_cell(board.index(row, col), player.to_cell()))
    }

    /// Check if a player has a winning line
    pub fn has_win(&self, board: &Board, player: Player) -> bool {
        self.lines.has_win(board, player)
    }

    /// Get the winner if there is one
    pub fn winner(&self, board: &Board) -> Option<Player> {
        [Player::X, Player::O]
            .into_iter()
            .find(|&p| self.has_win(board, p))
    }

    /// Check if the game is over (win or full board)
    pub fn is_terminal(&self, board: &Board) -> bool {
        board.is_full() || self.winner(board).is_some()
    }

    /// Legal actions that would immediately win for `player`, ascending.
    pub fn winning_actions(&self, board: &Board, player: Player) -> Vec<Action> {
        self.legal_actions(board)
            .into_iter()
            .filter(|&action| {
                self.apply_move(board, action, player)
                    .is_ok_and(|next| self.has_win(&next, player))
            })
            .collect()
    }

    /// Build a board from row-major cells, checked against these rules.
    pub fn board_from_cells(&self, cells: Vec<Cell>) -> Result<Board> {
        let board = Board::from_cells(self.rows, self.cols, cells)?;
        self.validate(&board)?;
        Ok(board)
    }

    /// Parse a board from text and check it against these rules.
    pub fn parse_board(&self, text: &str) -> Result<Board> {
        let board = Board::parse(self.rows, self.cols, text)?;
        self.validate(&board)?;
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_drop_lands_on_bottom_row() {
        let rules = GameRules::connect_four();
        let board = rules.empty_board();
        assert_eq!(rules.landing(&board, 0), Some((5, 0)));

        let next = rules.apply_move(&board, 0, Player::X).unwrap();
        assert_eq!(next.get(5, 0), Cell::X);
        assert_eq!(next.get(0, 0), Cell::Empty);
        assert_eq!(rules.landing(&next, 0), Some((4, 0)));
    }

    #[test]
    fn test_full_column_is_illegal() {
        let rules = GameRules::connect_four();
        let mut board = rules.empty_board();
        for i in 0..6 {
            let player = if i % 2 == 0 { Player::X } else { Player::O };
            board = rules.apply_move(&board, 2, player).unwrap();
        }
        assert!(!rules.legal_actions(&board).contains(&2));
        assert!(matches!(
            rules.apply_move(&board, 2, Player::X),
            Err(Error::IllegalMove { action: 2 })
        ));
        assert_eq!(rules.legal_actions(&board), vec![0, 1, 3, 4, 5]);
    }

    #[test]
    fn test_cell_placement() {
        let rules = GameRules::tic_tac_toe();
        let board = rules.parse_board("X..|.O.|...").unwrap();
        assert_eq!(rules.legal_actions(&board), vec![1, 2, 3, 5, 6, 7, 8]);
        let next = rules.apply_move(&board, 7, Player::X).unwrap();
        assert_eq!(next.get(2, 1), Cell::X);
        assert_eq!(next.occupied_count(), board.occupied_count() + 1);
    }

    #[test]
    fn test_out_of_range_action_is_illegal() {
        let rules = GameRules::tic_tac_toe();
        let board = rules.empty_board();
        assert!(rules.apply_move(&board, 9, Player::X).is_err());

        let rules = GameRules::connect_four();
        let board = rules.empty_board();
        assert!(rules.apply_move(&board, 6, Player::X).is_err());
    }

    #[test]
    fn test_full_board_has_no_legal_actions() {
        let rules = GameRules::tic_tac_toe();
        let board = rules.parse_board("XOX|XOO|OXX").unwrap();
        assert!(rules.legal_actions(&board).is_empty());
        assert!(rules.is_terminal(&board));
        assert_eq!(rules.winner(&board), None);
    }

    #[test]
    fn test_validate_rejects_floating_piece() {
        let rules = GameRules::connect_four();
        let err = rules
            .parse_board("......|......|......|......|X.....|......")
            .unwrap_err();
        assert!(matches!(err, Error::FloatingPiece { row: 4, col: 0 }));
    }

    #[test]
    fn test_validate_rejects_wrong_shape() {
        let rules = GameRules::connect_four();
        let board = Board::empty(3, 3).unwrap();
        assert!(matches!(
            rules.validate(&board),
            Err(Error::InvalidBoardShape { .. })
        ));
    }

    #[test]
    fn test_winning_actions() {
        let rules = GameRules::connect_four();
        let board = rules
            .parse_board("......|......|......|......|......|XXX...")
            .unwrap();
        assert_eq!(rules.winning_actions(&board, Player::X), vec![3]);
        assert!(rules.winning_actions(&board, Player::O).is_empty());
    }

    #[test]
    fn test_game_kind_parsing() {
        assert_eq!("c4".parse::<GameKind>().unwrap(), GameKind::ConnectFour);
        assert_eq!(
            "Tic-Tac-Toe".parse::<GameKind>().unwrap(),
            GameKind::TicTacToe
        );
        assert!("chess".parse::<GameKind>().is_err());
    }
}
