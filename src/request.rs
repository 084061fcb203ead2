//! Wire format of move requests and responses

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    game::{Board, GameRules, Marker, Player},
    ports::MoveChoice,
};

/// A board as sent by a client.
///
/// ```text
/// "X..|X..|..."                      text, rows separated by '|'
/// ["X", null, null, 1, "", 0, ...]   flat, row-major
/// [[null, ...], ..., ["X", ...]]     one array per row, top row first
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoardInput {
    Text(String),
    Grid(Vec<Vec<Option<Marker>>>),
    Flat(Vec<Option<Marker>>),
}

impl BoardInput {
    /// Decode into a board checked against `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBoardShape`] on a size mismatch,
    /// [`Error::InvalidCell`] for an unknown marker, and
    /// [`Error::FloatingPiece`] for an unsupported piece on a gravity board.
    pub fn to_board(&self, rules: &GameRules) -> Result<Board> {
        match self {
            BoardInput::Text(text) => rules.parse_board(text),
            BoardInput::Flat(markers) => {
                let expected = rules.rows() * rules.cols();
                if markers.len() != expected {
                    return Err(Error::InvalidBoardShape {
                        expected: format!("{expected} cells"),
                        got: format!("{} cells", markers.len()),
                    });
                }
                let cells = markers
                    .iter()
                    .enumerate()
                    .map(|(i, m)| Marker::to_cell(m.as_ref(), i))
                    .collect::<Result<Vec<_>>>()?;
                rules.board_from_cells(cells)
            }
            BoardInput::Grid(rows) => {
                let shape_error = || Error::InvalidBoardShape {
                    expected: format!("{}x{}", rules.rows(), rules.cols()),
                    got: format!(
                        "{} rows of lengths {:?}",
                        rows.len(),
                        rows.iter().map(Vec::len).collect::<Vec<_>>()
                    ),
                };
                if rows.len() != rules.rows() || rows.iter().any(|r| r.len() != rules.cols()) {
                    return Err(shape_error());
                }
                let cells = rows
                    .iter()
                    .flatten()
                    .enumerate()
                    .map(|(i, m)| Marker::to_cell(m.as_ref(), i))
                    .collect::<Result<Vec<_>>>()?;
                rules.board_from_cells(cells)
            }
        }
    }
}

impl From<&Board> for BoardInput {
    fn from(board: &Board) -> Self {
        BoardInput::Text(board.encode())
    }
}

/// One request: a board and the side to move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub board: BoardInput,
    pub player: Player,
}

impl MoveRequest {
    pub fn parse_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Successful reply: the move plus, for learning agents, what was learned
pub type MoveResponse = MoveChoice;

/// Reply for a request that could not be served
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        let kind = match err {
            Error::NoLegalActions => "board_full",
            Error::IllegalMove { .. } => "illegal_move",
            Error::InvalidBoardShape { .. }
            | Error::InvalidCell { .. }
            | Error::FloatingPiece { .. }
            | Error::BoardTooLarge { .. } => "invalid_board",
            Error::InvalidPlayer { .. } => "invalid_player",
            Error::Serialization(_) => "invalid_request",
            _ => "internal",
        };
        Self {
            error: err.to_string(),
            kind: kind.to_string(),
        }
    }
}
