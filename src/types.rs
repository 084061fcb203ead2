//! Newtype wrappers for improved type safety and domain modeling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Board, Cell};

/// A column (gravity games) or a row-major cell index (tic-tac-toe).
pub type Action = usize;

/// Canonical, collision-free key of a board used to index the Q-table.
///
/// The key is the base-3 number whose digits are the board cells in
/// row-major order (`Empty = 0`, `X = 1`, `O = 2`). For a fixed board shape the
/// mapping is injective, and because boards hold at most
/// [`MAX_CELLS`](crate::game::MAX_CELLS) cells every key fits in a `u64`
/// (3^40 < 2^64).
///
/// # Examples
///
/// ```
/// use gridmind::{game::Board, types::StateKey};
///
/// let board = Board::parse(3, 3, "X..|...|..O").unwrap();
/// let key = StateKey::from(&board);
/// assert_eq!(key.decode(3, 3).unwrap(), board);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey(u64);

impl StateKey {
    /// Wrap a raw key value.
    pub const fn from_raw(value: u64) -> Self {
        StateKey(value)
    }

    /// Get the inner value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Rebuild the board this key was computed from.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidBoardShape`] if the key holds more digits
    /// than `rows * cols` cells.
    pub fn decode(self, rows: usize, cols: usize) -> Result<Board, crate::Error> {
        let len = rows * cols;
        let mut cells = vec![Cell::Empty; len];
        let mut rest = self.0;
        for slot in cells.iter_mut().rev() {
            *slot = Cell::from_digit(rest % 3).unwrap_or(Cell::Empty);
            rest /= 3;
        }
        if rest != 0 {
            return Err(crate::Error::InvalidBoardShape {
                expected: format!("{rows}x{cols}"),
                got: format!("state key {}", self.0),
            });
        }
        Board::from_cells(rows, cols, cells)
    }
}

impl From<&Board> for StateKey {
    fn from(board: &Board) -> Self {
        StateKey(
            board
                .cells()
                .iter()
                .fold(0u64, |key, cell| key * 3 + cell.digit()),
        )
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
