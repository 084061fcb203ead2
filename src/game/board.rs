//! Board representation shared by both grid games

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Largest board (in cells) whose every position fits a [`crate::types::StateKey`].
pub const MAX_CELLS: usize = 40;

/// A cell on a grid board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' | '1' => Some(Cell::X),
            'O' | 'o' | '2' => Some(Cell::O),
            _ => None,
        }
    }

    /// Base-3 digit used by the state key encoding.
    pub(crate) fn digit(self) -> u64 {
        match self {
            Cell::Empty => 0,
            Cell::X => 1,
            Cell::O => 2,
        }
    }

    pub(crate) fn from_digit(digit: u64) -> Option<Cell> {
        match digit {
            0 => Some(Cell::Empty),
            1 => Some(Cell::X),
            2 => Some(Cell::O),
            _ => None,
        }
    }
}

/// A player in the game
///
/// Deserializes from any [`Marker`] naming a player, so `"X"`, `"red"` and `1`
/// all select [`Player::X`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Marker")]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl FromStr for Player {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" | "1" | "red" => Ok(Player::X),
            "o" | "2" | "yellow" => Ok(Player::O),
            _ => Err(Error::InvalidPlayer {
                player: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// A cell marker as sent by a client: a string, a numeric code, or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Marker {
    Code(u8),
    Text(String),
}

impl Marker {
    /// Interpret an optional marker as a cell; `None`, `""` and `0` are empty.
    pub fn to_cell(marker: Option<&Marker>, position: usize) -> Result<Cell> {
        let invalid = |marker: String| Error::InvalidCell { marker, position };
        match marker {
            None | Some(Marker::Code(0)) => Ok(Cell::Empty),
            Some(Marker::Text(text)) if text.trim().is_empty() => Ok(Cell::Empty),
            Some(Marker::Code(code)) => match *code {
                1 => Ok(Cell::X),
                2 => Ok(Cell::O),
                other => Err(invalid(other.to_string())),
            },
            Some(Marker::Text(text)) => text
                .parse::<Player>()
                .map(Player::to_cell)
                .map_err(|_| invalid(text.clone())),
        }
    }
}

impl TryFrom<Marker> for Player {
    type Error = Error;

    fn try_from(marker: Marker) -> Result<Self> {
        match marker {
            Marker::Code(code) => code.to_string().parse(),
            Marker::Text(text) => text.parse(),
        }
    }
}

/// An immutable rows × cols grid in row-major order; row 0 is the top row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board.
    pub fn empty(rows: usize, cols: usize) -> Result<Self> {
        Self::from_cells(rows, cols, vec![Cell::Empty; rows * cols])
    }

    /// Create a board from row-major cells.
    ///
    /// # Errors
    ///
    /// Returns error if the cell count does not match `rows * cols`, or the
    /// board is larger than [`MAX_CELLS`].
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Result<Self> {
        if rows == 0 || cols == 0 || cells.len() != rows * cols {
            return Err(Error::InvalidBoardShape {
                expected: format!("{rows}x{cols}"),
                got: format!("{} cells", cells.len()),
            });
        }
        if cells.len() > MAX_CELLS {
            return Err(Error::BoardTooLarge {
                cells: cells.len(),
                max: MAX_CELLS,
            });
        }
        Ok(Self { rows, cols, cells })
    }

    /// Parse a board from text such as `"X..|X..|..."`.
    ///
    /// Whitespace, `|`, `/` and `,` are separators and are ignored. Every other
    /// character must be a cell marker (see [`Cell::from_char`]).
    pub fn parse(rows: usize, cols: usize, text: &str) -> Result<Self> {
        let mut cells = Vec::with_capacity(rows * cols);
        for c in text
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '|' | '/' | ','))
        {
            let cell = Cell::from_char(c).ok_or_else(|| Error::InvalidCell {
                marker: c.to_string(),
                position: cells.len(),
            })?;
            cells.push(cell);
        }
        Self::from_cells(rows, cols, cells)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row-major index of (row, col)
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Get cell at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    /// Get cell at a row-major index
    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// Return a copy of this board with one cell replaced.
    #[must_use = "with_cell returns a new board; the original is unchanged"]
    pub(crate) fn with_cell(&self, index: usize, cell: Cell) -> Board {
        let mut next = self.clone();
        next.cells[index] = cell;
        next
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Check if every cell is occupied
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Compact single-line encoding, rows joined by `|`.
    pub fn encode(&self) -> String {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|c| c.to_char()).collect::<String>())
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.chunks(self.cols).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
        }
        Ok(())
    }
}
