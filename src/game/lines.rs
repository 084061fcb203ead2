//! Winning line analysis for grid boards

use super::{Board, Player};

/// Winning line indices on the 3x3 board
pub const TIC_TAC_TOE_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// The set of cell-index lines that win a game.
///
/// Either an explicit list of patterns (tic-tac-toe) or every run of
/// `run_length` cells horizontally, vertically and along both diagonals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSet {
    run_length: usize,
    lines: Vec<Vec<usize>>,
}

impl LineSet {
    /// Lines given as explicit index patterns.
    pub fn fixed<const N: usize>(patterns: &[[usize; N]]) -> Self {
        Self {
            run_length: N,
            lines: patterns.iter().map(|p| p.to_vec()).collect(),
        }
    }

    /// All runs of `run_length` cells on a `rows` × `cols` board.
    ///
    /// A dimension shorter than the run length contributes no lines in that
    /// direction.
    pub fn runs(rows: usize, cols: usize, run_length: usize) -> Self {
        let mut lines = Vec::new();
        if run_length == 0 {
            return Self { run_length, lines };
        }
        let idx = |r: usize, c: usize| r * cols + c;
        let span = run_length - 1;

        if cols >= run_length {
            for r in 0..rows {
                for c in 0..cols - span {
                    lines.push((0..run_length).map(|i| idx(r, c + i)).collect());
                }
            }
        }

        if rows >= run_length {
            for c in 0..cols {
                for r in 0..rows - span {
                    lines.push((0..run_length).map(|i| idx(r + i, c)).collect());
                }
            }
        }

        if rows >= run_length && cols >= run_length {
            // down-right
            for r in 0..rows - span {
                for c in 0..cols - span {
                    lines.push((0..run_length).map(|i| idx(r + i, c + i)).collect());
                }
            }
            // up-right
            for r in span..rows {
                for c in 0..cols - span {
                    lines.push((0..run_length).map(|i| idx(r - i, c + i)).collect());
                }
            }
        }

        Self { run_length, lines }
    }

    pub fn run_length(&self) -> usize {
        self.run_length
    }

    pub fn lines(&self) -> impl Iterator<Item = &[usize]> {
        self.lines.iter().map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Check if a player occupies every cell of some line
    pub fn has_win(&self, board: &Board, player: Player) -> bool {
        let target = player.to_cell();
        let cells = board.cells();
        self.lines
            .iter()
            .any(|line| line.iter().all(|&idx| cells.get(idx) == Some(&target)))
    }
}
