//! Grid game model: boards, winning lines and move rules

pub mod board;
pub mod lines;
pub mod rules;

pub use board::{Board, Cell, MAX_CELLS, Marker, Player};
pub use lines::{LineSet, TIC_TAC_TOE_LINES};
pub use rules::{GameKind, GameRules, Placement};
