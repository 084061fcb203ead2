//! Common helpers for the gridmind test suite.

#![allow(dead_code)]

use gridmind::{Board, GameRules};

pub fn ttt(text: &str) -> Board {
    GameRules::tic_tac_toe()
        .parse_board(text)
        .expect("valid tic-tac-toe board")
}

pub fn c4(text: &str) -> Board {
    GameRules::connect_four()
        .parse_board(text)
        .expect("valid connect-four board")
}
