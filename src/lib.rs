//! Game-playing agents for tic-tac-toe and gravity four-in-a-row
//!
//! This crate provides:
//! - Board model, winning-line detection and move rules for both games
//! - A rule-based opponent (win, else block, else random)
//! - A tabular Q-learning opponent that learns one step per request and
//!   persists its table, reward log and exploration rate
//! - A CLI that serves single requests, JSON-lines streams, and session
//!   statistics or CSV exports

pub mod adapters;
pub mod agents;
pub mod app;
pub mod cli;
pub mod error;
pub mod export;
pub mod game;
pub mod heuristic;
pub mod ports;
pub mod q_learning;
pub mod request;
pub mod types;

pub use error::{Error, Result};
pub use game::{Board, GameKind, GameRules, Player};
pub use types::{Action, StateKey};
