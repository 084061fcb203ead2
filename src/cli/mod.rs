//! CLI infrastructure for the gridmind binary
//!
//! Commands serve single move requests, stream requests over stdin, and
//! inspect or export saved learning sessions.

pub mod commands;
pub mod config;
pub mod output;
