//! Subcommands of the gridmind binary

pub mod decide;
pub mod export;
pub mod pipe;
pub mod stats;
