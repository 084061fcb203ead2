//! CSV export of a saved learning session
//!
//! Two tables can be written: the reward log, one row per learning request,
//! and the Q-table, one row per (state, action) slot with the state decoded
//! back into board text.

use std::io::Write;

use serde::Serialize;

use crate::{
    Result,
    q_learning::{Outcome, QTable, RewardLog},
};

/// A single row of the reward log export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardRecord {
    pub episode: u64,
    pub reward: f64,
    pub outcome: Outcome,
    /// Mean reward over this and all earlier episodes
    pub running_mean: f64,
}

/// A single row of the Q-table export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QValueRecord {
    pub state: u64,
    pub board: String,
    pub action: usize,
    pub q_value: f64,
}

/// Write the reward log as CSV with a header row.
pub fn write_reward_log<W: Write>(log: &RewardLog, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    let mut total = 0.0;
    for (i, entry) in log.entries().iter().enumerate() {
        total += entry.reward;
        csv.serialize(RewardRecord {
            episode: entry.episode,
            reward: entry.reward,
            outcome: entry.outcome,
            running_mean: total / (i + 1) as f64,
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Write every Q-value slot as CSV, states in ascending key order.
///
/// `rows` and `cols` give the board shape used to decode state keys.
pub fn write_q_table<W: Write>(table: &QTable, rows: usize, cols: usize, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for (state, values) in table.sorted_entries() {
        let board = state.decode(rows, cols)?.encode();
        for (action, &q_value) in values.iter().enumerate() {
            csv.serialize(QValueRecord {
                state: state.value(),
                board: board.clone(),
                action,
                q_value,
            })?;
        }
    }
    csv.flush()?;
    Ok(())
}
