//! Data export for offline analysis

mod session_csv;

pub use session_csv::{QValueRecord, RewardRecord, write_q_table, write_reward_log};
