//! Stats command - summarize a saved learning session

use std::io::{self, Write};

use anyhow::{Result, bail};
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::{
        config::SessionArgs,
        output::{format_number, print_kv, print_section, write_json_line},
    },
    game::GameKind,
    q_learning::{RewardSummary, SavedSession},
};

#[derive(Parser, Debug)]
#[command(about = "Show statistics of a saved learning session")]
pub struct StatsArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Print as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStats {
    pub game: GameKind,
    pub states: usize,
    pub epsilon: f64,
    pub rewards: RewardSummary,
}

impl From<&SavedSession> for SessionStats {
    fn from(saved: &SavedSession) -> Self {
        Self {
            game: saved.game,
            states: saved.q_table.len(),
            epsilon: saved.epsilon,
            rewards: saved.reward_log.summary(),
        }
    }
}

pub fn collect(args: &StatsArgs) -> Result<SessionStats> {
    let app = args.session.app();
    match app.saved_session(args.session.game)? {
        Some(saved) => Ok(SessionStats::from(&saved)),
        None => bail!(
            "no saved session at {}",
            app.session_path(args.session.game).display()
        ),
    }
}

fn print_table(stats: &SessionStats) {
    print_section(&format!("Learning session: {}", stats.game));
    print_kv("States", &format_number(stats.states));
    print_kv("Epsilon", &format!("{:.4}", stats.epsilon));
    print_kv("Episodes", &format_number(stats.rewards.entries));
    print_kv("Wins", &format_number(stats.rewards.wins));
    print_kv("Losses", &format_number(stats.rewards.losses));
    print_kv("Ongoing", &format_number(stats.rewards.ongoing));
    print_kv("Total reward", &format!("{:.3}", stats.rewards.total_reward));
    print_kv("Mean reward", &format!("{:.4}", stats.rewards.mean_reward));
}

pub fn execute(args: StatsArgs) -> Result<()> {
    let stats = collect(&args)?;
    if args.json {
        write_json_line(&mut io::stdout().lock(), &stats)?;
    } else {
        print_table(&stats);
        io::stdout().flush()?;
    }
    Ok(())
}
