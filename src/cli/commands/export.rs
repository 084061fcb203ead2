//! Export command - write a saved session as CSV

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::info;

use crate::{
    cli::config::SessionArgs,
    export::{write_q_table, write_reward_log},
};

#[derive(Parser, Debug)]
#[command(about = "Export a saved learning session as CSV")]
pub struct ExportArgs {
    /// Table to export
    #[arg(value_enum)]
    pub data: ExportData,

    #[command(flatten)]
    pub session: SessionArgs,

    /// Output file; stdout when omitted
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportData {
    /// One row per learning request
    Rewards,
    /// One row per state and action
    QTable,
}

pub fn execute(args: ExportArgs) -> Result<()> {
    let app = args.session.app();
    let game = args.session.game;
    let Some(saved) = app.saved_session(game)? else {
        bail!("no saved session at {}", app.session_path(game).display());
    };

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match args.data {
        ExportData::Rewards => write_reward_log(&saved.reward_log, writer)?,
        ExportData::QTable => write_q_table(&saved.q_table, saved.rows, saved.cols, writer)?,
    }

    if let Some(path) = &args.output {
        info!(path = %path.display(), data = ?args.data, "exported session");
    }
    Ok(())
}
