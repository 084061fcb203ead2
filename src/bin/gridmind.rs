//! gridmind CLI - game-playing agents for tic-tac-toe and gravity four-in-a-row
//!
//! Move responses go to stdout as JSON; logs go to stderr.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridmind")]
#[command(version, about = "Rule-based and Q-learning opponents for grid games", long_about = None)]
struct Cli {
    /// Log decisions and session I/O to stderr (-v info, -vv debug)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose a move for one board
    Decide(Box<gridmind::cli::commands::decide::DecideArgs>),

    /// Answer JSON-lines move requests from stdin
    Pipe(gridmind::cli::commands::pipe::PipeArgs),

    /// Show statistics of a saved session
    Stats(gridmind::cli::commands::stats::StatsArgs),

    /// Export a saved session as CSV
    Export(gridmind::cli::commands::export::ExportArgs),
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Decide(args) => gridmind::cli::commands::decide::execute(*args),
        Commands::Pipe(args) => gridmind::cli::commands::pipe::execute(args),
        Commands::Stats(args) => gridmind::cli::commands::stats::execute(args),
        Commands::Export(args) => gridmind::cli::commands::export::execute(args),
    }
}
