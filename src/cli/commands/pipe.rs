//! Pipe command - serve JSON-lines move requests from stdin
//!
//! One agent serves every request, so a learning agent keeps its session in
//! memory and ε decays across requests.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use tracing::{debug, warn};

use crate::{
    Error,
    cli::{
        commands::decide::create_agent,
        config::{AgentKind, SessionArgs},
        output::write_json_line,
    },
    game::GameRules,
    ports::Agent,
    request::{ErrorResponse, MoveRequest, MoveResponse},
};

#[derive(Parser, Debug)]
#[command(about = "Answer JSON-lines move requests read from stdin")]
pub struct PipeArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Agent that picks the moves
    #[arg(long, short = 'a', value_enum, default_value = "q-learning")]
    pub agent: AgentKind,
}

/// Counts of what a pipe run served
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipeSummary {
    pub answered: usize,
    pub failed: usize,
}

fn answer(agent: &mut dyn Agent, rules: &GameRules, line: &str) -> crate::Result<MoveResponse> {
    let request = MoveRequest::parse_json(line)?;
    let board = request.board.to_board(rules)?;
    agent.select_move(&board, request.player)
}

/// Serve every line of `input`, writing one JSON reply per request.
///
/// Blank lines are skipped. A request that fails gets an [`ErrorResponse`]
/// line and the loop continues.
pub fn run<R: BufRead, W: Write>(args: &PipeArgs, input: R, out: &mut W) -> Result<PipeSummary> {
    let app = args.session.app();
    let rules = GameRules::for_kind(args.session.game);
    let mut agent = create_agent(&app, &args.session, args.agent)?;
    let mut summary = PipeSummary::default();

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match answer(agent.as_mut(), &rules, &line) {
            Ok(response) => {
                debug!(action = response.action, "answered request");
                write_json_line(out, &response)?;
                summary.answered += 1;
            }
            Err(err) => {
                if !matches!(err, Error::NoLegalActions) {
                    warn!(error = %err, "request failed");
                }
                write_json_line(out, &ErrorResponse::from(&err))?;
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

pub fn execute(args: PipeArgs) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&args, stdin.lock(), &mut stdout.lock())?;
    Ok(())
}
