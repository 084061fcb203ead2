//! Decide command - answer one move request

use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;

use crate::{
    Error,
    app::App,
    cli::{
        config::{AgentKind, SessionArgs},
        output::write_json_line,
    },
    game::{GameRules, Player},
    ports::Agent,
    request::{BoardInput, MoveRequest, MoveResponse},
};

#[derive(Parser, Debug)]
#[command(about = "Choose a move for one board")]
pub struct DecideArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Agent that picks the move
    #[arg(long, short = 'a', value_enum, default_value = "q-learning")]
    pub agent: AgentKind,

    /// Board as text, rows separated by '|' (e.g. "X..|.O.|...")
    #[arg(long, short = 'b', conflicts_with = "request")]
    pub board: Option<String>,

    /// JSON move request file, '-' reads stdin
    #[arg(long, short = 'r')]
    pub request: Option<PathBuf>,

    /// Side to move; overrides the request's player
    #[arg(long, short = 'p')]
    pub player: Option<Player>,
}

fn read_request(path: &Path) -> Result<MoveRequest> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read request from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read request file {}", path.display()))?
    };
    MoveRequest::parse_json(&text).context("invalid move request")
}

fn build_request(args: &DecideArgs) -> Result<MoveRequest> {
    let mut request = match (&args.request, &args.board) {
        (Some(path), _) => read_request(path)?,
        (None, Some(text)) => MoveRequest {
            board: BoardInput::Text(text.clone()),
            player: args
                .player
                .ok_or_else(|| anyhow!("--player is required with --board"))?,
        },
        (None, None) => bail!("either --board or --request is required"),
    };
    if let Some(player) = args.player {
        request.player = player;
    }
    Ok(request)
}

/// Build the agent selected by `kind` for `game`.
pub(crate) fn create_agent(app: &App, session: &SessionArgs, kind: AgentKind) -> Result<Box<dyn Agent>> {
    Ok(match kind {
        AgentKind::Heuristic => Box::new(app.heuristic_agent(session.game, session.seed)),
        AgentKind::QLearning => {
            let config = session.learning_config()?;
            Box::new(
                app.learning_agent(session.game, &config)
                    .with_context(|| format!("failed to open {} session", session.game))?,
            )
        }
    })
}

/// Answer one request and return the response that was written to `out`.
pub fn run<W: Write>(args: &DecideArgs, out: &mut W) -> Result<MoveResponse> {
    let request = build_request(args)?;
    let rules = GameRules::for_kind(args.session.game);
    let board = request.board.to_board(&rules)?;

    let app = args.session.app();
    let mut agent = create_agent(&app, &args.session, args.agent)?;

    let response = match agent.select_move(&board, request.player) {
        Ok(response) => response,
        Err(Error::NoLegalActions) => bail!("board full: the game is over, no legal moves remain"),
        Err(err) => return Err(err.into()),
    };
    write_json_line(out, &response)?;
    Ok(response)
}

pub fn execute(args: DecideArgs) -> Result<()> {
    let stdout = io::stdout();
    run(&args, &mut stdout.lock())?;
    Ok(())
}
