//! Agent implementations behind the [`Agent`](crate::ports::Agent) port

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{info, warn};

use crate::{
    Error, Result,
    game::{Board, GameRules, Player},
    heuristic::HeuristicPolicy,
    ports::{Agent, LearningReport, MoveChoice, SessionRepository},
    q_learning::SharedSession,
};

/// Rule-based agent: win, else block, else a random legal move
#[derive(Debug, Clone)]
pub struct HeuristicAgent {
    rules: GameRules,
    policy: HeuristicPolicy,
}

impl HeuristicAgent {
    pub fn new(rules: GameRules) -> Self {
        Self {
            rules,
            policy: HeuristicPolicy::new(),
        }
    }

    pub fn with_seed(rules: GameRules, seed: u64) -> Self {
        Self {
            rules,
            policy: HeuristicPolicy::with_seed(seed),
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }
}

impl Agent for HeuristicAgent {
    fn select_move(&mut self, board: &Board, player: Player) -> Result<MoveChoice> {
        self.rules.validate(board)?;
        let action = self.policy.choose_move(&self.rules, board, player)?;
        let (row, col) = self
            .rules
            .landing(board, action)
            .ok_or(Error::IllegalMove { action })?;
        Ok(MoveChoice {
            action,
            row,
            col,
            learning: None,
        })
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}

/// Q-learning agent that persists its session after every move
pub struct LearningAgent {
    session: SharedSession,
    repository: Arc<dyn SessionRepository + Send + Sync>,
    path: PathBuf,
}

impl LearningAgent {
    pub fn new(
        session: SharedSession,
        repository: Arc<dyn SessionRepository + Send + Sync>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            session,
            repository,
            path: path.into(),
        }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Agent for LearningAgent {
    /// Decide, learn and persist under one lock acquisition.
    ///
    /// A failed save is logged and reported as `persisted: false`; the
    /// in-memory update is kept.
    fn select_move(&mut self, board: &Board, player: Player) -> Result<MoveChoice> {
        let repository = &self.repository;
        let path = &self.path;
        self.session.with_lock(|session| {
            let decision = session.decide(board, player)?;
            let persisted = match repository.save(&session.to_saved(), path) {
                Ok(()) => {
                    info!(path = %path.display(), episode = decision.episode, "saved session");
                    true
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "failed to persist session");
                    false
                }
            };
            Ok(MoveChoice {
                action: decision.action,
                row: decision.row,
                col: decision.col,
                learning: Some(LearningReport {
                    reward: decision.reward,
                    outcome: decision.outcome,
                    episode: decision.episode,
                    epsilon: decision.epsilon,
                    selection: decision.selection,
                    persisted,
                }),
            })
        })
    }

    fn name(&self) -> &str {
        "q-learning"
    }
}
