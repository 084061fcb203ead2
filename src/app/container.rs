//! Dependency injection container.
//!
//! The container owns the session repository and the state directory and
//! builds agents wired to them.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::info;

use super::config::LearningConfig;
use crate::{
    Result,
    adapters::MsgPackRepository,
    agents::{HeuristicAgent, LearningAgent},
    game::{GameKind, GameRules},
    ports::SessionRepository,
    q_learning::{LearningSession, SavedSession, SharedSession},
};

/// Default directory for saved sessions
pub const DEFAULT_STATE_DIR: &str = ".gridmind";

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```no_run
/// use gridmind::app::{App, LearningConfig};
/// use gridmind::game::GameKind;
///
/// let app = App::new().with_state_dir("state");
/// let config = LearningConfig::for_game(GameKind::ConnectFour);
/// let agent = app.learning_agent(GameKind::ConnectFour, &config)?;
/// # Ok::<(), gridmind::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use gridmind::app::App;
/// use gridmind::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    repository: Arc<dyn SessionRepository + Send + Sync>,
    state_dir: PathBuf,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create an app with `MsgPackRepository` under [`DEFAULT_STATE_DIR`].
    pub fn new() -> Self {
        Self {
            repository: Arc::new(MsgPackRepository::new()),
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            default_seed: None,
        }
    }

    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn with_state_dir(mut self, state_dir: impl Into<PathBuf>) -> Self {
        self.state_dir = state_dir.into();
        self
    }

    pub fn repository(&self) -> Arc<dyn SessionRepository + Send + Sync> {
        Arc::clone(&self.repository)
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    /// `<state_dir>/<game>_session.msgpack`
    pub fn session_path(&self, kind: GameKind) -> PathBuf {
        self.state_dir
            .join(format!("{}_session.msgpack", kind.file_stem()))
    }

    fn seeded(&self, config: &LearningConfig) -> LearningConfig {
        match (config.seed, self.default_seed) {
            (None, Some(seed)) => config.clone().with_seed(seed),
            _ => config.clone(),
        }
    }

    /// The stored session for a game, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored session exists but cannot be read or was
    /// saved for different rules.
    pub fn saved_session(&self, kind: GameKind) -> Result<Option<SavedSession>> {
        let path = self.session_path(kind);
        if !self.repository.exists(&path) {
            return Ok(None);
        }
        let saved = self.repository.load(&path)?;
        saved.ensure_compatible(&GameRules::for_kind(kind))?;
        info!(path = %path.display(), "loaded session");
        Ok(Some(saved))
    }

    /// Load the saved session for a game, or start an empty one.
    ///
    /// # Errors
    ///
    /// See [`saved_session`](Self::saved_session); also fails if `config` is
    /// invalid.
    pub fn open_session(&self, kind: GameKind, config: &LearningConfig) -> Result<LearningSession> {
        let rules = GameRules::for_kind(kind);
        let config = self.seeded(config);

        match self.saved_session(kind)? {
            Some(saved) => LearningSession::restore(rules, &config, saved),
            None => {
                info!(path = %self.session_path(kind).display(), "starting new session");
                LearningSession::new(rules, &config)
            }
        }
    }

    /// A Q-learning agent backed by the game's saved session.
    pub fn learning_agent(&self, kind: GameKind, config: &LearningConfig) -> Result<LearningAgent> {
        let session = self.open_session(kind, config)?;
        Ok(LearningAgent::new(
            SharedSession::new(session),
            self.repository(),
            self.session_path(kind),
        ))
    }

    pub fn heuristic_agent(&self, kind: GameKind, seed: Option<u64>) -> HeuristicAgent {
        let rules = GameRules::for_kind(kind);
        match seed.or(self.default_seed) {
            Some(seed) => HeuristicAgent::with_seed(rules, seed),
            None => HeuristicAgent::new(rules),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing an app with custom dependencies.
pub struct AppBuilder {
    repository: Option<Arc<dyn SessionRepository + Send + Sync>>,
    state_dir: Option<PathBuf>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            repository: None,
            state_dir: None,
            default_seed: None,
        }
    }

    pub fn with_repository<R: SessionRepository + Send + Sync + 'static>(mut self, repo: R) -> Self {
        self.repository = Some(Arc::new(repo));
        self
    }

    pub fn with_state_dir(mut self, state_dir: impl Into<PathBuf>) -> Self {
        self.state_dir = Some(state_dir.into());
        self
    }

    /// Seed used by every agent whose config has none
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app. Falls back to `MsgPackRepository` and [`DEFAULT_STATE_DIR`].
    pub fn build(self) -> App {
        App {
            repository: self
                .repository
                .unwrap_or_else(|| Arc::new(MsgPackRepository::new())),
            state_dir: self
                .state_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR)),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
