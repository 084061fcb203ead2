//! Application layer: configuration and the dependency injection container.
//!
//! ```text
//!   App ──owns──▶ SessionRepository (MsgPackRepository | InMemoryRepository)
//!    │
//!    └─builds──▶ HeuristicAgent, LearningAgent ──▶ SharedSession
//! ```
//!
//! # Usage
//!
//! ```
//! use gridmind::app::{App, LearningConfig};
//! use gridmind::adapters::InMemoryRepository;
//! use gridmind::game::GameKind;
//!
//! let app = App::for_testing()
//!     .with_repository(InMemoryRepository::new())
//!     .with_default_seed(42)
//!     .build();
//! let config = LearningConfig::for_game(GameKind::TicTacToe);
//! let agent = app.learning_agent(GameKind::TicTacToe, &config)?;
//! # Ok::<(), gridmind::Error>(())
//! ```

pub mod config;
pub mod container;

pub use config::LearningConfig;
pub use container::{App, AppBuilder, DEFAULT_STATE_DIR};
