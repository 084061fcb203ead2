//! Ports (trait boundaries) for external dependencies.
//!
//! These traits are owned by the domain and implemented by the agents and
//! storage adapters.

pub mod agent;
pub mod repository;

pub use agent::{Agent, LearningReport, MoveChoice};
pub use repository::SessionRepository;
