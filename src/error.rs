//! Error types for the gridmind crate

use thiserror::Error;

/// Main error type for the gridmind crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move: action {action} is not playable on this board")]
    IllegalMove { action: usize },

    #[error("no legal actions available: board is full")]
    NoLegalActions,

    #[error("invalid board shape: expected {expected}, got {got}")]
    InvalidBoardShape { expected: String, got: String },

    #[error("invalid cell marker '{marker}' at position {position}")]
    InvalidCell { marker: String, position: usize },

    #[error("floating piece at row {row}, column {col}: cell below is empty")]
    FloatingPiece { row: usize, col: usize },

    #[error("board of {cells} cells exceeds the state key capacity of {max} cells")]
    BoardTooLarge { cells: usize, max: usize },

    #[error("invalid player '{player}' (expected 'X' or 'O')")]
    InvalidPlayer { player: String },

    #[error("unknown game '{input}'. Expected one of: {expected}")]
    UnknownGame { input: String, expected: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("reward log episode {got} out of order (expected {expected})")]
    EpisodeOutOfOrder { expected: u64, got: u64 },

    #[error("incompatible saved session: {message}")]
    IncompatibleSnapshot { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
