//! SongQuiz Error Types
//!
//! Centralized error handling for the quiz engine and its collaborators.

use thiserror::Error;

/// Central error type for SongQuiz
#[derive(Error, Debug)]
pub enum QuizError {
    #[error("A game needs at least one player, got {0}")]
    InvalidPlayerCount(usize),

    #[error("Quiz type '{0}' must have at least one round")]
    InvalidRoundCount(String),

    #[error("Game is already finished, no further results can be recorded")]
    GameFinished,

    #[error("Game is still running, statistics need a finished game")]
    GameNotFinished,

    #[error("No turn in progress, start one before answering")]
    NoActiveTurn,

    #[error("Unknown quiz type: {0}")]
    UnknownQuizType(String),

    #[error("Playlist '{0}' has no tracks left to play")]
    PlaylistExhausted(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for SongQuiz operations
pub type QuizResult<T> = Result<T, QuizError>;
