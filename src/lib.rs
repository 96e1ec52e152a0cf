//! SongQuiz Library
//!
//! Answer normalization, fuzzy matching and scoring for a turn-based song
//! trivia game, plus the collaborators needed to run one from the CLI.

pub mod audit;
pub mod config;
pub mod core;
pub mod error;
pub mod library;
pub mod quiz;
pub mod session;
pub mod stats;
pub mod utils;
