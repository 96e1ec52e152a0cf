//! Quiz scoring engine
//!
//! Matching answers against track metadata, judging points, and the
//! turn/round state machine of a game.

pub mod answers;
pub mod judge;
pub mod matcher;
pub mod quiz_type;
pub mod standing;

pub use answers::{match_track, TurnAnswers};
pub use judge::{RoundJudge, TrackOutcome, TrackVerdicts, DEFAULT_ANSWER_WINDOW_MS};
pub use matcher::{AnswerMatcher, MatchMode, MatchVerdict, DEFAULT_FUZZY_THRESHOLD};
pub use quiz_type::QuizType;
pub use standing::{PlayedTurn, QuizStanding, StandingState};
