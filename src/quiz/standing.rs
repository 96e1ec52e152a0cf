//! Quiz Standing
//!
//! Turn, round and score progression for one game session.

use serde::Serialize;
use tracing::{debug, info};

use super::judge::TrackOutcome;
use super::quiz_type::QuizType;
use crate::error::{QuizError, QuizResult};

/// Lifecycle state of a standing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StandingState {
    Active,
    Finished,
}

/// One recorded turn, kept for statistics and the outcome log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayedTurn {
    pub player: usize,
    pub round: usize,
    pub outcome: TrackOutcome,
}

/// Scores and turn order for a game. Owned by exactly one session.
#[derive(Debug, Clone, Serialize)]
pub struct QuizStanding {
    num_players: usize,
    num_rounds: usize,
    current_player: usize,
    current_round: usize,
    scores: Vec<u32>,
    current_track_index: usize,
    is_finished: bool,
    history: Vec<PlayedTurn>,
}

impl QuizStanding {
    /// Create a standing in the `Active` state
    pub fn new(num_players: usize, quiz_type: &QuizType) -> QuizResult<Self> {
        if num_players == 0 {
            return Err(QuizError::InvalidPlayerCount(num_players));
        }
        quiz_type.validate()?;

        let mut standing = Self {
            num_players,
            num_rounds: quiz_type.num_rounds,
            current_player: 0,
            current_round: 0,
            scores: vec![0; num_players],
            current_track_index: 0,
            is_finished: false,
            history: Vec::new(),
        };
        standing.reset_game();
        Ok(standing)
    }

    /// Start over with the same players and rounds
    pub fn reset_game(&mut self) {
        self.scores.iter_mut().for_each(|s| *s = 0);
        self.current_player = 0;
        self.current_round = 0;
        self.current_track_index = 0;
        self.is_finished = false;
        self.history.clear();
        debug!(
            "Standing reset: {} players, {} rounds",
            self.num_players, self.num_rounds
        );
    }

    /// Credit the current player and move to the next turn
    ///
    /// Fails with `GameFinished` once the last turn has been recorded; state
    /// is left untouched in that case.
    pub fn record_result(&mut self, points: u32) -> QuizResult<()> {
        if self.is_finished {
            return Err(QuizError::GameFinished);
        }

        self.current_track_index += 1;
        self.scores[self.current_player] = self.scores[self.current_player].saturating_add(points);
        debug!(
            "Player {} scored {} (total {})",
            self.current_player + 1,
            points,
            self.scores[self.current_player]
        );

        self.current_player = (self.current_player + 1) % self.num_players;
        if self.current_player == 0 {
            self.current_round += 1;
        }

        if self.current_round >= self.num_rounds {
            self.is_finished = true;
            self.current_round = self.num_rounds - 1;
            info!("🏁 Game finished after {} tracks", self.current_track_index);
        }
        Ok(())
    }

    /// Keep the outcome in the history, then record its points
    pub fn record_outcome(&mut self, outcome: TrackOutcome) -> QuizResult<()> {
        if self.is_finished {
            return Err(QuizError::GameFinished);
        }
        let turn = PlayedTurn {
            player: self.current_player,
            round: self.current_round,
            outcome,
        };
        let points = turn.outcome.points;
        self.history.push(turn);
        self.record_result(points)
    }

    pub fn state(&self) -> StandingState {
        if self.is_finished {
            StandingState::Finished
        } else {
            StandingState::Active
        }
    }

    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    pub fn num_players(&self) -> usize {
        self.num_players
    }

    pub fn num_rounds(&self) -> usize {
        self.num_rounds
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn current_round(&self) -> usize {
        self.current_round
    }

    pub fn current_track_index(&self) -> usize {
        self.current_track_index
    }

    /// 1-based player number for display
    pub fn current_player_display_index(&self) -> usize {
        self.current_player + 1
    }

    /// 1-based round number for display, never above `num_rounds`
    pub fn current_round_display_index(&self) -> usize {
        self.current_round + 1
    }

    pub fn current_player_score(&self) -> u32 {
        self.scores[self.current_player]
    }

    /// Scores indexed by player
    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn history(&self) -> &[PlayedTurn] {
        &self.history
    }

    /// Players holding the top score; more than one means a tie
    pub fn leaders(&self) -> Vec<usize> {
        let best = self.scores.iter().copied().max().unwrap_or(0);
        self.scores
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s == best)
            .map(|(i, _)| i)
            .collect()
    }
}
