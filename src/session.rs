//! Game Session
//!
//! Ties one game together: the track queue, answer matching, judging and the
//! standing. A session is driven by a single task, so every call into the
//! standing is serialized.

use async_trait::async_trait;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::TextNormalizer;
use crate::error::{QuizError, QuizResult};
use crate::library::{Playlist, Track, TrackQueue};
use crate::quiz::{
    AnswerMatcher, PlayedTurn, QuizStanding, QuizType, RoundJudge, TrackVerdicts, TurnAnswers,
};

/// Supplies raw answers (speech recognizer output, typed lines, ...)
#[async_trait]
pub trait AnswerSource: Send {
    /// Next answer, or None once the input is closed
    async fn next_answer(&mut self) -> Option<String>;
}

/// Answers read line by line from any async reader (stdin in the CLI)
pub struct LineAnswers<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin + Send> LineAnswers<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> AnswerSource for LineAnswers<R> {
    async fn next_answer(&mut self) -> Option<String> {
        self.lines.next_line().await.ok().flatten()
    }
}

/// What happened on one turn
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub track: Track,
    pub turn: PlayedTurn,
}

/// One game from first track to final standing
#[derive(Debug)]
pub struct GameSession {
    quiz_type: Arc<QuizType>,
    players: Vec<String>,
    standing: QuizStanding,
    queue: TrackQueue,
    normalizer: TextNormalizer,
    matcher: AnswerMatcher,
    judge: RoundJudge,
    rng: StdRng,
    current: Option<(Track, TurnAnswers)>,
}

impl GameSession {
    pub fn new(
        config: &Config,
        quiz_type: Arc<QuizType>,
        players: Vec<String>,
        playlist: Playlist,
        mut rng: StdRng,
    ) -> QuizResult<Self> {
        let standing = QuizStanding::new(players.len(), &quiz_type)?;
        let queue = TrackQueue::new(playlist, quiz_type.repeat_allowed, &mut rng);

        info!(
            "🎮 New '{}' game: {} players, {} rounds, {} tracks, up to {} points a turn",
            quiz_type.name,
            players.len(),
            quiz_type.num_rounds,
            queue.len(),
            quiz_type.max_points_per_turn()
        );
        if queue.is_empty() {
            warn!("Playlist is empty, the first turn will fail");
        }

        Ok(Self {
            standing,
            queue,
            normalizer: TextNormalizer::new(config.voice_corrections.clone()),
            matcher: AnswerMatcher::new(config.fuzzy_threshold),
            judge: RoundJudge::new(config.answer_window_ms),
            quiz_type,
            players,
            rng,
            current: None,
        })
    }

    /// Draw the next track for the current player.
    ///
    /// Calling this while a turn is running returns the running turn's track.
    pub fn start_turn(&mut self) -> QuizResult<&Track> {
        if self.standing.is_finished() {
            return Err(QuizError::GameFinished);
        }
        if self.current.is_none() {
            let track = self.queue.next_track(&mut self.rng)?.clone();
            debug!(
                "Round {} player {}: {} ({:?} left)",
                self.standing.current_round_display_index(),
                self.standing.current_player_display_index(),
                track.display(),
                self.queue.remaining()
            );
            self.current = Some((track, TurnAnswers::new()));
        }
        self.current
            .as_ref()
            .map(|(track, _)| track)
            .ok_or(QuizError::NoActiveTurn)
    }

    /// Match an answer for the running turn
    pub fn submit_answer(&mut self, answer: &str, elapsed_ms: u64) -> QuizResult<TrackVerdicts> {
        let (track, answers) = self.current.as_mut().ok_or(QuizError::NoActiveTurn)?;
        Ok(answers.add_attempt(&self.normalizer, &self.matcher, track, answer, elapsed_ms))
    }

    /// Whether the running turn has nothing left to guess
    pub fn turn_complete(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|(track, answers)| answers.is_complete(track))
    }

    /// Judge the running turn and record it in the standing
    pub fn finish_turn(&mut self) -> QuizResult<TurnReport> {
        let (track, answers) = self.current.take().ok_or(QuizError::NoActiveTurn)?;
        let outcome = self
            .judge
            .outcome(answers.verdicts(), answers.elapsed_ms(), &self.quiz_type);

        self.standing.record_outcome(outcome)?;
        let turn = self
            .standing
            .history()
            .last()
            .cloned()
            .ok_or(QuizError::NoActiveTurn)?;

        info!(
            "🎵 {} scored {} on '{}'",
            self.players[turn.player], turn.outcome.points, track.title
        );
        Ok(TurnReport { track, turn })
    }

    /// Play a whole turn: draw a track, collect answers until the player has
    /// named everything, the input closes, or the answer window runs out.
    pub async fn play_turn<S: AnswerSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> QuizResult<TurnReport> {
        self.start_turn()?;

        let window = Duration::from_millis(self.judge.answer_window_ms());
        let started = Instant::now();

        loop {
            let remaining = window.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                debug!("Answer window closed");
                break;
            }

            match tokio::time::timeout(remaining, source.next_answer()).await {
                Ok(Some(answer)) => {
                    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                    self.submit_answer(&answer, elapsed_ms)?;
                    if self.turn_complete() {
                        break;
                    }
                }
                Ok(None) => {
                    debug!("Answer source closed");
                    break;
                }
                Err(_) => {
                    debug!("Answer window closed");
                    break;
                }
            }
        }

        self.finish_turn()
    }

    /// Start over with the same players and rules
    pub fn reset(&mut self) {
        self.current = None;
        self.standing.reset_game();
    }

    pub fn standing(&self) -> &QuizStanding {
        &self.standing
    }

    pub fn quiz_type(&self) -> &QuizType {
        &self.quiz_type
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn current_player_name(&self) -> &str {
        &self.players[self.standing.current_player()]
    }

    /// Tracks left before the playlist runs dry (None when repeats are allowed)
    pub fn tracks_remaining(&self) -> Option<usize> {
        self.queue.remaining()
    }

    pub fn is_finished(&self) -> bool {
        self.standing.is_finished()
    }
}
