//! Round Judge
//!
//! Turns the verdicts for one played track into points for the current player.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::matcher::MatchVerdict;
use super::quiz_type::QuizType;

/// Default time a player has to answer before the speed bonus runs out
pub const DEFAULT_ANSWER_WINDOW_MS: u64 = 30_000;

/// Per-attribute verdicts for one track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackVerdicts {
    pub artist: MatchVerdict,
    pub title: MatchVerdict,
    pub album: MatchVerdict,
}

impl Default for TrackVerdicts {
    fn default() -> Self {
        Self {
            artist: MatchVerdict::Miss,
            title: MatchVerdict::Miss,
            album: MatchVerdict::Miss,
        }
    }
}

impl TrackVerdicts {
    pub fn any_hit(&self) -> bool {
        self.artist.is_hit() || self.title.is_hit() || self.album.is_hit()
    }

    /// Keep the stronger verdict for every attribute
    pub fn merge(self, other: Self) -> Self {
        Self {
            artist: self.artist.best(other.artist),
            title: self.title.best(other.title),
            album: self.album.best(other.album),
        }
    }
}

/// The judged result of one track, handed to the standing and the outcome log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackOutcome {
    pub verdicts: TrackVerdicts,
    pub elapsed_ms: u64,
    pub points: u32,
}

/// Scores verdicts against a quiz type
#[derive(Debug, Clone, Copy)]
pub struct RoundJudge {
    answer_window_ms: u64,
}

impl Default for RoundJudge {
    fn default() -> Self {
        Self::new(DEFAULT_ANSWER_WINDOW_MS)
    }
}

impl RoundJudge {
    pub fn new(answer_window_ms: u64) -> Self {
        Self { answer_window_ms }
    }

    pub fn answer_window_ms(&self) -> u64 {
        self.answer_window_ms
    }

    /// Points for one track. Never fails; all misses score 0.
    pub fn judge(&self, verdicts: &TrackVerdicts, elapsed_ms: u64, quiz_type: &QuizType) -> u32 {
        let base = attribute_points(verdicts.artist, quiz_type.point_for_artist)
            .saturating_add(attribute_points(verdicts.title, quiz_type.point_for_title))
            .saturating_add(attribute_points(verdicts.album, quiz_type.point_for_album));

        let bonus = if verdicts.any_hit() {
            self.speed_bonus(elapsed_ms, quiz_type.point_for_speed)
        } else {
            0
        };

        debug!(
            "Judged {:?} at {}ms: base={} bonus={}",
            verdicts, elapsed_ms, base, bonus
        );
        base.saturating_add(bonus)
    }

    /// Judge and package the result
    pub fn outcome(&self, verdicts: TrackVerdicts, elapsed_ms: u64, quiz_type: &QuizType) -> TrackOutcome {
        TrackOutcome {
            points: self.judge(&verdicts, elapsed_ms, quiz_type),
            verdicts,
            elapsed_ms,
        }
    }

    /// Linear falloff from the full bonus at 0ms to nothing at the window edge
    fn speed_bonus(&self, elapsed_ms: u64, point_for_speed: u32) -> u32 {
        if point_for_speed == 0 || elapsed_ms >= self.answer_window_ms {
            return 0;
        }
        let remaining = self.answer_window_ms - elapsed_ms;
        let bonus = u64::from(point_for_speed) * remaining / self.answer_window_ms;
        u32::try_from(bonus).unwrap_or(point_for_speed)
    }
}

/// Slack for fractions averaged in floating point, which can land a hair
/// below the true ratio (7/12 of 12 must still be 7)
const FRACTION_EPSILON: f64 = 1e-9;

fn attribute_points(verdict: MatchVerdict, full: u32) -> u32 {
    match verdict {
        MatchVerdict::Exact => full,
        MatchVerdict::Partial(fraction) => {
            let share = f64::from(full) * fraction.clamp(0.0, 1.0) + FRACTION_EPSILON;
            (share.floor() as u32).min(full)
        }
        MatchVerdict::Miss => 0,
    }
}
