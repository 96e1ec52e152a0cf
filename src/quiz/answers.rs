//! Turn Answers
//!
//! Collects every attempt a player makes while a track plays and keeps the
//! best verdict per attribute.

use tracing::debug;

use super::judge::TrackVerdicts;
use super::matcher::{AnswerMatcher, MatchMode, MatchVerdict};
use crate::core::{NormalizedText, TextNormalizer};
use crate::library::Track;

/// Verdicts of a single utterance against a track.
///
/// Track metadata goes through the same corrections as the answer, so a
/// corrected word still matches the metadata it came from.
pub fn match_track(
    normalizer: &TextNormalizer,
    matcher: &AnswerMatcher,
    answer: &str,
    track: &Track,
) -> TrackVerdicts {
    let candidate = normalizer.normalize(answer);

    let artists: Vec<NormalizedText> = track
        .artists
        .iter()
        .map(|a| normalizer.normalize(a))
        .collect();
    let album = match &track.album {
        Some(album) => {
            matcher.compare(&candidate, &normalizer.normalize(album), MatchMode::Ordered)
        }
        None => MatchVerdict::Miss,
    };

    TrackVerdicts {
        artist: matcher.compare_names(&candidate, &artists),
        title: matcher.compare(
            &candidate,
            &normalizer.normalize(&track.title),
            MatchMode::Ordered,
        ),
        album,
    }
}

/// Accumulated attempts for the track currently playing
#[derive(Debug, Clone, Default)]
pub struct TurnAnswers {
    verdicts: TrackVerdicts,
    attempts: usize,
    /// Time of the attempt that last improved a verdict
    hit_elapsed_ms: Option<u64>,
    last_elapsed_ms: u64,
}

impl TurnAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match one attempt and fold it into the best verdicts so far
    pub fn add_attempt(
        &mut self,
        normalizer: &TextNormalizer,
        matcher: &AnswerMatcher,
        track: &Track,
        answer: &str,
        elapsed_ms: u64,
    ) -> TrackVerdicts {
        let verdicts = match_track(normalizer, matcher, answer, track);
        let merged = self.verdicts.merge(verdicts);

        if merged != self.verdicts {
            self.hit_elapsed_ms = Some(elapsed_ms);
        }
        debug!("Attempt {} '{}' -> {:?}", self.attempts + 1, answer, verdicts);

        self.verdicts = merged;
        self.attempts += 1;
        self.last_elapsed_ms = self.last_elapsed_ms.max(elapsed_ms);
        verdicts
    }

    pub fn verdicts(&self) -> TrackVerdicts {
        self.verdicts
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Elapsed time used for the speed bonus: when the best answer was given,
    /// or the last attempt when nothing hit
    pub fn elapsed_ms(&self) -> u64 {
        self.hit_elapsed_ms.unwrap_or(self.last_elapsed_ms)
    }

    /// Every attribute the track has is fully covered, so no further attempt
    /// can earn more points. A combined answer like "halo beyonce" covers the
    /// title without being an exact match for it.
    pub fn is_complete(&self, track: &Track) -> bool {
        let album_done = track.album.is_none() || fully_covered(self.verdicts.album);
        fully_covered(self.verdicts.artist) && fully_covered(self.verdicts.title) && album_done
    }
}

fn fully_covered(verdict: MatchVerdict) -> bool {
    verdict.fraction() >= 1.0
}
