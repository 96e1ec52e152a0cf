//! Quiz Types
//!
//! A quiz type is a named ruleset: how many rounds, what each attribute is
//! worth and whether a track may come up twice.

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, QuizResult};

/// Named ruleset for a game session. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizType {
    pub name: String,
    pub num_rounds: usize,
    pub point_for_artist: u32,
    pub point_for_title: u32,
    pub point_for_album: u32,
    pub point_for_speed: u32,
    pub repeat_allowed: bool,
}

impl QuizType {
    /// Build a quiz type, rejecting rulesets without rounds
    pub fn new(
        name: &str,
        num_rounds: usize,
        point_for_artist: u32,
        point_for_title: u32,
        point_for_album: u32,
        point_for_speed: u32,
        repeat_allowed: bool,
    ) -> QuizResult<Self> {
        let quiz_type = Self {
            name: name.to_string(),
            num_rounds,
            point_for_artist,
            point_for_title,
            point_for_album,
            point_for_speed,
            repeat_allowed,
        };
        quiz_type.validate()?;
        Ok(quiz_type)
    }

    /// Check invariants on a value that came from config
    pub fn validate(&self) -> QuizResult<()> {
        if self.num_rounds == 0 {
            return Err(QuizError::InvalidRoundCount(self.name.clone()));
        }
        Ok(())
    }

    /// Highest score a single turn can reach (all attributes plus full speed bonus)
    pub fn max_points_per_turn(&self) -> u32 {
        self.point_for_artist
            .saturating_add(self.point_for_title)
            .saturating_add(self.point_for_album)
            .saturating_add(self.point_for_speed)
    }

    /// The rulesets shipped with the default config
    pub fn builtin() -> Vec<Self> {
        vec![
            Self {
                name: "Classic".to_string(),
                num_rounds: 5,
                point_for_artist: 5,
                point_for_title: 10,
                point_for_album: 0,
                point_for_speed: 0,
                repeat_allowed: false,
            },
            Self {
                name: "Speed Round".to_string(),
                num_rounds: 10,
                point_for_artist: 5,
                point_for_title: 5,
                point_for_album: 0,
                point_for_speed: 10,
                repeat_allowed: false,
            },
            Self {
                name: "Album Expert".to_string(),
                num_rounds: 5,
                point_for_artist: 3,
                point_for_title: 5,
                point_for_album: 10,
                point_for_speed: 2,
                repeat_allowed: true,
            },
        ]
    }
}
