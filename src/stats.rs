//! Profile Statistics
//!
//! Aggregates per-player results of finished games and persists them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

use crate::error::{QuizError, QuizResult};
use crate::quiz::QuizStanding;

/// Lifetime numbers for one player profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileStats {
    pub games_played: u32,
    pub wins: u32,
    pub ties: u32,
    pub artist_hits: u32,
    pub title_hits: u32,
    pub album_hits: u32,
    pub total_points: u64,
}

/// Stats for every known profile, keyed by profile name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsBook {
    pub profiles: BTreeMap<String, ProfileStats>,
}

impl StatsBook {
    /// Fold a finished game into the profiles seated at it, in turn order
    pub fn record_game(&mut self, players: &[String], standing: &QuizStanding) -> QuizResult<()> {
        if !standing.is_finished() {
            return Err(QuizError::GameNotFinished);
        }
        if players.len() != standing.num_players() {
            return Err(QuizError::InvalidPlayerCount(players.len()));
        }

        let leaders = standing.leaders();
        let shared = leaders.len() > 1;

        for (idx, name) in players.iter().enumerate() {
            let stats = self.profiles.entry(name.clone()).or_default();
            stats.games_played += 1;
            stats.total_points += u64::from(standing.scores()[idx]);

            if leaders.contains(&idx) {
                if shared {
                    stats.ties += 1;
                } else {
                    stats.wins += 1;
                }
            }

            for turn in standing.history().iter().filter(|t| t.player == idx) {
                let verdicts = &turn.outcome.verdicts;
                stats.artist_hits += u32::from(verdicts.artist.is_hit());
                stats.title_hits += u32::from(verdicts.title.is_hit());
                stats.album_hits += u32::from(verdicts.album.is_hit());
            }
        }

        info!("📊 Recorded game for {}", players.join(", "));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ProfileStats> {
        self.profiles.get(name)
    }
}

/// Where stats live between sessions
pub trait StatsStore {
    fn load(&self) -> QuizResult<StatsBook>;
    fn save(&self, book: &StatsBook) -> QuizResult<()>;
}

/// Stats kept as a JSON file
#[derive(Debug, Clone)]
pub struct JsonStatsStore {
    path: PathBuf,
}

impl JsonStatsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl StatsStore for JsonStatsStore {
    fn load(&self) -> QuizResult<StatsBook> {
        if !self.path.exists() {
            return Ok(StatsBook::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, book: &StatsBook) -> QuizResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(book)?)?;
        Ok(())
    }
}
