//! Track Library
//!
//! Track metadata as supplied by the catalog, JSON playlists, and the queue
//! that decides which track plays next.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{QuizError, QuizResult};

/// Ground-truth metadata for one track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artists: Vec<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    /// Where the host can find the audio (file path, URI); opaque to the quiz
    #[serde(default)]
    pub source: Option<String>,
}

impl Track {
    pub fn new(title: &str, artists: &[&str], album: Option<&str>) -> Self {
        Self {
            title: title.to_string(),
            artists: artists.iter().map(|a| a.to_string()).collect(),
            album: album.map(str::to_string),
            duration_ms: None,
            source: None,
        }
    }

    /// "Artist A, Artist B - Title" for announcements
    pub fn display(&self) -> String {
        if self.artists.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.artists.join(", "), self.title)
        }
    }
}

/// A named list of tracks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub name: String,
    pub tracks: Vec<Track>,
}

impl Playlist {
    /// Load a playlist from a JSON file
    pub fn load(path: &Path) -> QuizResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let playlist: Self = serde_json::from_str(&content)?;
        info!(
            "📀 Loaded playlist '{}' with {} tracks",
            playlist.name,
            playlist.tracks.len()
        );
        Ok(playlist)
    }

    /// Save a playlist as pretty JSON
    pub fn save(&self, path: &Path) -> QuizResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Hands out tracks in random order.
///
/// Without repeats each track plays at most once and the queue runs dry;
/// with repeats the order is reshuffled whenever it is used up.
#[derive(Debug)]
pub struct TrackQueue {
    name: String,
    tracks: Vec<Track>,
    order: Vec<usize>,
    position: usize,
    repeat_allowed: bool,
}

impl TrackQueue {
    pub fn new<R: Rng + ?Sized>(playlist: Playlist, repeat_allowed: bool, rng: &mut R) -> Self {
        let mut queue = Self {
            name: playlist.name,
            order: (0..playlist.tracks.len()).collect(),
            tracks: playlist.tracks,
            position: 0,
            repeat_allowed,
        };
        queue.order.shuffle(rng);
        queue
    }

    /// Next track to play, or `PlaylistExhausted`
    pub fn next_track<R: Rng + ?Sized>(&mut self, rng: &mut R) -> QuizResult<&Track> {
        if self.tracks.is_empty() {
            return Err(QuizError::PlaylistExhausted(self.name.clone()));
        }

        if self.position >= self.order.len() {
            if !self.repeat_allowed {
                return Err(QuizError::PlaylistExhausted(self.name.clone()));
            }
            debug!("Reshuffling '{}' for another pass", self.name);
            self.order.shuffle(rng);
            self.position = 0;
        }

        let idx = self.order[self.position];
        self.position += 1;
        Ok(&self.tracks[idx])
    }

    /// Tracks that can still be drawn before the queue runs dry (None = unlimited)
    pub fn remaining(&self) -> Option<usize> {
        if self.repeat_allowed && !self.tracks.is_empty() {
            None
        } else {
            Some(self.order.len() - self.position)
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
