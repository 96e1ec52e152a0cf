pub mod mock_answers;

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

use songquiz::config::Config;
use songquiz::library::{Playlist, Track};
use songquiz::quiz::QuizType;
use songquiz::session::GameSession;

/// A small playlist where every title, artist and album is distinct
pub fn test_playlist() -> Playlist {
    Playlist {
        name: "Test Mix".to_string(),
        tracks: vec![
            Track::new("Halo", &["Beyoncé"], Some("I Am... Sasha Fierce")),
            Track::new("Yesterday", &["The Beatles"], Some("Help!")),
            Track::new("Don't Go Breaking My Heart", &["Elton John", "Kiki Dee"], None),
            Track::new("Bohemian Rhapsody", &["Queen"], Some("A Night at the Opera")),
        ],
    }
}

/// A playlist holding the same track `n` times, so the draw order does not matter
pub fn single_track_playlist(track: Track, n: usize) -> Playlist {
    Playlist {
        name: "Repeat".to_string(),
        tracks: vec![track; n],
    }
}

pub fn quiz_type(rounds: usize, artist: u32, title: u32, album: u32, speed: u32) -> QuizType {
    QuizType::new("Test", rounds, artist, title, album, speed, false).expect("valid quiz type")
}

pub fn config_with_window(answer_window_ms: u64) -> Config {
    Config {
        answer_window_ms,
        ..Config::default()
    }
}

pub fn session(config: &Config, quiz_type: QuizType, players: &[&str], playlist: Playlist) -> GameSession {
    GameSession::new(
        config,
        Arc::new(quiz_type),
        players.iter().map(|p| p.to_string()).collect(),
        playlist,
        StdRng::seed_from_u64(42),
    )
    .expect("Failed to create session")
}
