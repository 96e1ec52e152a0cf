use std::time::Instant;

use songquiz::error::QuizError;
use songquiz::library::Track;
use songquiz::quiz::MatchVerdict;
use songquiz::stats::{JsonStatsStore, StatsBook, StatsStore};

mod common;
use common::mock_answers::MockAnswers;

fn halo() -> Track {
    Track::new("Halo", &["Beyoncé"], Some("I Am... Sasha Fierce"))
}

#[tokio::test]
async fn test_full_game_two_players() {
    let config = common::config_with_window(5_000);
    let mut session = common::session(
        &config,
        common::quiz_type(2, 5, 10, 3, 0),
        &["ana", "bo"],
        common::single_track_playlist(halo(), 4),
    );

    // ana names the title every time, bo names the artist
    let mut ana = MockAnswers::new(&["halo"]);
    let mut bo = MockAnswers::new(&["beyonce"]);

    while !session.is_finished() {
        let report = if session.current_player_name() == "ana" {
            session.play_turn(&mut ana).await.unwrap()
        } else {
            session.play_turn(&mut bo).await.unwrap()
        };
        assert_eq!(report.track.title, "Halo");
        ana = MockAnswers::new(&["halo"]);
        bo = MockAnswers::new(&["beyonce"]);
    }

    assert_eq!(session.standing().scores(), &[20, 10]);
    assert_eq!(session.standing().history().len(), 4);
    assert_eq!(session.standing().leaders(), vec![0]);
    assert!(matches!(
        session.play_turn(&mut MockAnswers::new(&["halo"])).await,
        Err(QuizError::GameFinished)
    ));
}

#[tokio::test]
async fn test_turn_ends_early_when_everything_is_named() {
    let config = common::config_with_window(10_000);
    let mut session = common::session(
        &config,
        common::quiz_type(1, 5, 10, 3, 0),
        &["ana"],
        common::single_track_playlist(halo(), 1),
    );

    // The last answer would be a miss, but the turn is over before it is read
    let mut answers = MockAnswers::new(&[
        "beyonce",
        "halo",
        "i am sasha fierce",
        "something wrong",
    ]);
    let report = session.play_turn(&mut answers).await.unwrap();

    let v = report.turn.outcome.verdicts;
    assert_eq!(v.artist, MatchVerdict::Exact);
    assert_eq!(v.title, MatchVerdict::Exact);
    assert_eq!(v.album, MatchVerdict::Exact);
    assert_eq!(report.turn.outcome.points, 18);
    assert_eq!(answers.remaining(), 1);
}

#[tokio::test]
async fn test_silent_player_times_out_with_zero() {
    let config = common::config_with_window(150);
    let mut session = common::session(
        &config,
        common::quiz_type(1, 5, 10, 0, 20),
        &["ana"],
        common::single_track_playlist(halo(), 1),
    );

    let started = Instant::now();
    let report = session.play_turn(&mut MockAnswers::silent()).await.unwrap();

    assert!(started.elapsed().as_millis() >= 150);
    assert!(!report.turn.outcome.verdicts.any_hit());
    assert_eq!(report.turn.outcome.points, 0);
    assert!(session.is_finished());
}

#[tokio::test]
async fn test_late_answer_after_window_is_ignored() {
    let config = common::config_with_window(100);
    let mut session = common::session(
        &config,
        common::quiz_type(1, 5, 10, 0, 0),
        &["ana"],
        common::single_track_playlist(halo(), 1),
    );

    let mut answers = MockAnswers::delayed(&[(1_000, "halo")]);
    let report = session.play_turn(&mut answers).await.unwrap();
    assert_eq!(report.turn.outcome.verdicts.title, MatchVerdict::Miss);
    assert_eq!(report.turn.outcome.points, 0);
}

#[tokio::test]
async fn test_quick_answer_earns_speed_bonus() {
    let config = common::config_with_window(60_000);
    let mut session = common::session(
        &config,
        common::quiz_type(1, 5, 10, 0, 20),
        &["ana"],
        common::single_track_playlist(halo(), 1),
    );

    let report = session
        .play_turn(&mut MockAnswers::new(&["halo"]))
        .await
        .unwrap();
    // Answered well within the first tenth of the window
    assert!(report.turn.outcome.points >= 10 + 18);
    assert!(report.turn.outcome.points <= 30);
}

#[tokio::test]
async fn test_partial_artist_list() {
    let config = common::config_with_window(5_000);
    let track = Track::new("Don't Go Breaking My Heart", &["Elton John", "Kiki Dee"], None);
    let mut session = common::session(
        &config,
        common::quiz_type(1, 10, 10, 0, 0),
        &["ana"],
        common::single_track_playlist(track, 1),
    );

    let report = session
        .play_turn(&mut MockAnswers::new(&["elton john"]))
        .await
        .unwrap();
    assert_eq!(report.turn.outcome.verdicts.artist, MatchVerdict::Partial(0.5));
    assert_eq!(report.turn.outcome.points, 5);
}

#[tokio::test]
async fn test_playlist_runs_dry_without_repeats() {
    let config = common::config_with_window(1_000);
    let mut session = common::session(
        &config,
        common::quiz_type(3, 5, 10, 0, 0),
        &["ana"],
        common::single_track_playlist(halo(), 1),
    );

    session.play_turn(&mut MockAnswers::new(&[])).await.unwrap();
    assert!(matches!(
        session.play_turn(&mut MockAnswers::new(&[])).await,
        Err(QuizError::PlaylistExhausted(_))
    ));
}

#[tokio::test]
async fn test_finished_game_feeds_stats_store() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = common::config_with_window(5_000);
    let mut session = common::session(
        &config,
        common::quiz_type(1, 5, 10, 0, 0),
        &["ana", "bo"],
        common::test_playlist(),
    );

    while !session.is_finished() {
        session.play_turn(&mut MockAnswers::new(&[])).await.unwrap();
    }

    let store = JsonStatsStore::new(dir.path().join("stats.json"));
    let mut book = StatsBook::default();
    book.record_game(session.players(), session.standing()).unwrap();
    store.save(&book).unwrap();

    let loaded = store.load().unwrap();
    let ana = loaded.get("ana").unwrap();
    assert_eq!(ana.games_played, 1);
    assert_eq!(ana.ties, 1);
    assert_eq!(ana.total_points, 0);
}

#[tokio::test]
async fn test_combined_answer_ends_turn() {
    let config = common::config_with_window(10_000);
    let track = Track::new("Halo", &["Beyoncé"], None);
    let mut session = common::session(
        &config,
        common::quiz_type(1, 5, 10, 3, 0),
        &["ana"],
        common::single_track_playlist(track, 1),
    );

    let mut answers = MockAnswers::new(&["halo beyonce", "something wrong"]);
    let report = session.play_turn(&mut answers).await.unwrap();

    assert_eq!(report.turn.outcome.points, 15);
    assert_eq!(answers.remaining(), 1);
}

#[tokio::test]
async fn test_configured_correction_matches_title_word() {
    // The default config corrects "beatle" to "beatles"
    let config = common::config_with_window(5_000);
    let track = Track::new("Beatle Bones N Smokin Stones", &["Captain Beefheart"], None);
    let mut session = common::session(
        &config,
        common::quiz_type(1, 5, 10, 0, 0),
        &["ana"],
        common::single_track_playlist(track, 1),
    );

    let report = session
        .play_turn(&mut MockAnswers::new(&["beatle bones n smokin stones"]))
        .await
        .unwrap();
    assert_eq!(report.turn.outcome.verdicts.title, MatchVerdict::Exact);
    assert_eq!(report.turn.outcome.points, 10);
}
