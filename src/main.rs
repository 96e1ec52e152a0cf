//! SongQuiz - Song trivia in the terminal
//!
//! Plays a quiz over a JSON playlist; answers are typed, one per line.

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use songquiz::audit;
use songquiz::config::Config;
use songquiz::library::Playlist;
use songquiz::session::{GameSession, LineAnswers};
use songquiz::stats::{JsonStatsStore, StatsStore};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Player name (repeat for every player, in turn order)
    #[arg(short, long = "player")]
    players: Vec<String>,

    /// Quiz type to play (defaults to the configured one)
    #[arg(short, long)]
    quiz_type: Option<String>,

    /// Playlist JSON file
    #[arg(long)]
    playlist: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the track order
    #[arg(long)]
    seed: Option<u64>,

    /// Do not update profile statistics
    #[arg(long)]
    no_stats: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Setup logging
    let level = if args.verbose {
        Level::DEBUG
    } else {
        config.log_level.parse().unwrap_or(Level::INFO)
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("🎤 SongQuiz v{} starting...", env!("CARGO_PKG_VERSION"));

    let quiz_type_name = args
        .quiz_type
        .clone()
        .unwrap_or_else(|| config.default_quiz_type.clone());
    let quiz_type = Arc::new(config.quiz_type(&quiz_type_name)?);

    let players = if args.players.is_empty() {
        (1..=config.default_players.max(1))
            .map(|i| format!("Player {}", i))
            .collect()
    } else {
        args.players.clone()
    };

    let playlist_path = args
        .playlist
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.playlist_path));
    let playlist = Playlist::load(&playlist_path)
        .with_context(|| format!("Failed to load playlist {}", playlist_path.display()))?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut session = GameSession::new(&config, quiz_type, players, playlist, rng)?;
    let mut answers = LineAnswers::new(tokio::io::BufReader::new(tokio::io::stdin()));
    let history_dir = PathBuf::from(&config.history_dir);

    while !session.is_finished() {
        let standing = session.standing();
        let track_no = standing.current_track_index() + 1;
        println!(
            "\nRound {}/{} - {}, your turn!",
            standing.current_round_display_index(),
            standing.num_rounds(),
            session.current_player_name()
        );

        let track = session.start_turn()?;
        match &track.source {
            Some(source) => println!("🎧 Now playing: {}", source),
            None => println!("🎧 Now playing track #{}", track_no),
        }
        println!(
            "Name the artist, title or album ({}s, up to {} points)",
            config.answer_window_ms / 1000,
            session.quiz_type().max_points_per_turn()
        );

        let report = session.play_turn(&mut answers).await?;
        let v = &report.turn.outcome.verdicts;
        println!(
            "It was {} | artist: {:?}, title: {:?}, album: {:?} -> {} points",
            report.track.display(),
            v.artist,
            v.title,
            v.album,
            report.turn.outcome.points
        );

        if let Err(e) = audit::log_turn(&history_dir, &report.turn, &report.track) {
            warn!("Could not write turn log: {}", e);
        }

        if let Some(left) = session.tracks_remaining() {
            if !session.is_finished() && left == 0 {
                warn!("No tracks left in the playlist");
            }
        }
    }

    println!("\n🏁 Final scores:");
    for (name, score) in session.players().iter().zip(session.standing().scores()) {
        println!("  {}: {}", name, score);
    }
    let leaders = session.standing().leaders();
    if leaders.len() > 1 {
        println!("It's a tie!");
    } else if let Some(&winner) = leaders.first() {
        println!("{} wins!", session.players()[winner]);
    }

    if !args.no_stats {
        let store = JsonStatsStore::new(PathBuf::from(&config.stats_path));
        let mut book = store.load()?;
        book.record_game(session.players(), session.standing())?;
        store.save(&book)?;
    }

    Ok(())
}
