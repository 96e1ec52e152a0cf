use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::library::Track;
use crate::quiz::PlayedTurn;

/// Write an entry to the turn log in `dir`
pub fn log(dir: &Path, entry: &str) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    let log_path = dir.join("turns.log");

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    writeln!(
        file,
        "[{}] {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        entry
    )?;
    Ok(())
}

/// Log the judged outcome of one turn together with the track it was about
pub fn log_turn(dir: &Path, turn: &PlayedTurn, track: &Track) -> Result<()> {
    let v = &turn.outcome.verdicts;
    log(
        dir,
        &format!(
            "ROUND {} PLAYER {} | {} | artist={:?} title={:?} album={:?} | {}ms | {} pts",
            turn.round + 1,
            turn.player + 1,
            track.display(),
            v.artist,
            v.title,
            v.album,
            turn.outcome.elapsed_ms,
            turn.outcome.points
        ),
    )
}
