/// Best-score persistence: one integer in a plain text file.
///
/// Read failures are never fatal; a missing or garbled file reads as 0.

use std::io;
use std::path::{Path, PathBuf};

use crate::entities::GameState;

/// `$HOME/.space_raid_score`, or the working directory when `HOME` is unset.
pub fn default_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".space_raid_score")
}

pub fn load(path: &Path) -> u32 {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

pub fn save(path: &Path, score: u32) -> io::Result<()> {
    std::fs::write(path, score.to_string())
}

/// Persist the session's best if it beat `previous`, then hand back the
/// frame loop's `outcome` unchanged.  The save happens even when the loop
/// ended with an error.
pub fn keep_best<T>(
    path: &Path,
    previous: u32,
    state: &GameState,
    outcome: io::Result<T>,
) -> io::Result<T> {
    if state.high_score > previous {
        match save(path, state.high_score) {
            Ok(()) => log::info!("New best score {} saved", state.high_score),
            Err(e) => log::warn!("Could not save high score: {e}"),
        }
    }
    outcome
}
