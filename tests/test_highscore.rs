use std::io;

use space_raid::compute::{init_state, start_session};
use space_raid::config::GameConfig;
use space_raid::entities::*;
use space_raid::highscore;

fn dims() -> EntityDims {
    EntityDims {
        player: Size { w: 3.0, h: 2.0 },
        grunt: Size { w: 3.0, h: 2.0 },
        boss: Size { w: 7.0, h: 3.0 },
        laser: Size { w: 1.0, h: 1.0 },
        enemy_laser: Size { w: 1.0, h: 1.0 },
    }
}

fn session_with_best(best: u32) -> GameState {
    let idle = init_state(Level::Medium, 40.0, 20.0, dims(), &GameConfig::default(), 0);
    GameState { score: best, high_score: best, ..start_session(&idle) }
}

#[test]
fn missing_file_reads_as_zero() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(highscore::load(&dir.path().join("score")), 0);
}

#[test]
fn garbled_file_reads_as_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score");
    std::fs::write(&path, "lots").unwrap();
    assert_eq!(highscore::load(&path), 0);
}

#[test]
fn saved_score_is_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score");
    highscore::save(&path, 4200).unwrap();
    assert_eq!(highscore::load(&path), 4200);
}

#[test]
fn new_best_is_saved_even_when_loop_failed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score");
    let state = session_with_best(7500);
    let failed: io::Result<()> = Err(io::Error::new(io::ErrorKind::BrokenPipe, "render"));

    let result = highscore::keep_best(&path, 1000, &state, failed);

    assert_eq!(result.unwrap_err().kind(), io::ErrorKind::BrokenPipe);
    assert_eq!(highscore::load(&path), 7500);
}

#[test]
fn unbeaten_best_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score");
    highscore::save(&path, 9000).unwrap();
    let state = session_with_best(9000);

    highscore::keep_best(&path, 9000, &state, Ok(())).unwrap();
    assert_eq!(highscore::load(&path), 9000);
}
