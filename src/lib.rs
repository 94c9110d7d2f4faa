//! space_raid: a terminal arcade shooter.
//!
//! A grunt formation drifts toward the player; clearing it summons a boss
//! that roams the upper half of the screen and fires back.
//!
//! - `entities`: pure data for every entity and the session state
//! - `compute`: session lifecycle and the per-frame `step`
//! - `boss`, `collision`: the boss policy and hit resolution used by `step`
//! - `assets`, `config`: sprites and tunables loaded before play
//! - `highscore`: the best-score file
//! - `display`: crossterm rendering of a session

pub mod assets;
pub mod boss;
pub mod collision;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod highscore;

pub use assets::{AssetKind, Assets, Sprite};
pub use compute::{init_state, restart, start_session, step, TickInput};
pub use config::GameConfig;
pub use entities::{GameState, GameStatus, Level};
pub use error::GameError;
