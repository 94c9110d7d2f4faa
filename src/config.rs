/// Game tuning and difficulty presets
///
/// `GameConfig::default()` is the Medium baseline.  A JSON file may override
/// any subset of fields; `tuned_for` then applies the difficulty scaling.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entities::Level;
use crate::error::GameError;

/// Hard upper bound on lives.
pub const MAX_LIVES: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Player ===
    /// Cells moved per frame while a direction is held
    pub player_speed: f32,
    /// Frames between shots while fire is held
    pub fire_cooldown_frames: u32,
    /// Rows per frame, upward
    pub laser_speed: f32,
    pub starting_lives: u32,

    // === Grunt formation ===
    pub grunt_rows: usize,
    pub grunt_cols: usize,
    /// Empty columns between neighbouring grunts
    pub grunt_margin_x: f32,
    /// Empty rows between formation rows
    pub grunt_margin_y: f32,
    /// Row of the formation's top edge at session start
    pub grunt_start_y: f32,
    /// Rows per frame the whole formation sinks
    pub grunt_drift: f32,
    pub grunt_points: u32,

    // === Boss ===
    pub boss_max_hp: u32,
    /// Awarded once when the boss is destroyed
    pub boss_bonus: u32,
    /// Horizontal velocity is drawn from [-boss_speed_x, boss_speed_x]
    pub boss_speed_x: f32,
    /// Vertical velocity is drawn from [-boss_speed_y, boss_speed_y]
    pub boss_speed_y: f32,
    /// Frames between velocity changes
    pub boss_move_interval: u32,
    /// Frames between boss shots
    pub boss_fire_interval: u32,
    /// Rows per frame, downward
    pub enemy_laser_speed: f32,

    // === Effects ===
    /// Radius gained per frame
    pub explosion_growth: f32,
    /// Opacity lost per frame
    pub explosion_fade: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_speed: 1.0,
            fire_cooldown_frames: 6,
            laser_speed: 1.0,
            starting_lives: MAX_LIVES,

            grunt_rows: 5,
            grunt_cols: 5,
            grunt_margin_x: 2.0,
            grunt_margin_y: 1.0,
            grunt_start_y: 1.0,
            grunt_drift: 0.0025,
            grunt_points: 100,

            boss_max_hp: 20,
            boss_bonus: 5000,
            boss_speed_x: 0.8,
            boss_speed_y: 0.3,
            boss_move_interval: 60,
            boss_fire_interval: 40,
            enemy_laser_speed: 0.5,

            explosion_growth: 0.5,
            explosion_fade: 0.05,
        }
    }
}

// ── Difficulty tables ────────────────────────────────────────────────────────

fn drift_multiplier(level: Level) -> f32 {
    match level {
        Level::Easy => 0.5,
        Level::Medium => 1.0,
        Level::Hard => 2.0,
    }
}

fn boss_fire_multiplier(level: Level) -> f32 {
    match level {
        Level::Easy => 1.5,
        Level::Medium => 1.0,
        Level::Hard => 0.6,
    }
}

impl GameConfig {
    /// Parse a config from JSON text.  Missing fields keep their defaults.
    pub fn from_json(text: &str, path: &Path) -> Result<Self, GameError> {
        let config: GameConfig =
            serde_json::from_str(text).map_err(|source| GameError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text, path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.starting_lives == 0 || self.starting_lives > MAX_LIVES {
            return Err(GameError::InvalidConfig(format!(
                "starting_lives must be in 1..={MAX_LIVES}, got {}",
                self.starting_lives
            )));
        }
        if self.grunt_rows == 0 || self.grunt_cols == 0 {
            return Err(GameError::InvalidConfig(
                "grunt formation must have at least one row and column".into(),
            ));
        }
        if self.boss_max_hp == 0 {
            return Err(GameError::InvalidConfig("boss_max_hp must be positive".into()));
        }
        if self.fire_cooldown_frames == 0
            || self.boss_move_interval == 0
            || self.boss_fire_interval == 0
        {
            return Err(GameError::InvalidConfig(
                "cooldowns and boss intervals must be at least one frame".into(),
            ));
        }
        let laser_speeds = [
            ("laser_speed", self.laser_speed),
            ("enemy_laser_speed", self.enemy_laser_speed),
        ];
        if let Some((name, value)) = laser_speeds.iter().find(|(_, v)| !v.is_finite() || *v <= 0.0)
        {
            return Err(GameError::InvalidConfig(format!(
                "{name} must be positive so lasers leave the play area, got {value}"
            )));
        }
        let speeds = [
            ("player_speed", self.player_speed),
            ("grunt_drift", self.grunt_drift),
            ("boss_speed_x", self.boss_speed_x),
            ("boss_speed_y", self.boss_speed_y),
            ("grunt_margin_x", self.grunt_margin_x),
            ("grunt_margin_y", self.grunt_margin_y),
            ("grunt_start_y", self.grunt_start_y),
            ("explosion_growth", self.explosion_growth),
        ];
        if let Some((name, value)) = speeds.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "{name} must be a non-negative number, got {value}"
            )));
        }
        if !(self.explosion_fade > 0.0 && self.explosion_fade <= 1.0) {
            return Err(GameError::InvalidConfig(format!(
                "explosion_fade must be in (0, 1], got {}",
                self.explosion_fade
            )));
        }
        Ok(())
    }

    /// Apply difficulty scaling on top of this baseline.
    pub fn tuned_for(&self, level: Level) -> Self {
        let fire = (self.boss_fire_interval as f32 * boss_fire_multiplier(level)).round() as u32;
        Self {
            grunt_drift: self.grunt_drift * drift_multiplier(level),
            boss_fire_interval: fire.max(1),
            ..self.clone()
        }
    }
}
