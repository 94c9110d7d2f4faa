/// All game entity types: pure data, no logic.
///
/// Positions and sizes are measured in terminal cells relative to the
/// top-left corner of the play area.  They are stored as floats so slow
/// drift and boss velocities stay smooth between cells.

use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Session built, waiting for assets / the start signal.
    Idle,
    Running,
    /// Boss destroyed.
    Victory,
    /// Lives exhausted.
    Defeat,
}

/// Which way the player sprite leans, derived from held horizontal input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    Right,
    #[default]
    Forward,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle: `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// Width and height of one entity kind, taken from its sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub w: f32,
    pub h: f32,
}

/// Sizes of every entity kind the simulation spawns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityDims {
    pub player: Size,
    pub grunt: Size,
    pub boss: Size,
    pub laser: Size,
    pub enemy_laser: Size,
}

// ── Projectiles & effects ─────────────────────────────────────────────────────

/// A laser bolt.  Player lasers travel up (negative `vy`), boss lasers down.
#[derive(Clone, Debug, PartialEq)]
pub struct Laser {
    pub rect: Rect,
    /// Rows moved per frame.
    pub vy: f32,
}

/// A fading ring left behind by a hit.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    /// Centre, in play-area cells.
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// 1.0 when spawned, removed once it reaches 0.
    pub opacity: f32,
}

// ── Player & enemies ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub lives: u32,
    pub facing: Facing,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Grunt {
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub rect: Rect,
    pub hp: u32,
    pub max_hp: u32,
    pub vx: f32,
    pub vy: f32,
    /// Frames until a new random velocity is drawn.
    pub move_countdown: u32,
    /// Frames until the next shot.
    pub fire_countdown: u32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire session state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub grunts: Vec<Grunt>,
    /// Present only during the boss phase.
    pub boss: Option<Boss>,
    /// Set once the boss has appeared this session; never cleared until restart.
    pub boss_spawned: bool,
    /// Player-fired lasers.
    pub lasers: Vec<Laser>,
    /// Boss-fired lasers.
    pub enemy_lasers: Vec<Laser>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    /// The highest score seen so far (updated live during play).
    pub high_score: u32,
    pub level: Level,
    pub status: GameStatus,
    pub frame: u64,
    /// Frames left before the player may fire again.
    pub fire_cooldown: u32,
    /// Play-area size in cells.
    pub width: f32,
    pub height: f32,
    pub dims: EntityDims,
    /// Configuration already tuned for `level`.
    pub config: GameConfig,
}
