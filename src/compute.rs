/// Session lifecycle and the per-frame simulation step.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG and logging.

use rand::Rng;

use crate::boss::{spawn_boss, update_boss};
use crate::collision::resolve_collisions;
use crate::config::GameConfig;
use crate::entities::{
    EntityDims, Explosion, Facing, GameState, GameStatus, Grunt, Laser, Level, Player, Rect,
};

/// Held-key snapshot sampled at the top of a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Only honoured while the boss is on screen.
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

// ── Layout ───────────────────────────────────────────────────────────────────

/// Where the player (re)appears: horizontally centred, one row above the floor.
pub fn player_start(dims: &EntityDims, width: f32, height: f32) -> Rect {
    Rect {
        x: ((width - dims.player.w) / 2.0).max(0.0),
        y: (height - dims.player.h - 1.0).max(0.0),
        w: dims.player.w,
        h: dims.player.h,
    }
}

/// The opening grunt grid, centred horizontally.
pub fn spawn_formation(config: &GameConfig, dims: &EntityDims, width: f32) -> Vec<Grunt> {
    let (gw, gh) = (dims.grunt.w, dims.grunt.h);
    let cols = config.grunt_cols as f32;
    let total_w = cols * gw + (cols - 1.0) * config.grunt_margin_x;
    let start_x = ((width - total_w) / 2.0).max(0.0);

    (0..config.grunt_rows)
        .flat_map(|r| (0..config.grunt_cols).map(move |c| (r, c)))
        .map(|(r, c)| Grunt {
            rect: Rect {
                x: start_x + c as f32 * (gw + config.grunt_margin_x),
                y: config.grunt_start_y + r as f32 * (gh + config.grunt_margin_y),
                w: gw,
                h: gh,
            },
        })
        .collect()
}

/// Smallest play area (width, height) that fits the formation above the
/// player with a free row in between, and the boss in the upper half.
pub fn min_play_area(config: &GameConfig, dims: &EntityDims) -> (f32, f32) {
    let cols = config.grunt_cols as f32;
    let rows = config.grunt_rows as f32;
    let formation_w = cols * dims.grunt.w + (cols - 1.0) * config.grunt_margin_x;
    let formation_bottom =
        config.grunt_start_y + rows * dims.grunt.h + (rows - 1.0) * config.grunt_margin_y;

    let width = formation_w.max(dims.boss.w).max(dims.player.w);
    let height = (formation_bottom + 1.0 + dims.player.h + 1.0).max(dims.boss.h * 2.0);
    (width.ceil(), height.ceil())
}

// ── Constructors ─────────────────────────────────────────────────────────────

fn fresh_session(
    level: Level,
    width: f32,
    height: f32,
    dims: EntityDims,
    config: GameConfig,
    high_score: u32,
    status: GameStatus,
) -> GameState {
    GameState {
        player: Player {
            rect: player_start(&dims, width, height),
            lives: config.starting_lives,
            facing: Facing::Forward,
        },
        grunts: spawn_formation(&config, &dims, width),
        boss: None,
        boss_spawned: false,
        lasers: Vec::new(),
        enemy_lasers: Vec::new(),
        explosions: Vec::new(),
        score: 0,
        high_score,
        level,
        status,
        frame: 0,
        fire_cooldown: 0,
        width,
        height,
        dims,
        config,
    }
}

/// Build an `Idle` session for a play area of `width` × `height` cells.
/// `config` is the baseline; difficulty scaling for `level` is applied here.
pub fn init_state(
    level: Level,
    width: f32,
    height: f32,
    dims: EntityDims,
    config: &GameConfig,
    high_score: u32,
) -> GameState {
    fresh_session(
        level,
        width,
        height,
        dims,
        config.tuned_for(level),
        high_score,
        GameStatus::Idle,
    )
}

/// Idle → Running.  Any other status is left alone.
pub fn start_session(state: &GameState) -> GameState {
    if state.status != GameStatus::Idle {
        return state.clone();
    }
    log::info!(
        "Session started: {:?}, {} grunts, play area {}x{}",
        state.level,
        state.grunts.len(),
        state.width,
        state.height
    );
    GameState {
        status: GameStatus::Running,
        ..state.clone()
    }
}

/// Victory / Defeat → a fresh Running session.  Any other status is left alone.
pub fn restart(state: &GameState) -> GameState {
    match state.status {
        GameStatus::Victory | GameStatus::Defeat => {
            log::info!("Restarting after {:?} with score {}", state.status, state.score);
            fresh_session(
                state.level,
                state.width,
                state.height,
                state.dims,
                state.config.clone(),
                state.high_score.max(state.score),
                GameStatus::Running,
            )
        }
        _ => state.clone(),
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Apply held movement keys and clamp the player to the play area.
pub fn move_player(state: &GameState, input: &TickInput) -> GameState {
    let speed = state.config.player_speed;
    let p = &state.player;

    let mut dx = 0.0;
    if input.left {
        dx -= speed;
    }
    if input.right {
        dx += speed;
    }
    let mut dy = 0.0;
    if state.boss.is_some() {
        if input.up {
            dy -= speed;
        }
        if input.down {
            dy += speed;
        }
    }

    let facing = match (input.left, input.right) {
        (true, false) => Facing::Left,
        (false, true) => Facing::Right,
        _ => Facing::Forward,
    };

    let max_x = (state.width - p.rect.w).max(0.0);
    let max_y = (state.height - p.rect.h).max(0.0);
    GameState {
        player: Player {
            rect: Rect {
                x: (p.rect.x + dx).clamp(0.0, max_x),
                y: (p.rect.y + dy).clamp(0.0, max_y),
                ..p.rect
            },
            facing,
            ..p.clone()
        },
        ..state.clone()
    }
}

/// Tick the fire cooldown and launch a laser if fire is held and it has run out.
pub fn player_fire(state: &GameState, fire_held: bool) -> GameState {
    let mut cooldown = state.fire_cooldown.saturating_sub(1);
    let mut lasers = state.lasers.clone();
    if fire_held && cooldown == 0 {
        let p = &state.player.rect;
        let size = state.dims.laser;
        lasers.push(Laser {
            rect: Rect {
                x: p.x + (p.w - size.w) / 2.0,
                y: p.y - size.h,
                w: size.w,
                h: size.h,
            },
            vy: -state.config.laser_speed,
        });
        cooldown = state.config.fire_cooldown_frames;
    }
    GameState {
        lasers,
        fire_cooldown: cooldown,
        ..state.clone()
    }
}

// ── Per-frame movement ───────────────────────────────────────────────────────

/// Move lasers by their velocity and drop those entirely outside the play area.
pub fn advance_lasers(lasers: &[Laser], height: f32) -> Vec<Laser> {
    lasers
        .iter()
        .map(|l| Laser {
            rect: Rect {
                y: l.rect.y + l.vy,
                ..l.rect
            },
            vy: l.vy,
        })
        .filter(|l| l.rect.y + l.rect.h > 0.0 && l.rect.y < height)
        .collect()
}

/// Sink the formation and drop grunts that have left through the bottom.
pub fn advance_grunts(grunts: &[Grunt], drift: f32, height: f32) -> Vec<Grunt> {
    grunts
        .iter()
        .map(|g| Grunt {
            rect: Rect {
                y: g.rect.y + drift,
                ..g.rect
            },
        })
        .filter(|g| g.rect.y < height)
        .collect()
}

pub fn advance_explosions(explosions: &[Explosion], config: &GameConfig) -> Vec<Explosion> {
    explosions
        .iter()
        .map(|e| Explosion {
            radius: e.radius + config.explosion_growth,
            opacity: e.opacity - config.explosion_fade,
            ..e.clone()
        })
        .filter(|e| e.opacity > 0.0)
        .collect()
}

/// Defeat check and boss spawn, run once all collisions are in.
fn settle(state: &GameState) -> GameState {
    let mut next = state.clone();

    if next.status == GameStatus::Running && next.player.lives == 0 {
        next.status = GameStatus::Defeat;
        log::info!("Defeat on frame {} with score {}", next.frame, next.score);
    }

    if next.status == GameStatus::Running
        && next.grunts.is_empty()
        && next.boss.is_none()
        && !next.boss_spawned
    {
        next.boss = Some(spawn_boss(&next.config, &next.dims, next.width));
        next.boss_spawned = true;
        log::info!("Boss spawned on frame {}", next.frame);
    }

    if next.status == GameStatus::Victory {
        log::info!("Victory on frame {} with score {}", next.frame, next.score);
    }

    next
}

// ── Per-frame step (nearly pure, RNG is injected) ───────────────────────────

/// Advance a running session by one frame.  Idle and finished sessions are
/// returned unchanged.  All randomness comes through `rng` so callers control
/// determinism (useful for tests with a seeded RNG).
pub fn step(state: &GameState, input: &TickInput, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Running {
        return state.clone();
    }

    // ── 1–2. Input and firing ────────────────────────────────────────────────
    let next = move_player(state, input);
    let mut next = player_fire(&next, input.fire);

    // ── 3–4. Lasers ──────────────────────────────────────────────────────────
    next.lasers = advance_lasers(&next.lasers, next.height);
    next.enemy_lasers = advance_lasers(&next.enemy_lasers, next.height);

    // ── 5. Enemies ───────────────────────────────────────────────────────────
    match &next.boss {
        None => {
            next.grunts = advance_grunts(&next.grunts, next.config.grunt_drift, next.height);
        }
        Some(boss) => {
            let (boss, shot) = update_boss(
                boss,
                next.width,
                next.height,
                &next.config,
                next.dims.enemy_laser,
                rng,
            );
            next.boss = Some(boss);
            next.enemy_lasers.extend(shot);
        }
    }

    // ── 6. Collisions ────────────────────────────────────────────────────────
    let mut next = resolve_collisions(&next);

    // ── 7. Explosions ────────────────────────────────────────────────────────
    next.explosions = advance_explosions(&next.explosions, &next.config);

    // ── 8. Outcome & boss phase ──────────────────────────────────────────────
    let mut next = settle(&next);
    next.frame = state.frame + 1;
    next.high_score = next.high_score.max(next.score);
    next
}
